use ews_domain::{AddError, DecodeError, DeleteError, EncodeError};

use crate::envelope::FaultDetail;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Transport failed: {0}")]
	Transport(#[from] ews_providers::Error),
	#[error("Malformed response: {message}")]
	MalformedResponse { message: String },
	#[error("Server error {code}: {message}")]
	Server { code: String, message: String, fault: Option<FaultDetail> },
	#[error("Expected {expected} item(s) in the response, found {actual}.")]
	CardinalityMismatch { expected: usize, actual: usize },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Request could not be rendered: {0}")]
	Encode(#[from] EncodeError),
	#[error(transparent)]
	Bridge(#[from] BridgeError),
	#[error(transparent)]
	Add(#[from] AddError),
	#[error(transparent)]
	Delete(#[from] DeleteError),
}
impl Error {
	/// Server response code, when the failure came from the server.
	pub fn server_code(&self) -> Option<&str> {
		match self {
			Self::Server { code, .. } => Some(code),
			_ => None,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
	#[error("No item carries the category list property.")]
	PropertyAbsent,
	#[error("Found {count} category list properties where one was expected.")]
	Ambiguous { count: usize },
	#[error("The item carrying the category list has no item id.")]
	MissingItemId,
	#[error("Category list property could not be decoded.")]
	Decode(#[from] DecodeError),
}
