pub mod categories;
pub mod create_item;
pub mod envelope;
pub mod extended_property;
pub mod find_item;
pub mod get_attachment;
pub mod get_item;
pub mod mail;
pub mod send_item;
pub mod types;
pub mod update_item;

mod error;

pub use categories::CATEGORY_LIST_ITEM_CLASS;
pub use create_item::{CreateItem, MessageDisposition, SendMeetingInvitations};
pub use envelope::{FaultDetail, Operation, ResponseClass, ResponseMessage, ServerVersionInfo};
pub use error::{BridgeError, Error, Result};
pub use extended_property::CategoryListHandle;
pub use find_item::{FindItem, FindItemResult};
pub use get_attachment::GetAttachment;
pub use get_item::GetItem;
pub use mail::Draft;
pub use send_item::SendItem;
pub use update_item::{ConflictResolution, ItemChange, ItemUpdate, SetItemField, UpdateItem};

use std::sync::Arc;

use ews_config::Config;
use ews_providers::{HttpTransport, Transport};

pub struct EwsService {
	pub cfg: Config,
	pub transport: Arc<dyn Transport>,
}
impl EwsService {
	/// Builds a service that talks HTTP to the configured endpoint.
	pub fn new(cfg: Config) -> Result<Self> {
		let transport = HttpTransport::new(&cfg)?;

		Ok(Self { cfg, transport: Arc::new(transport) })
	}

	pub fn with_transport(cfg: Config, transport: Arc<dyn Transport>) -> Self {
		Self { cfg, transport }
	}

	pub fn mailbox(&self) -> Option<&str> {
		self.cfg.mailbox()
	}

	/// Runs one operation: render, exchange, decode, classify, project.
	pub async fn execute<O>(&self, op: &O) -> Result<O::Output>
	where
		O: Operation,
	{
		self.execute_with_header(op).await.map(|(_, output)| output)
	}

	/// Like [`Self::execute`], also returning the server version reported in the response header.
	pub async fn execute_with_header<O>(
		&self,
		op: &O,
	) -> Result<(Option<ServerVersionInfo>, O::Output)>
	where
		O: Operation,
	{
		let request = envelope::to_xml_document(op, &self.cfg.server.version)?;
		let raw = self.transport.exchange(request.as_bytes()).await?;

		tracing::debug!(
			operation = O::NAME,
			request_bytes = request.len(),
			response_bytes = raw.len(),
			"Exchanged SOAP envelope."
		);

		let body = String::from_utf8(raw).map_err(|err| Error::MalformedResponse {
			message: format!("Response body is not valid UTF-8: {err}."),
		})?;
		let response = envelope::parse_response(&body)?;

		if response.operation != O::NAME {
			return Err(Error::MalformedResponse {
				message: format!(
					"Expected a {} response, received {}.",
					O::NAME,
					response.operation
				),
			});
		}

		let messages = envelope::classify(O::NAME, response.messages)?;
		let output = op.project(messages)?;

		Ok((response.server_version, output))
	}
}
