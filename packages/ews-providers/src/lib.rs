pub mod http;

mod error;

pub use error::{Error, Result};
pub use http::HttpTransport;

use std::{future::Future, pin::Pin};

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Moves one serialized request to the server and returns the raw response body.
///
/// Implementations own timeouts and authentication. Callers never retry.
pub trait Transport
where
	Self: Send + Sync,
{
	fn exchange<'a>(&'a self, request: &'a [u8]) -> BoxFuture<'a, Result<Vec<u8>>>;
}

pub fn soap_headers() -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE));
	headers.insert(ACCEPT, "text/xml".parse()?);

	Ok(headers)
}
