use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{BoxFuture, Error, Result, Transport};
use ews_config::Config;

pub struct HttpTransport {
	client: Client,
	endpoint: String,
	username: String,
	password: String,
	dump_traffic: bool,
}
impl HttpTransport {
	pub fn new(cfg: &Config) -> Result<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(cfg.server.timeout_ms))
			.danger_accept_invalid_certs(cfg.server.accept_invalid_certs)
			.default_headers(crate::soap_headers()?)
			.build()?;

		Ok(Self {
			client,
			endpoint: cfg.server.endpoint.clone(),
			username: cfg.credentials.username.clone(),
			password: cfg.credentials.password.clone(),
			dump_traffic: cfg.service.dump_traffic,
		})
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub async fn post(&self, request: &[u8]) -> Result<Vec<u8>> {
		if self.dump_traffic {
			tracing::trace!(
				endpoint = %self.endpoint,
				body = %String::from_utf8_lossy(request),
				"Sending SOAP request."
			);
		}

		let res = self
			.client
			.post(&self.endpoint)
			.basic_auth(&self.username, Some(&self.password))
			.body(request.to_vec())
			.send()
			.await?;
		let status = res.status();
		let body = res.bytes().await?.to_vec();

		if self.dump_traffic {
			tracing::trace!(
				status = status.as_u16(),
				body = %String::from_utf8_lossy(&body),
				"Received SOAP response."
			);
		}

		// Faults arrive with HTTP 500 and still carry a parseable envelope.
		if status.is_success() || status == StatusCode::INTERNAL_SERVER_ERROR {
			return Ok(body);
		}

		Err(Error::Status {
			status: status.as_u16(),
			body: String::from_utf8_lossy(&body).into_owned(),
		})
	}
}

impl Transport for HttpTransport {
	fn exchange<'a>(&'a self, request: &'a [u8]) -> BoxFuture<'a, Result<Vec<u8>>> {
		Box::pin(self.post(request))
	}
}
