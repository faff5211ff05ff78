pub mod fixtures;

mod error;

pub use error::{Error, Result};

use std::{collections::VecDeque, env, sync::Mutex};

use ews_config::{Config, Credentials, Server, Service};
use ews_providers::{BoxFuture, Transport};

enum Reply {
	Body(String),
	Failure(String),
}

/// Transport that replays queued replies in order and records every request it receives.
///
/// Running out of replies is reported as a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
	replies: Mutex<VecDeque<Reply>>,
	requests: Mutex<Vec<String>>,
}
impl ScriptedTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_responses<I, S>(responses: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let transport = Self::new();

		for response in responses {
			transport.push_response(response);
		}

		transport
	}

	pub fn push_response(&self, body: impl Into<String>) {
		self.replies
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push_back(Reply::Body(body.into()));
	}

	pub fn push_failure(&self, message: impl Into<String>) {
		self.replies
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push_back(Reply::Failure(message.into()));
	}

	/// Requests received so far, decoded as UTF-8.
	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn last_request(&self) -> Option<String> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner()).last().cloned()
	}

	pub fn remaining(&self) -> usize {
		self.replies.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	fn reply(&self, request: &[u8]) -> ews_providers::Result<Vec<u8>> {
		self.requests
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.push(String::from_utf8_lossy(request).into_owned());

		let next = self.replies.lock().unwrap_or_else(|err| err.into_inner()).pop_front();

		match next {
			Some(Reply::Body(body)) => Ok(body.into_bytes()),
			Some(Reply::Failure(message)) => Err(ews_providers::Error::Transport { message }),
			None => Err(ews_providers::Error::Transport {
				message: "Scripted transport has no reply left.".to_string(),
			}),
		}
	}
}

impl Transport for ScriptedTransport {
	fn exchange<'a>(&'a self, request: &'a [u8]) -> BoxFuture<'a, ews_providers::Result<Vec<u8>>> {
		Box::pin(async move { self.reply(request) })
	}
}

/// Offline configuration pointing at an unroutable endpoint.
pub fn test_config() -> Config {
	Config {
		server: Server {
			endpoint: "https://mail.example.invalid/EWS/Exchange.asmx".to_string(),
			version: "Exchange2013_SP1".to_string(),
			timeout_ms: 5_000,
			accept_invalid_certs: false,
		},
		credentials: Credentials {
			username: "user@example.com".to_string(),
			password: "secret".to_string(),
			mailbox: None,
		},
		service: Service::default(),
	}
}

/// Live configuration from `EWS_URL`, `EWS_USERNAME` and `EWS_PASSWORD`.
pub fn env_config() -> Result<Config> {
	let read = |key: &str| {
		env::var(key).map_err(|_| Error::Message(format!("{key} must be set for live tests.")))
	};
	let mut cfg = test_config();

	cfg.server.endpoint = read("EWS_URL")?;
	cfg.credentials.username = read("EWS_USERNAME")?;
	cfg.credentials.password = read("EWS_PASSWORD")?;
	cfg.server.timeout_ms = 30_000;

	ews_config::validate(&cfg)?;

	Ok(cfg)
}
