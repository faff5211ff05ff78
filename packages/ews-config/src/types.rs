use std::fmt;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub server: Server,
	pub credentials: Credentials,
	#[serde(default)]
	pub service: Service,
}
impl Config {
	/// Mailbox named in distinguished folder ids. Falls back to the username when it is an
	/// address.
	pub fn mailbox(&self) -> Option<&str> {
		match self.credentials.mailbox.as_deref() {
			Some(mailbox) => Some(mailbox),
			None if self.credentials.username.contains('@') =>
				Some(self.credentials.username.as_str()),
			None => None,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
	pub endpoint: String,
	/// Sent as `RequestServerVersion`.
	#[serde(default = "default_version")]
	pub version: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub accept_invalid_certs: bool,
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
	pub mailbox: Option<String>,
}
impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.field("mailbox", &self.mailbox)
			.finish()
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
	/// Logs full request and response bodies at trace level.
	#[serde(default)]
	pub dump_traffic: bool,
}
impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level(), dump_traffic: false }
	}
}

pub(crate) const SERVER_VERSIONS: [&str; 9] = [
	"Exchange2007",
	"Exchange2007_SP1",
	"Exchange2010",
	"Exchange2010_SP1",
	"Exchange2010_SP2",
	"Exchange2013",
	"Exchange2013_SP1",
	"Exchange2016",
	"V2015_10_05",
];

fn default_version() -> String {
	"Exchange2013_SP1".to_string()
}

fn default_timeout_ms() -> u64 {
	30_000
}

fn default_log_level() -> String {
	"info".to_string()
}
