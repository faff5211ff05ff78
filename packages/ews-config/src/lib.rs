mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Credentials, Server, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let endpoint = cfg.server.endpoint.as_str();

	if endpoint.is_empty() {
		return Err(Error::Validation { message: "server.endpoint must be non-empty.".to_string() });
	}
	if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
		return Err(Error::Validation {
			message: "server.endpoint must start with http:// or https://.".to_string(),
		});
	}
	if !types::SERVER_VERSIONS.contains(&cfg.server.version.as_str()) {
		return Err(Error::Validation {
			message: format!(
				"server.version must be one of {}.",
				types::SERVER_VERSIONS.join(", ")
			),
		});
	}
	if cfg.server.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "server.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.credentials.username.is_empty() {
		return Err(Error::Validation {
			message: "credentials.username must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.server.endpoint = cfg.server.endpoint.trim().to_string();
	cfg.server.version = cfg.server.version.trim().to_string();
	cfg.credentials.username = cfg.credentials.username.trim().to_string();
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if cfg.credentials.mailbox.as_deref().map(|mailbox| mailbox.trim().is_empty()).unwrap_or(false)
	{
		cfg.credentials.mailbox = None;
	}
	if let Some(mailbox) = cfg.credentials.mailbox.as_mut() {
		*mailbox = mailbox.trim().to_string();
	}
}
