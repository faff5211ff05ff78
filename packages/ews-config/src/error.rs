use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read EWS configuration from {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("EWS configuration at {path:?} is not valid TOML.")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error("{message}")]
	Validation { message: String },
}
