use std::io::{self, Write};

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Red.on_default() | Effects::BOLD)
		.usage(AnsiColor::Red.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

/// Falls back to `info` when `log_level` is not a valid filter directive.
pub fn env_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs go to stderr so that command output on stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
	tracing_subscriber::fmt().with_env_filter(env_filter(log_level)).with_writer(io::stderr).init();
}

pub fn print_json<T>(value: &T) -> serde_json::Result<()>
where
	T: ?Sized + Serialize,
{
	let mut stdout = io::stdout().lock();

	serde_json::to_writer_pretty(&mut stdout, value)?;
	writeln!(stdout).map_err(serde_json::Error::io)
}
