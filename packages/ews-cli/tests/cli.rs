use tracing_subscriber::EnvFilter;

#[test]
fn version_matches_package() {
	assert_eq!(ews_cli::VERSION, env!("CARGO_PKG_VERSION"));
}

#[test]
fn invalid_log_level_falls_back_to_info() {
	let fallback = EnvFilter::new("info").to_string();

	assert_eq!(ews_cli::env_filter("ews_service=verbose").to_string(), fallback);
	assert_ne!(ews_cli::env_filter("ews_service=debug").to_string(), fallback);
}
