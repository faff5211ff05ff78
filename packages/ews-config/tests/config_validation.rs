use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use ews_config::Config;

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Option<Value>) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.and_then(|root| root.get_mut(section))
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	match value {
		Some(value) => {
			table.insert(key.to_string(), value);
		},
		None => {
			table.remove(key);
		},
	}

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("ews_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> ews_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = ews_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn template_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Template config should be valid.");

	assert_eq!(cfg.server.version, "Exchange2013_SP1");
	assert_eq!(cfg.mailbox(), Some("user@example.com"));
	assert!(!cfg.service.dump_traffic);
}

#[test]
fn defaults_apply_when_optional_keys_are_missing() {
	let payload = sample_toml_with("server", "version", None);
	let payload = {
		let mut root: Value = toml::from_str(&payload).expect("Failed to parse payload.");

		if let Some(server) = root.get_mut("server").and_then(Value::as_table_mut) {
			server.remove("timeout_ms");
		}
		if let Some(root) = root.as_table_mut() {
			root.remove("service");
		}

		toml::to_string(&root).expect("Failed to render payload.")
	};
	let cfg = load_payload(payload).expect("Config with defaults should be valid.");

	assert_eq!(cfg.server.version, "Exchange2013_SP1");
	assert_eq!(cfg.server.timeout_ms, 30_000);
	assert_eq!(cfg.service.log_level, "info");
}

#[test]
fn endpoint_must_use_http_scheme() {
	let payload =
		sample_toml_with("server", "endpoint", Some(Value::String("mail.example.com".into())));
	let err = load_payload(payload).expect_err("Expected endpoint validation error.");

	assert!(
		err.to_string().contains("server.endpoint must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn version_must_be_known() {
	let payload = sample_toml_with("server", "version", Some(Value::String("Exchange1999".into())));
	let err = load_payload(payload).expect_err("Expected version validation error.");

	assert!(err.to_string().contains("server.version must be one of"), "Unexpected error: {err}");
}

#[test]
fn timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.server.timeout_ms = 0;

	let err = ews_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(
		err.to_string().contains("server.timeout_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn username_must_be_non_empty_after_trim() {
	let payload = sample_toml_with("credentials", "username", Some(Value::String("   ".into())));
	let err = load_payload(payload).expect_err("Expected username validation error.");

	assert!(
		err.to_string().contains("credentials.username must be non-empty."),
		"Unexpected error: {err}"
	);
}

#[test]
fn blank_mailbox_falls_back_to_username() {
	let payload = sample_toml_with("credentials", "mailbox", Some(Value::String(" ".into())));
	let cfg = load_payload(payload).expect("Config should be valid.");

	assert_eq!(cfg.credentials.mailbox, None);
	assert_eq!(cfg.mailbox(), Some("user@example.com"));
}

#[test]
fn explicit_mailbox_wins_over_username() {
	let mut cfg = base_config();

	cfg.credentials.mailbox = Some("shared@example.com".to_string());

	assert_eq!(cfg.mailbox(), Some("shared@example.com"));

	cfg.credentials.mailbox = None;
	cfg.credentials.username = "DOMAIN\\user".to_string();

	assert_eq!(cfg.mailbox(), None);
}

#[test]
fn debug_output_redacts_password() {
	let cfg = base_config();
	let rendered = format!("{cfg:?}");

	assert!(!rendered.contains("secret"));
	assert!(rendered.contains("<redacted>"));
}

#[test]
fn missing_file_reports_path() {
	let path = env::temp_dir().join("ews_config_test_missing.toml");
	let err = ews_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, ews_config::Error::ReadConfig { .. }));
}
