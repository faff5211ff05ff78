use reqwest::header::{ACCEPT, CONTENT_TYPE};

use ews_config::Config;
use ews_providers::{HttpTransport, Transport};

fn config(endpoint: &str) -> Config {
	let payload = format!(
		r#"
[server]
endpoint = "{endpoint}"
timeout_ms = 500

[credentials]
username = "user@example.com"
password = "secret"
"#
	);

	toml::from_str(&payload).expect("Failed to parse test config.")
}

#[test]
fn builds_soap_headers() {
	let headers = ews_providers::soap_headers().expect("Failed to build headers.");

	assert_eq!(
		headers.get(CONTENT_TYPE).expect("Missing content type."),
		"text/xml; charset=utf-8"
	);
	assert_eq!(headers.get(ACCEPT).expect("Missing accept header."), "text/xml");
}

#[test]
fn http_transport_keeps_configured_endpoint() {
	let transport = HttpTransport::new(&config("https://mail.example.com/EWS/Exchange.asmx"))
		.expect("Failed to build transport.");

	assert_eq!(transport.endpoint(), "https://mail.example.com/EWS/Exchange.asmx");
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_transport_error() {
	let transport = HttpTransport::new(&config("http://127.0.0.1:9/EWS/Exchange.asmx"))
		.expect("Failed to build transport.");
	let err = transport.exchange(b"<soap:Envelope/>").await.expect_err("Expected connect error.");

	assert!(matches!(err, ews_providers::Error::Reqwest(_)), "Unexpected error: {err}");
}
