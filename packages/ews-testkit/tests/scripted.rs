use ews_providers::Transport;
use ews_testkit::{ScriptedTransport, fixtures, test_config};

#[tokio::test]
async fn replies_in_order_and_records_requests() {
	let transport = ScriptedTransport::with_responses(["first", "second"]);

	transport.push_failure("Connection reset.");

	assert_eq!(transport.exchange(b"a").await.expect("First reply."), b"first");
	assert_eq!(transport.exchange(b"b").await.expect("Second reply."), b"second");
	assert!(transport.exchange(b"c").await.is_err());
	assert!(transport.exchange(b"d").await.is_err());
	assert_eq!(transport.requests(), ["a", "b", "c", "d"]);
	assert_eq!(transport.last_request().as_deref(), Some("d"));
	assert_eq!(transport.remaining(), 0);
}

#[test]
fn test_config_is_valid() {
	assert!(ews_config::validate(&test_config()).is_ok());
}

#[test]
fn root_folder_counts_its_items() {
	let folder = fixtures::root_folder(&[
		fixtures::message_item("A", "CK1", ""),
		fixtures::message_item("B", "CK2", ""),
	]);

	assert!(folder.contains(r#"TotalItemsInView="2""#));
	assert!(folder.contains(r#"<t:ItemId Id="B" ChangeKey="CK2"/>"#));
}
