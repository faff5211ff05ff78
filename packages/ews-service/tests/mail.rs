use std::sync::Arc;

use time::macros::datetime;

use ews_service::{
	Draft, Error, EwsService,
	types::{BodyType, FileAttachment, ItemId},
};
use ews_testkit::{ScriptedTransport, fixtures, test_config};

const MESSAGE_FIELDS: &str = r#"<t:Subject>Quarterly</t:Subject>
<t:Body BodyType="HTML" IsTruncated="false">&lt;p&gt;Hi&lt;/p&gt;</t:Body>
<t:DateTimeReceived>2024-03-01T10:00:00Z</t:DateTimeReceived>
<t:Size>1024</t:Size>
<t:Categories>
<t:String>Blue</t:String>
<t:String>Red</t:String>
</t:Categories>
<t:InternetMessageHeaders>
<t:InternetMessageHeader HeaderName="Message-ID">&lt;abc@example.com&gt;</t:InternetMessageHeader>
<t:InternetMessageHeader HeaderName="X-Mailer">ews</t:InternetMessageHeader>
</t:InternetMessageHeaders>
<t:From>
<t:Mailbox>
<t:Name>Ann</t:Name>
<t:EmailAddress>ann@example.com</t:EmailAddress>
</t:Mailbox>
</t:From>
<t:InternetMessageId>&lt;abc@example.com&gt;</t:InternetMessageId>
<t:IsRead>true</t:IsRead>"#;

fn single_item(operation: &str, item: String) -> String {
	fixtures::response(
		operation,
		&[fixtures::success_message(operation, &fixtures::items(&[item]))],
	)
}

fn service(transport: &Arc<ScriptedTransport>) -> EwsService {
	EwsService::with_transport(test_config(), transport.clone())
}

#[tokio::test]
async fn send_email_saves_a_draft_then_sends_it() {
	let transport = Arc::new(ScriptedTransport::with_responses([
		single_item("CreateItem", fixtures::message_item("NEW", "CK1", "")),
		fixtures::response("SendItem", &[fixtures::success_message("SendItem", "")]),
	]));
	let draft = Draft::new(vec!["a@example.com".to_string()], "Report", "<p>Hi</p>")
		.with_attachment(FileAttachment::new("r.txt", "text/plain", b"hello"));
	let item_id = service(&transport).send_email(draft).await.expect("Send should succeed.");

	assert_eq!(item_id, ItemId::new("NEW").with_change_key("CK1"));

	let requests = transport.requests();

	assert!(requests[0].contains(r#"<m:CreateItem MessageDisposition="SaveOnly">"#));
	assert!(requests[0].contains(r#"<t:DistinguishedFolderId Id="drafts">"#));
	assert!(requests[0].contains(r#"<t:Body BodyType="HTML">&lt;p&gt;Hi&lt;/p&gt;</t:Body>"#));
	assert!(requests[0].contains("<t:EmailAddress>a@example.com</t:EmailAddress>"));
	assert!(requests[0].contains("<t:Content>aGVsbG8=</t:Content>"));
	assert!(requests[1].contains(r#"<m:SendItem SaveItemToFolder="true">"#));
	assert!(requests[1].contains(r#"<t:ItemId Id="NEW" ChangeKey="CK1"/>"#));
}

#[tokio::test]
async fn send_email_requires_a_recipient() {
	let transport = Arc::new(ScriptedTransport::new());
	let err = service(&transport)
		.send_email(Draft::new(Vec::new(), "Empty", "Nobody"))
		.await
		.expect_err("Expected an invalid request.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn get_message_reads_fields_and_headers() {
	let transport = Arc::new(ScriptedTransport::with_responses([single_item(
		"GetItem",
		fixtures::message_item("MSG", "CK1", MESSAGE_FIELDS),
	)]));
	let message = service(&transport)
		.get_message(ItemId::new("MSG"))
		.await
		.expect("Get should succeed.");

	assert_eq!(message.subject.as_deref(), Some("Quarterly"));
	assert_eq!(message.date_time_received, Some(datetime!(2024-03-01 10:00:00 UTC)));
	assert_eq!(message.size, Some(1024));
	assert_eq!(message.is_read, Some(true));
	assert_eq!(message.category_names(), ["Blue", "Red"]);
	assert_eq!(message.header("message-id"), Some("<abc@example.com>"));
	assert_eq!(message.header("X-MAILER"), Some("ews"));
	assert_eq!(message.header("Subject"), None);

	let body = message.body.as_ref().expect("Body should be present.");

	assert_eq!(body.body_type, BodyType::Html);
	assert_eq!(body.content, "<p>Hi</p>");
	assert_eq!(
		message.from.as_ref().and_then(|from| from.mailbox.email_address.as_deref()),
		Some("ann@example.com")
	);

	let request = transport.last_request().expect("Request should be recorded.");

	assert!(request.contains(r#"<t:FieldURI FieldURI="item:InternetMessageHeaders"/>"#));
}

#[tokio::test]
async fn get_message_rejects_other_item_kinds() {
	let transport = Arc::new(ScriptedTransport::with_responses([single_item(
		"GetItem",
		fixtures::calendar_item("CAL", "CK1", ""),
	)]));
	let err = service(&transport)
		.get_message(ItemId::new("CAL"))
		.await
		.expect_err("Expected a malformed response.");

	assert!(matches!(err, Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn find_by_internet_message_id_searches_the_inbox() {
	let found = fixtures::response(
		"FindItem",
		&[fixtures::success_message(
			"FindItem",
			&fixtures::root_folder(&[fixtures::message_item("MSG", "CK1", "")]),
		)],
	);
	let transport = Arc::new(ScriptedTransport::with_responses([
		found,
		single_item("GetItem", fixtures::message_item("MSG", "CK1", MESSAGE_FIELDS)),
	]));
	let message = service(&transport)
		.find_message_by_internet_message_id("<abc@example.com>")
		.await
		.expect("Find should succeed.");

	assert_eq!(message.internet_message_id.as_deref(), Some("<abc@example.com>"));

	let requests = transport.requests();

	assert!(requests[0].contains(r#"<m:FindItem Traversal="Shallow">"#));
	assert!(requests[0].contains(r#"<t:DistinguishedFolderId Id="inbox">"#));
	assert!(requests[0].contains(r#"PropertyTag="0x1035" PropertyType="String""#));
	assert!(requests[0].contains(r#"<t:Constant Value="&lt;abc@example.com&gt;"/>"#));
	assert!(requests[1].contains(r#"<t:ItemId Id="MSG" ChangeKey="CK1"/>"#));
}

#[tokio::test]
async fn update_categories_overwrites_the_field() {
	let transport = Arc::new(ScriptedTransport::with_responses([single_item(
		"UpdateItem",
		fixtures::message_item("MSG", "CK2", ""),
	)]));
	let item_id = service(&transport)
		.update_message_categories(
			ItemId::new("MSG").with_change_key("CK1"),
			vec!["Blue".to_string(), "Travel".to_string()],
		)
		.await
		.expect("Update should succeed.");

	assert_eq!(item_id, ItemId::new("MSG").with_change_key("CK2"));

	let request = transport.last_request().expect("Request should be recorded.");

	assert!(request.contains(
		r#"<m:UpdateItem MessageDisposition="SaveOnly" ConflictResolution="AlwaysOverwrite">"#
	));
	assert!(request.contains(r#"<t:FieldURI FieldURI="item:Categories"/>"#));
	assert!(request.contains("<t:String>Blue</t:String>"));
	assert!(request.contains("<t:String>Travel</t:String>"));
}
