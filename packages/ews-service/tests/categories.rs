use std::sync::Arc;

use time::macros::datetime;

use ews_domain::{AddError, CategoryList, Color, DeleteError};
use ews_service::{CATEGORY_LIST_ITEM_CLASS, Error, EwsService, types::ItemId};
use ews_testkit::{ScriptedTransport, fixtures, test_config};

fn stored_list() -> CategoryList {
	let mut list = CategoryList::new(datetime!(2024-01-01 00:00:00 UTC));

	list.default = "Red".to_string();
	list.add_category_at("Red", Color::Red, datetime!(2024-01-01 00:00:00 UTC))
		.expect("Failed to add Red.");

	list
}

fn find_response() -> String {
	fixtures::response(
		"FindItem",
		&[fixtures::success_message(
			"FindItem",
			&fixtures::root_folder(&[fixtures::message_item("CFG", "CK1", "")]),
		)],
	)
}

fn get_response(list: &CategoryList) -> String {
	let encoded = list.encode().expect("Failed to encode list.");
	let property = fixtures::extended_property("0x7C08", "Binary", &encoded);
	let inner = format!("<t:ItemClass>{CATEGORY_LIST_ITEM_CLASS}</t:ItemClass>\n{property}");

	fixtures::response(
		"GetItem",
		&[fixtures::success_message(
			"GetItem",
			&fixtures::items(&[fixtures::message_item("CFG", "CK1", &inner)]),
		)],
	)
}

fn update_response() -> String {
	fixtures::response(
		"UpdateItem",
		&[fixtures::success_message(
			"UpdateItem",
			&fixtures::items(&[fixtures::message_item("CFG", "CK2", "")]),
		)],
	)
}

fn written_value(request: &str) -> &str {
	let open = request.find("<t:Value>").expect("Update should carry a value.");
	let start = open + "<t:Value>".len();
	let end = request[start..].find("</t:Value>").expect("Value should be closed.");

	&request[start..start + end]
}

#[tokio::test]
async fn fetch_finds_then_gets_the_configuration_item() {
	let list = stored_list();
	let transport =
		Arc::new(ScriptedTransport::with_responses([find_response(), get_response(&list)]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let handle = service.fetch_category_list().await.expect("Fetch should succeed.");

	assert_eq!(handle.document, list);
	assert_eq!(handle.item_id, ItemId::new("CFG").with_change_key("CK1"));

	let requests = transport.requests();

	assert!(requests[0].contains(r#"<m:FindItem Traversal="Associated">"#));
	assert!(requests[0].contains("<t:BaseShape>IdOnly</t:BaseShape>"));
	assert!(requests[0].contains(r#"<t:DistinguishedFolderId Id="calendar">"#));
	assert!(requests[0].contains(r#"<t:Constant Value="IPM.Configuration.CategoryList"/>"#));
	assert!(requests[1].contains(r#"<t:ItemId Id="CFG" ChangeKey="CK1"/>"#));
	assert!(
		requests[1].contains(r#"<t:ExtendedFieldURI PropertyTag="0x7c08" PropertyType="Binary"/>"#)
	);
}

#[tokio::test]
async fn add_category_writes_back_with_the_read_change_key() {
	let transport = Arc::new(ScriptedTransport::with_responses([
		find_response(),
		get_response(&stored_list()),
		update_response(),
	]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let handle =
		service.add_category("Travel", Color::DarkBlue).await.expect("Add should succeed.");

	assert_eq!(handle.document.len(), 2);
	assert_eq!(handle.document.last_saved_session, 2);
	assert_eq!(handle.item_id, ItemId::new("CFG").with_change_key("CK2"));

	let requests = transport.requests();
	let update = &requests[2];

	assert!(update.contains(
		r#"<m:UpdateItem MessageDisposition="SaveOnly" ConflictResolution="NeverOverwrite">"#
	));
	assert!(update.contains(r#"<t:ItemId Id="CFG" ChangeKey="CK1"/>"#));

	let written =
		CategoryList::decode(written_value(update)).expect("Written list should decode.");

	assert_eq!(written, handle.document);
	assert_eq!(written.get("Travel").map(|c| c.color), Some(Color::DarkBlue));
}

#[tokio::test]
async fn duplicate_add_never_reaches_the_server() {
	let transport = Arc::new(ScriptedTransport::with_responses([
		find_response(),
		get_response(&stored_list()),
	]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let err = service.add_category("Red", Color::Green).await.expect_err("Expected duplicate.");

	assert!(matches!(err, Error::Add(AddError::DuplicateName { .. })));
	assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn delete_category_removes_and_saves() {
	let transport = Arc::new(ScriptedTransport::with_responses([
		find_response(),
		get_response(&stored_list()),
		update_response(),
		find_response(),
		get_response(&stored_list()),
	]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let handle = service.delete_category("Red").await.expect("Delete should succeed.");

	assert!(handle.document.is_empty());
	assert_eq!(handle.document.last_saved_session, 2);

	let err = service.delete_category("Blue").await.expect_err("Expected not found.");

	assert!(matches!(err, Error::Delete(DeleteError::NotFound { .. })));
	assert_eq!(transport.requests().len(), 5);
}

#[tokio::test]
async fn save_requires_the_updated_item_back() {
	let empty_update =
		fixtures::response("UpdateItem", &[fixtures::success_message("UpdateItem", "")]);
	let transport = Arc::new(ScriptedTransport::with_responses([
		find_response(),
		get_response(&stored_list()),
		empty_update,
	]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let err = service.add_category("Travel", Color::Blue).await.expect_err("Expected an error.");

	assert!(matches!(err, Error::CardinalityMismatch { expected: 1, actual: 0 }));
	assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn missing_configuration_item_is_a_cardinality_error() {
	let body = fixtures::response(
		"FindItem",
		&[fixtures::success_message("FindItem", &fixtures::root_folder(&[]))],
	);
	let transport = Arc::new(ScriptedTransport::with_responses([body]));
	let service = EwsService::with_transport(test_config(), transport.clone());
	let err = service.fetch_category_list().await.expect_err("Expected a cardinality error.");

	assert!(matches!(err, Error::CardinalityMismatch { expected: 1, actual: 0 }));
}
