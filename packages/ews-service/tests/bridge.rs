use time::macros::datetime;

use ews_domain::{CategoryList, Color};
use ews_service::{
	BridgeError, CategoryListHandle, ConflictResolution, ItemUpdate, MessageDisposition,
	extended_property,
	types::{
		CalendarItem, ExtendedFieldUri, ExtendedProperty, Item, ItemId, Message, PropertyTag,
		PropertyType,
	},
};

fn sample_document() -> CategoryList {
	let mut list = CategoryList::new(datetime!(2024-01-01 00:00:00 UTC));

	list.add_category_at("Red", Color::Red, datetime!(2024-01-02 03:04:05.5 UTC))
		.expect("Failed to add Red.");
	list.add_category_at("Waiting", Color::None, datetime!(2024-01-03 00:00:00 UTC))
		.expect("Failed to add Waiting.");

	list
}

fn encode(document: &CategoryList) -> String {
	document.encode().expect("Failed to encode list.")
}

fn item_with(properties: Vec<ExtendedProperty>, id: Option<ItemId>) -> Item {
	Item::Message(Message { item_id: id, extended_properties: properties, ..Default::default() })
}

fn categories_property(value: &str) -> ExtendedProperty {
	ExtendedProperty::new(extended_property::category_list_uri(), value)
}

#[test]
fn update_field_round_trips_through_extraction() {
	let document = sample_document();
	let field = extended_property::build_update_field(encode(&document));
	let Item::Message(mut message) = field.item else {
		panic!("Update field should carry a message.");
	};

	message.item_id = Some(ItemId::new("CFG").with_change_key("CK7"));

	let handle = extended_property::extract_document(&[Item::Message(message)])
		.expect("Extraction should succeed.");

	assert_eq!(handle.document, document);
	assert_eq!(handle.item_id, ItemId::new("CFG").with_change_key("CK7"));
}

#[test]
fn tags_compare_numerically() {
	let mut uri = extended_property::category_list_uri();

	uri.property_tag = Some("0X7C08".parse().expect("Tag should parse."));

	let item = item_with(
		vec![ExtendedProperty::new(uri, encode(&sample_document()))],
		Some(ItemId::new("CFG")),
	);

	assert!(extended_property::extract_document(&[item]).is_ok());
	assert_eq!("31752".parse::<PropertyTag>().ok(), Some(PropertyTag::CATEGORIES));
	assert_eq!(PropertyTag::CATEGORIES.to_string(), "0x7c08");
}

#[test]
fn absent_property_is_reported() {
	let other = ExtendedProperty::new(
		ExtendedFieldUri::tagged(PropertyTag::INTERNET_MESSAGE_ID, PropertyType::String),
		"<id@example.com>",
	);
	let items = [item_with(vec![other], Some(ItemId::new("CFG")))];

	assert!(matches!(
		extended_property::extract_document(&items),
		Err(BridgeError::PropertyAbsent)
	));
	assert!(matches!(extended_property::extract_document(&[]), Err(BridgeError::PropertyAbsent)));
}

#[test]
fn declared_type_must_match_too() {
	let string_typed = ExtendedProperty::new(
		ExtendedFieldUri::tagged(PropertyTag::CATEGORIES, PropertyType::String),
		encode(&sample_document()),
	);
	let items = [item_with(vec![string_typed], Some(ItemId::new("CFG")))];

	assert!(matches!(
		extended_property::extract_document(&items),
		Err(BridgeError::PropertyAbsent)
	));
}

#[test]
fn several_matches_are_ambiguous() {
	let encoded = encode(&sample_document());
	let first = item_with(vec![categories_property(&encoded)], Some(ItemId::new("A")));
	let second = Item::CalendarItem(CalendarItem {
		item_id: Some(ItemId::new("B")),
		extended_properties: vec![categories_property(&encoded)],
		..Default::default()
	});

	assert!(matches!(
		extended_property::extract_document(&[first, second]),
		Err(BridgeError::Ambiguous { count: 2 })
	));
}

#[test]
fn missing_item_id_and_bad_payload_fail() {
	let encoded = encode(&sample_document());
	let no_id = item_with(vec![categories_property(&encoded)], None);

	assert!(matches!(
		extended_property::extract_document(&[no_id]),
		Err(BridgeError::MissingItemId)
	));

	let garbage = item_with(vec![categories_property("%%%")], Some(ItemId::new("CFG")));

	assert!(matches!(
		extended_property::extract_document(&[garbage]),
		Err(BridgeError::Decode(_))
	));
}

#[test]
fn write_back_presents_the_change_key() {
	let handle = CategoryListHandle {
		document: sample_document(),
		item_id: ItemId::new("CFG").with_change_key("CK7"),
	};
	let update = extended_property::build_update(&handle).expect("Failed to build update.");

	assert_eq!(update.message_disposition, Some(MessageDisposition::SaveOnly));
	assert_eq!(update.conflict_resolution, Some(ConflictResolution::NeverOverwrite));
	assert_eq!(update.item_changes.len(), 1);
	assert_eq!(update.item_changes[0].item_id, handle.item_id);

	let [ItemUpdate::Set(field)] = update.item_changes[0].updates.as_slice() else {
		panic!("Expected a single set update.");
	};
	let property = &field.item.extended_properties()[0];

	assert!(extended_property::is_category_list(property));
	assert_eq!(property.value.as_deref(), Some(encode(&handle.document).as_str()));
}
