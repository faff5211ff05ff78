//! Carries the category list document inside a binary extended property.
//!
//! Extraction and write-back use the same tag and type so that a document read from an item can
//! be written to that same item unchanged.

use ews_domain::{CategoryList, EncodeError};

use crate::{
	BridgeError, ConflictResolution, ItemChange, ItemUpdate, MessageDisposition, SetItemField,
	UpdateItem,
	types::{
		ExtendedFieldUri, ExtendedProperty, Item, ItemId, Message, PropertyPath, PropertyTag,
		PropertyType,
	},
};

/// A decoded category list together with the item it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryListHandle {
	pub document: CategoryList,
	/// Id and change key captured at read time. Write-back presents both.
	pub item_id: ItemId,
}

pub fn category_list_uri() -> ExtendedFieldUri {
	ExtendedFieldUri::tagged(PropertyTag::CATEGORIES, PropertyType::Binary)
}

/// Finds the one category list property among `items` and decodes it.
pub fn extract_document(items: &[Item]) -> Result<CategoryListHandle, BridgeError> {
	let found: Vec<(&Item, &str)> = items
		.iter()
		.flat_map(|item| {
			item.extended_properties()
				.iter()
				.filter(|property| is_category_list(property))
				.filter_map(|property| property.value.as_deref())
				.map(move |value| (item, value))
		})
		.collect();
	let (item, value) = match found.as_slice() {
		[] => return Err(BridgeError::PropertyAbsent),
		[single] => *single,
		_ => return Err(BridgeError::Ambiguous { count: found.len() }),
	};
	let item_id = item.item_id().cloned().ok_or(BridgeError::MissingItemId)?;
	let document = CategoryList::decode(value)?;

	Ok(CategoryListHandle { document, item_id })
}

pub fn is_category_list(property: &ExtendedProperty) -> bool {
	property.uri.matches(PropertyTag::CATEGORIES, &PropertyType::Binary)
}

/// Wraps an encoded document as the single field to set.
pub fn build_update_field(encoded: String) -> SetItemField {
	let uri = category_list_uri();
	let message = Message {
		extended_properties: vec![ExtendedProperty::new(uri.clone(), encoded)],
		..Default::default()
	};

	SetItemField { path: PropertyPath::Extended(uri), item: Item::Message(message) }
}

/// Update that writes `handle.document` back to its item.
///
/// The change key read with the document is sent along, so a concurrent edit fails on the
/// server instead of being overwritten.
pub fn build_update(handle: &CategoryListHandle) -> Result<UpdateItem, EncodeError> {
	let field = build_update_field(handle.document.encode()?);
	let change = ItemChange::new(handle.item_id.clone(), vec![ItemUpdate::Set(field)]);

	Ok(UpdateItem::new(vec![change])
		.with_disposition(MessageDisposition::SaveOnly)
		.with_conflict_resolution(ConflictResolution::NeverOverwrite))
}
