use std::slice;

use ews_domain::Color;

use crate::{
	BridgeError, EwsService, FindItem, GetItem, Result, envelope,
	extended_property::{self, CategoryListHandle},
	types::{BaseShape, FolderId, ItemId, ItemShape, PropertyPath, Restriction, Traversal},
};

/// Item class of the hidden calendar item that stores the master category list.
pub const CATEGORY_LIST_ITEM_CLASS: &str = "IPM.Configuration.CategoryList";

impl EwsService {
	/// Reads the master category list of the configured mailbox.
	pub async fn fetch_category_list(&self) -> Result<CategoryListHandle> {
		let item_class = PropertyPath::field("item:ItemClass");
		let find = FindItem::new(FolderId::distinguished("calendar", self.mailbox()))
			.with_traversal(Traversal::Associated)
			.with_shape(ItemShape::new(BaseShape::IdOnly).with_property(item_class.clone()))
			.with_restriction(Restriction::is_equal_to(item_class, CATEGORY_LIST_ITEM_CLASS));
		let found = self.execute(&find).await?;
		let config_item = envelope::exactly_one(found.items)?;
		let item_id = config_item.item_id().cloned().ok_or(BridgeError::MissingItemId)?;
		let shape = ItemShape::new(BaseShape::AllProperties)
			.with_property(PropertyPath::Extended(extended_property::category_list_uri()));
		let item = self.execute(&GetItem::new(item_id).with_shape(shape)).await?;
		let handle = extended_property::extract_document(slice::from_ref(&item))?;

		tracing::debug!(
			categories = handle.document.len(),
			session = handle.document.last_saved_session,
			"Fetched category list."
		);

		Ok(handle)
	}

	/// Writes `handle.document` back and returns the item id with its new change key.
	///
	/// The server has to echo exactly one updated item carrying an id.
	pub async fn save_category_list(&self, handle: &CategoryListHandle) -> Result<ItemId> {
		let updated = self.execute(&extended_property::build_update(handle)?).await?;

		tracing::info!(
			categories = handle.document.len(),
			session = handle.document.last_saved_session,
			"Saved category list."
		);

		let item = envelope::exactly_one(updated)?;

		Ok(item.item_id().cloned().ok_or(BridgeError::MissingItemId)?)
	}

	/// Fetches the list, appends `name` and saves it.
	pub async fn add_category(&self, name: &str, color: Color) -> Result<CategoryListHandle> {
		let mut handle = self.fetch_category_list().await?;

		handle.document.add_category(name, color)?;

		handle.item_id = self.save_category_list(&handle).await?;

		Ok(handle)
	}

	pub async fn delete_category(&self, name: &str) -> Result<CategoryListHandle> {
		let mut handle = self.fetch_category_list().await?;

		handle.document.delete_category(name)?;

		handle.item_id = self.save_category_list(&handle).await?;

		Ok(handle)
	}
}
