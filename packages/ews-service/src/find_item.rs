use ews_domain::xml::{self, XmlWriter};

use crate::{
	Result,
	envelope::{Operation, ResponseMessage},
	types::{FolderId, IndexedPageView, Item, ItemShape, Restriction, Traversal},
};

/// Searches one or more folders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FindItem {
	pub traversal: Traversal,
	pub item_shape: ItemShape,
	pub page: Option<IndexedPageView>,
	pub restriction: Option<Restriction>,
	pub parent_folder_ids: Vec<FolderId>,
	/// Free-text query. Requires a search-capable mailbox.
	pub query_string: Option<String>,
}
impl FindItem {
	/// Associated traversal with all properties, the defaults for configuration lookups.
	pub fn new(parent_folder_id: FolderId) -> Self {
		Self {
			traversal: Traversal::default(),
			item_shape: ItemShape::default(),
			page: None,
			restriction: None,
			parent_folder_ids: vec![parent_folder_id],
			query_string: None,
		}
	}

	pub fn with_traversal(mut self, traversal: Traversal) -> Self {
		self.traversal = traversal;

		self
	}

	pub fn with_shape(mut self, item_shape: ItemShape) -> Self {
		self.item_shape = item_shape;

		self
	}

	pub fn with_restriction(mut self, restriction: Restriction) -> Self {
		self.restriction = Some(restriction);

		self
	}

	pub fn with_page(mut self, page: IndexedPageView) -> Self {
		self.page = Some(page);

		self
	}

	pub fn with_query_string(mut self, query: impl Into<String>) -> Self {
		self.query_string = Some(query.into());

		self
	}
}

impl Operation for FindItem {
	const NAME: &'static str = "FindItem";

	type Output = FindItemResult;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("m:FindItem", [("Traversal", self.traversal.as_str())])?;
		self.item_shape.write(writer, "m:ItemShape")?;

		if let Some(page) = &self.page {
			page.write(writer)?;
		}
		if let Some(restriction) = &self.restriction {
			restriction.write(writer)?;
		}

		writer.start("m:ParentFolderIds", [])?;

		for folder in &self.parent_folder_ids {
			folder.write(writer)?;
		}

		writer.end("m:ParentFolderIds")?;
		writer.leaf_opt("m:QueryString", self.query_string.as_deref())?;
		writer.end("m:FindItem")?;

		Ok(())
	}

	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		let mut result = FindItemResult::default();

		for message in messages {
			if let Some(root) = &message.root_folder {
				result.total_items_in_view += root.total_items_in_view.unwrap_or_default();
				result.includes_last_item_in_range = root.includes_last_item_in_range;
			}

			result.items.extend(message.into_items().items);
		}

		Ok(result)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FindItemResult {
	pub total_items_in_view: u32,
	pub includes_last_item_in_range: Option<bool>,
	pub items: Vec<Item>,
}
