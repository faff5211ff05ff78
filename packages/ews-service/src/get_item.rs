use ews_domain::xml::{self, XmlWriter};

use crate::{
	Result,
	envelope::{self, Operation, ResponseMessage},
	types::{Item, ItemId, ItemShape},
};

/// Fetches one item by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetItem {
	pub item_shape: ItemShape,
	pub item_id: ItemId,
}
impl GetItem {
	/// All properties of the item.
	pub fn new(item_id: ItemId) -> Self {
		Self { item_shape: ItemShape::default(), item_id }
	}

	pub fn with_shape(mut self, item_shape: ItemShape) -> Self {
		self.item_shape = item_shape;

		self
	}
}

impl Operation for GetItem {
	const NAME: &'static str = "GetItem";

	type Output = Item;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("m:GetItem", [])?;
		self.item_shape.write(writer, "m:ItemShape")?;
		writer.start("m:ItemIds", [])?;
		self.item_id.write(writer, "t:ItemId")?;
		writer.end("m:ItemIds")?;
		writer.end("m:GetItem")?;

		Ok(())
	}

	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		let message = envelope::exactly_one(messages)?;

		envelope::exactly_one(message.into_items().items)
	}
}
