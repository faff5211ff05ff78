use ews_domain::xml::{self, XmlWriter};

use crate::{
	MessageDisposition, Result,
	envelope::{Operation, ResponseMessage},
	types::{Item, ItemId, PropertyPath},
};

/// How the server treats a change key that no longer matches the stored item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictResolution {
	AutoResolve,
	AlwaysOverwrite,
	/// Rejects the write when the item changed since it was read.
	NeverOverwrite,
}
impl ConflictResolution {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::AutoResolve => "AutoResolve",
			Self::AlwaysOverwrite => "AlwaysOverwrite",
			Self::NeverOverwrite => "NeverOverwrite",
		}
	}
}

/// A field selector paired with an item that carries the new value.
#[derive(Clone, Debug, PartialEq)]
pub struct SetItemField {
	pub path: PropertyPath,
	pub item: Item,
}
impl SetItemField {
	fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		writer.start(name, [])?;
		self.path.write(writer)?;
		self.item.write(writer)?;
		writer.end(name)?;

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemUpdate {
	Set(SetItemField),
	Append(SetItemField),
	Delete(PropertyPath),
}
impl ItemUpdate {
	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		match self {
			Self::Set(field) => field.write(writer, "t:SetItemField"),
			Self::Append(field) => field.write(writer, "t:AppendToItemField"),
			Self::Delete(path) => {
				writer.start("t:DeleteItemField", [])?;
				path.write(writer)?;
				writer.end("t:DeleteItemField")
			},
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemChange {
	pub item_id: ItemId,
	pub updates: Vec<ItemUpdate>,
}
impl ItemChange {
	pub fn new(item_id: ItemId, updates: Vec<ItemUpdate>) -> Self {
		Self { item_id, updates }
	}

	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:ItemChange", [])?;
		self.item_id.write(writer, "t:ItemId")?;
		writer.start("t:Updates", [])?;

		for update in &self.updates {
			update.write(writer)?;
		}

		writer.end("t:Updates")?;
		writer.end("t:ItemChange")?;

		Ok(())
	}
}

/// Applies field changes to existing items.
///
/// Conflict resolution is left to the server default unless set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItem {
	pub message_disposition: Option<MessageDisposition>,
	pub conflict_resolution: Option<ConflictResolution>,
	pub item_changes: Vec<ItemChange>,
}
impl UpdateItem {
	pub fn new(item_changes: Vec<ItemChange>) -> Self {
		Self { item_changes, ..Default::default() }
	}

	pub fn with_disposition(mut self, disposition: MessageDisposition) -> Self {
		self.message_disposition = Some(disposition);

		self
	}

	pub fn with_conflict_resolution(mut self, resolution: ConflictResolution) -> Self {
		self.conflict_resolution = Some(resolution);

		self
	}
}

impl Operation for UpdateItem {
	const NAME: &'static str = "UpdateItem";

	type Output = Vec<Item>;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		let mut attrs = Vec::new();

		if let Some(disposition) = self.message_disposition {
			attrs.push(("MessageDisposition", disposition.as_str()));
		}
		if let Some(resolution) = self.conflict_resolution {
			attrs.push(("ConflictResolution", resolution.as_str()));
		}

		writer.start("m:UpdateItem", attrs)?;
		writer.start("m:ItemChanges", [])?;

		for change in &self.item_changes {
			change.write(writer)?;
		}

		writer.end("m:ItemChanges")?;
		writer.end("m:UpdateItem")?;

		Ok(())
	}

	/// Updated items come back with fresh change keys.
	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		Ok(messages.into_iter().flat_map(|message| message.into_items().items).collect())
	}
}
