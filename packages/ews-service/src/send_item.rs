use ews_domain::xml::{self, XmlWriter};

use crate::{
	Result,
	envelope::{Operation, ResponseMessage},
	types::{FolderId, ItemId},
};

/// Sends items that already exist in the mailbox, typically drafts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendItem {
	pub save_item_to_folder: bool,
	pub item_ids: Vec<ItemId>,
	/// Where the sent copy lands. The server uses Sent Items when unset.
	pub saved_item_folder_id: Option<FolderId>,
}
impl SendItem {
	pub fn new(item_ids: Vec<ItemId>, save_item_to_folder: bool) -> Self {
		Self { save_item_to_folder, item_ids, saved_item_folder_id: None }
	}
}

impl Operation for SendItem {
	const NAME: &'static str = "SendItem";

	type Output = ();

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		let save = xml::bool_token(self.save_item_to_folder);

		writer.start("m:SendItem", [("SaveItemToFolder", save)])?;
		writer.start("m:ItemIds", [])?;

		for item_id in &self.item_ids {
			item_id.write(writer, "t:ItemId")?;
		}

		writer.end("m:ItemIds")?;

		if let Some(folder) = &self.saved_item_folder_id {
			writer.start("m:SavedItemFolderId", [])?;
			folder.write(writer)?;
			writer.end("m:SavedItemFolderId")?;
		}

		writer.end("m:SendItem")?;

		Ok(())
	}

	fn project(&self, _messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		Ok(())
	}
}
