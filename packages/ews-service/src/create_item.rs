use ews_domain::xml::{self, XmlWriter};

use crate::{
	Result,
	envelope::{Operation, ResponseMessage},
	types::{FolderId, Item},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageDisposition {
	SaveOnly,
	SendOnly,
	SendAndSaveCopy,
}
impl MessageDisposition {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::SaveOnly => "SaveOnly",
			Self::SendOnly => "SendOnly",
			Self::SendAndSaveCopy => "SendAndSaveCopy",
		}
	}
}

/// Required by the server when creating calendar items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendMeetingInvitations {
	SendToNone,
	SendOnlyToAll,
	SendToAllAndSaveCopy,
}
impl SendMeetingInvitations {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::SendToNone => "SendToNone",
			Self::SendOnlyToAll => "SendOnlyToAll",
			Self::SendToAllAndSaveCopy => "SendToAllAndSaveCopy",
		}
	}
}

/// Creates items. Each item is written under the element of its own kind.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateItem {
	pub message_disposition: MessageDisposition,
	pub send_meeting_invitations: Option<SendMeetingInvitations>,
	pub saved_item_folder_id: Option<FolderId>,
	pub items: Vec<Item>,
}
impl CreateItem {
	pub fn new(message_disposition: MessageDisposition, items: Vec<Item>) -> Self {
		Self {
			message_disposition,
			send_meeting_invitations: None,
			saved_item_folder_id: None,
			items,
		}
	}

	pub fn with_saved_item_folder(mut self, folder: FolderId) -> Self {
		self.saved_item_folder_id = Some(folder);

		self
	}

	pub fn with_meeting_invitations(mut self, invitations: SendMeetingInvitations) -> Self {
		self.send_meeting_invitations = Some(invitations);

		self
	}
}

impl Operation for CreateItem {
	const NAME: &'static str = "CreateItem";

	type Output = Vec<Item>;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		let mut attrs = vec![("MessageDisposition", self.message_disposition.as_str())];

		if let Some(invitations) = self.send_meeting_invitations {
			attrs.push(("SendMeetingInvitations", invitations.as_str()));
		}

		writer.start("m:CreateItem", attrs)?;

		if let Some(folder) = &self.saved_item_folder_id {
			writer.start("m:SavedItemFolderId", [])?;
			folder.write(writer)?;
			writer.end("m:SavedItemFolderId")?;
		}

		writer.start("m:Items", [])?;

		for item in &self.items {
			item.write(writer)?;
		}

		writer.end("m:Items")?;
		writer.end("m:CreateItem")?;

		Ok(())
	}

	/// Created items carry ids only. Sending without a saved copy yields none.
	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		Ok(messages.into_iter().flat_map(|message| message.into_items().items).collect())
	}
}
