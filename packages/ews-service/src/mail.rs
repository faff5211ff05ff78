//! Message helpers assembled from the operation set.

use crate::{
	ConflictResolution, CreateItem, Error, EwsService, FindItem, GetAttachment, GetItem,
	ItemChange, ItemUpdate, MessageDisposition, Result, SendItem, SetItemField, UpdateItem,
	envelope,
	types::{
		Attachment, AttachmentId, Attachments, BaseShape, Body, BodyType, Categories,
		ExtendedFieldUri, FileAttachment, FolderId, Item, ItemId, ItemShape, Message, PropertyPath,
		PropertyTag, PropertyType, Recipients, Restriction, Traversal,
	},
};

/// Outgoing message content.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
	pub to: Vec<String>,
	pub cc: Vec<String>,
	pub subject: String,
	pub body: String,
	pub body_type: BodyType,
	pub attachments: Vec<FileAttachment>,
}
impl Draft {
	/// HTML body, no copies, no attachments.
	pub fn new(to: Vec<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			to,
			cc: Vec::new(),
			subject: subject.into(),
			body: body.into(),
			body_type: BodyType::Html,
			attachments: Vec::new(),
		}
	}

	pub fn with_attachment(mut self, attachment: FileAttachment) -> Self {
		self.attachments.push(attachment);

		self
	}

	pub fn into_message(self) -> Message {
		let body = Body { body_type: self.body_type, is_truncated: None, content: self.body };
		let attachments = (!self.attachments.is_empty()).then(|| Attachments {
			attachments: self.attachments.into_iter().map(Attachment::FileAttachment).collect(),
		});

		Message {
			subject: Some(self.subject),
			body: Some(body),
			attachments,
			to_recipients: Some(Recipients::addresses(self.to)),
			cc_recipients: (!self.cc.is_empty()).then(|| Recipients::addresses(self.cc)),
			..Default::default()
		}
	}
}

impl EwsService {
	/// Saves `draft` in the Drafts folder.
	pub async fn create_draft(&self, draft: Draft) -> Result<ItemId> {
		let create =
			CreateItem::new(MessageDisposition::SaveOnly, vec![Item::Message(draft.into_message())])
				.with_saved_item_folder(FolderId::distinguished("drafts", self.mailbox()));
		let created = envelope::exactly_one(self.execute(&create).await?)?;

		created.item_id().cloned().ok_or_else(|| Error::MalformedResponse {
			message: "Created item carries no item id.".to_string(),
		})
	}

	/// Saves `draft` first and then sends it, keeping a copy in Sent Items.
	///
	/// Saving first guarantees an item id even on servers that omit it for direct sends.
	pub async fn send_email(&self, draft: Draft) -> Result<ItemId> {
		if draft.to.is_empty() {
			return Err(Error::InvalidRequest {
				message: "A message needs at least one recipient.".to_string(),
			});
		}

		let item_id = self.create_draft(draft).await?;

		self.send_item(&item_id).await?;

		tracing::debug!(item_id = %item_id.id, "Sent message.");

		Ok(item_id)
	}

	pub async fn send_item(&self, item_id: &ItemId) -> Result<()> {
		self.execute(&SendItem::new(vec![item_id.clone()], true)).await
	}

	/// Message with all properties and its internet headers.
	pub async fn get_message(&self, item_id: ItemId) -> Result<Message> {
		let shape = ItemShape::new(BaseShape::AllProperties)
			.with_property(PropertyPath::field("item:InternetMessageHeaders"));
		let item = self.execute(&GetItem::new(item_id).with_shape(shape)).await?;

		item.into_message().ok_or_else(|| Error::MalformedResponse {
			message: "Expected a message item.".to_string(),
		})
	}

	/// Looks a message up in the inbox by its `Message-ID` header.
	pub async fn find_message_by_internet_message_id(&self, id: &str) -> Result<Message> {
		let path = PropertyPath::Extended(ExtendedFieldUri::tagged(
			PropertyTag::INTERNET_MESSAGE_ID,
			PropertyType::String,
		));
		let find = FindItem::new(FolderId::distinguished("inbox", self.mailbox()))
			.with_traversal(Traversal::Shallow)
			.with_shape(ItemShape::new(BaseShape::IdOnly))
			.with_restriction(Restriction::is_equal_to(path, id));
		let found = envelope::exactly_one(self.execute(&find).await?.items)?;
		let item_id = found.item_id().cloned().ok_or_else(|| Error::MalformedResponse {
			message: "Found item carries no item id.".to_string(),
		})?;

		self.get_message(item_id).await
	}

	/// Replaces the categories of a message. Returns the id with its new change key.
	pub async fn update_message_categories(
		&self,
		item_id: ItemId,
		categories: Vec<String>,
	) -> Result<ItemId> {
		let message =
			Message { categories: Some(Categories::new(categories)), ..Default::default() };
		let field = SetItemField {
			path: PropertyPath::field("item:Categories"),
			item: Item::Message(message),
		};
		let change = ItemChange::new(item_id.clone(), vec![ItemUpdate::Set(field)]);
		let update = UpdateItem::new(vec![change])
			.with_disposition(MessageDisposition::SaveOnly)
			.with_conflict_resolution(ConflictResolution::AlwaysOverwrite);
		let updated = self.execute(&update).await?;

		Ok(updated.first().and_then(Item::item_id).cloned().unwrap_or(item_id))
	}

	pub async fn get_attachments(&self, ids: Vec<AttachmentId>) -> Result<Vec<Attachment>> {
		self.execute(&GetAttachment::new(ids)).await
	}
}
