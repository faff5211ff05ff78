use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use time::OffsetDateTime;

use ews_domain::xml::{self, XmlWriter};

use crate::{
	Error, Result,
	types::{BodyType, CalendarItem, Message, PropertyPath, shape},
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum Attachment {
	FileAttachment(FileAttachment),
	ItemAttachment(ItemAttachment),
}
impl Attachment {
	pub fn attachment_id(&self) -> Option<&AttachmentId> {
		match self {
			Self::FileAttachment(file) => file.attachment_id.as_ref(),
			Self::ItemAttachment(item) => item.attachment_id.as_ref(),
		}
	}

	pub fn name(&self) -> Option<&str> {
		match self {
			Self::FileAttachment(file) => file.name.as_deref(),
			Self::ItemAttachment(item) => item.name.as_deref(),
		}
	}

	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		match self {
			Self::FileAttachment(file) => file.write(writer),
			Self::ItemAttachment(item) => item.write(writer),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Attachments {
	#[serde(rename = "$value", default)]
	pub attachments: Vec<Attachment>,
}
impl Attachments {
	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:Attachments", [])?;

		for attachment in &self.attachments {
			attachment.write(writer)?;
		}

		writer.end("t:Attachments")?;

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AttachmentId {
	#[serde(rename = "@Id")]
	pub id: String,
	#[serde(rename = "@RootItemId", default)]
	pub root_item_id: Option<String>,
	#[serde(rename = "@RootItemChangeKey", default)]
	pub root_item_change_key: Option<String>,
}
impl AttachmentId {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), root_item_id: None, root_item_change_key: None }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.empty("t:AttachmentId", [("Id", self.id.as_str())])?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FileAttachment {
	#[serde(rename = "AttachmentId", default)]
	pub attachment_id: Option<AttachmentId>,
	#[serde(rename = "Name", default)]
	pub name: Option<String>,
	#[serde(rename = "ContentType", default)]
	pub content_type: Option<String>,
	#[serde(rename = "ContentId", default)]
	pub content_id: Option<String>,
	#[serde(rename = "ContentLocation", default)]
	pub content_location: Option<String>,
	#[serde(rename = "Size", default)]
	pub size: Option<u64>,
	#[serde(rename = "LastModifiedTime", default, with = "ews_domain::time_serde::option")]
	pub last_modified_time: Option<OffsetDateTime>,
	#[serde(rename = "IsInline", default)]
	pub is_inline: Option<bool>,
	#[serde(rename = "IsContactPhoto", default)]
	pub is_contact_photo: Option<bool>,
	/// Base64 payload as carried on the wire.
	#[serde(rename = "Content", default)]
	pub content: Option<String>,
}
impl FileAttachment {
	pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: &[u8]) -> Self {
		Self {
			name: Some(name.into()),
			content_type: Some(content_type.into()),
			content: Some(STANDARD.encode(bytes)),
			..Default::default()
		}
	}

	/// Decoded payload. `None` when the server did not return content.
	pub fn content_bytes(&self) -> Result<Option<Vec<u8>>> {
		let Some(content) = self.content.as_deref() else {
			return Ok(None);
		};
		let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();

		STANDARD.decode(compact).map(Some).map_err(|err| Error::MalformedResponse {
			message: format!("Attachment content is not valid base64: {err}."),
		})
	}

	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:FileAttachment", [])?;
		writer.leaf_opt("t:Name", self.name.as_deref())?;
		writer.leaf_opt("t:ContentType", self.content_type.as_deref())?;
		writer.leaf_opt("t:ContentId", self.content_id.as_deref())?;
		writer.leaf_opt("t:ContentLocation", self.content_location.as_deref())?;
		writer.leaf_bool("t:IsInline", self.is_inline)?;
		writer.leaf_bool("t:IsContactPhoto", self.is_contact_photo)?;
		writer.leaf_opt("t:Content", self.content.as_deref())?;
		writer.end("t:FileAttachment")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ItemAttachment {
	#[serde(rename = "AttachmentId", default)]
	pub attachment_id: Option<AttachmentId>,
	#[serde(rename = "Name", default)]
	pub name: Option<String>,
	#[serde(rename = "ContentType", default)]
	pub content_type: Option<String>,
	#[serde(rename = "Size", default)]
	pub size: Option<u64>,
	#[serde(rename = "IsInline", default)]
	pub is_inline: Option<bool>,
	#[serde(rename = "Message", default)]
	pub message: Option<Message>,
	#[serde(rename = "CalendarItem", default)]
	pub calendar_item: Option<CalendarItem>,
}
impl ItemAttachment {
	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:ItemAttachment", [])?;
		writer.leaf_opt("t:Name", self.name.as_deref())?;
		writer.leaf_opt("t:ContentType", self.content_type.as_deref())?;
		writer.leaf_bool("t:IsInline", self.is_inline)?;

		if let Some(message) = &self.message {
			message.write(writer)?;
		}
		if let Some(item) = &self.calendar_item {
			item.write(writer)?;
		}

		writer.end("t:ItemAttachment")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentShape {
	pub include_mime_content: Option<bool>,
	pub body_type: Option<BodyType>,
	pub filter_html_content: Option<bool>,
	pub additional_properties: Vec<PropertyPath>,
}
impl AttachmentShape {
	pub(crate) fn is_empty(&self) -> bool {
		self.include_mime_content.is_none()
			&& self.body_type.is_none()
			&& self.filter_html_content.is_none()
			&& self.additional_properties.is_empty()
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		if self.is_empty() {
			return Ok(());
		}

		writer.start("m:AttachmentShape", [])?;
		writer.leaf_bool("t:IncludeMimeContent", self.include_mime_content)?;
		writer.leaf_opt("t:BodyType", self.body_type.map(BodyType::as_str))?;
		writer.leaf_bool("t:FilterHtmlContent", self.filter_html_content)?;
		shape::write_additional_properties(writer, &self.additional_properties);
		writer.end("m:AttachmentShape")?;

		Ok(())
	}
}
