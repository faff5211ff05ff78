use std::fmt;

use serde::{
	Deserialize, Deserializer,
	de::{EnumAccess, VariantAccess, Visitor},
};
use time::OffsetDateTime;

use ews_domain::{
	timestamp,
	xml::{self, XmlWriter},
};

use crate::types::{
	Attachments, ExtendedProperty, ItemId, Mailbox, Recipients, SingleRecipient,
};

/// One item of a response payload. The kind is carried by the variant, never by which optional
/// slot happens to be populated.
///
/// Kinds without a typed model, such as meeting requests or contacts, land in [`Item::Other`]
/// with their element name and id so that a mixed folder still decodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
	Message(Message),
	CalendarItem(CalendarItem),
	Other { kind: String, item_id: Option<ItemId> },
}
impl Item {
	pub fn item_id(&self) -> Option<&ItemId> {
		match self {
			Self::Message(message) => message.item_id.as_ref(),
			Self::CalendarItem(item) => item.item_id.as_ref(),
			Self::Other { item_id, .. } => item_id.as_ref(),
		}
	}

	/// Element name of the item, such as `Message` or `MeetingRequest`.
	pub fn kind(&self) -> &str {
		match self {
			Self::Message(_) => "Message",
			Self::CalendarItem(_) => "CalendarItem",
			Self::Other { kind, .. } => kind,
		}
	}

	pub fn extended_properties(&self) -> &[ExtendedProperty] {
		match self {
			Self::Message(message) => &message.extended_properties,
			Self::CalendarItem(item) => &item.extended_properties,
			Self::Other { .. } => &[],
		}
	}

	pub fn as_message(&self) -> Option<&Message> {
		match self {
			Self::Message(message) => Some(message),
			_ => None,
		}
	}

	pub fn into_message(self) -> Option<Message> {
		match self {
			Self::Message(message) => Some(message),
			_ => None,
		}
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		match self {
			Self::Message(message) => message.write(writer),
			Self::CalendarItem(item) => item.write(writer),
			Self::Other { kind, .. } => writer.empty(&format!("t:{kind}"), []),
		}
	}
}
impl<'de> Deserialize<'de> for Item {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_enum("Item", MODELLED_KINDS, ItemVisitor)
	}
}

const MODELLED_KINDS: &[&str] = &["Message", "CalendarItem"];

struct ItemVisitor;
impl<'de> Visitor<'de> for ItemVisitor {
	type Value = Item;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("an item element")
	}

	fn visit_enum<A>(self, data: A) -> Result<Item, A::Error>
	where
		A: EnumAccess<'de>,
	{
		let (kind, variant) = data.variant::<String>()?;

		match kind.as_str() {
			"Message" => variant.newtype_variant().map(Item::Message),
			"CalendarItem" => variant.newtype_variant().map(Item::CalendarItem),
			_ => variant
				.newtype_variant::<UnmodelledItem>()
				.map(|item| Item::Other { kind, item_id: item.item_id }),
		}
	}
}

#[derive(Deserialize)]
struct UnmodelledItem {
	#[serde(rename = "ItemId", default)]
	item_id: Option<ItemId>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Items {
	#[serde(rename = "$value", default)]
	pub items: Vec<Item>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum BodyType {
	Best,
	#[serde(rename = "HTML")]
	Html,
	Text,
}
impl BodyType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Best => "Best",
			Self::Html => "HTML",
			Self::Text => "Text",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Body {
	#[serde(rename = "@BodyType")]
	pub body_type: BodyType,
	#[serde(rename = "@IsTruncated", default)]
	pub is_truncated: Option<bool>,
	#[serde(rename = "$text", default)]
	pub content: String,
}
impl Body {
	pub fn html(content: impl Into<String>) -> Self {
		Self { body_type: BodyType::Html, is_truncated: None, content: content.into() }
	}

	pub fn text(content: impl Into<String>) -> Self {
		Self { body_type: BodyType::Text, is_truncated: None, content: content.into() }
	}

	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.text_element("t:Body", [("BodyType", self.body_type.as_str())], &self.content)?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Categories {
	#[serde(rename = "String", default)]
	pub names: Vec<String>,
}
impl Categories {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { names: names.into_iter().map(Into::into).collect() }
	}

	fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:Categories", [])?;

		for name in &self.names {
			writer.leaf("t:String", name)?;
		}

		writer.end("t:Categories")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct InternetMessageHeaders {
	#[serde(rename = "InternetMessageHeader", default)]
	pub headers: Vec<InternetMessageHeader>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InternetMessageHeader {
	#[serde(rename = "@HeaderName")]
	pub name: String,
	#[serde(rename = "$text", default)]
	pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Message {
	#[serde(rename = "ItemId", default)]
	pub item_id: Option<ItemId>,
	#[serde(rename = "ParentFolderId", default)]
	pub parent_folder_id: Option<ItemId>,
	#[serde(rename = "ItemClass", default)]
	pub item_class: Option<String>,
	#[serde(rename = "Subject", default)]
	pub subject: Option<String>,
	#[serde(rename = "Sensitivity", default)]
	pub sensitivity: Option<String>,
	#[serde(rename = "Body", default)]
	pub body: Option<Body>,
	#[serde(rename = "Attachments", default)]
	pub attachments: Option<Attachments>,
	#[serde(rename = "DateTimeReceived", default, with = "ews_domain::time_serde::option")]
	pub date_time_received: Option<OffsetDateTime>,
	#[serde(rename = "Size", default)]
	pub size: Option<u64>,
	#[serde(rename = "Categories", default)]
	pub categories: Option<Categories>,
	#[serde(rename = "Importance", default)]
	pub importance: Option<String>,
	#[serde(rename = "IsSubmitted", default)]
	pub is_submitted: Option<bool>,
	#[serde(rename = "IsDraft", default)]
	pub is_draft: Option<bool>,
	#[serde(rename = "IsFromMe", default)]
	pub is_from_me: Option<bool>,
	#[serde(rename = "InternetMessageHeaders", default)]
	pub internet_message_headers: Option<InternetMessageHeaders>,
	#[serde(rename = "DateTimeSent", default, with = "ews_domain::time_serde::option")]
	pub date_time_sent: Option<OffsetDateTime>,
	#[serde(rename = "DateTimeCreated", default, with = "ews_domain::time_serde::option")]
	pub date_time_created: Option<OffsetDateTime>,
	#[serde(rename = "DisplayCc", default)]
	pub display_cc: Option<String>,
	#[serde(rename = "DisplayTo", default)]
	pub display_to: Option<String>,
	#[serde(rename = "HasAttachments", default)]
	pub has_attachments: Option<bool>,
	#[serde(rename = "ExtendedProperty", default)]
	pub extended_properties: Vec<ExtendedProperty>,
	#[serde(rename = "LastModifiedTime", default, with = "ews_domain::time_serde::option")]
	pub last_modified_time: Option<OffsetDateTime>,
	#[serde(rename = "IsAssociated", default)]
	pub is_associated: Option<bool>,
	#[serde(rename = "Sender", default)]
	pub sender: Option<SingleRecipient>,
	#[serde(rename = "ToRecipients", default)]
	pub to_recipients: Option<Recipients>,
	#[serde(rename = "CcRecipients", default)]
	pub cc_recipients: Option<Recipients>,
	#[serde(rename = "BccRecipients", default)]
	pub bcc_recipients: Option<Recipients>,
	#[serde(rename = "IsReadReceiptRequested", default)]
	pub is_read_receipt_requested: Option<bool>,
	#[serde(rename = "ConversationTopic", default)]
	pub conversation_topic: Option<String>,
	#[serde(rename = "From", default)]
	pub from: Option<SingleRecipient>,
	#[serde(rename = "InternetMessageId", default)]
	pub internet_message_id: Option<String>,
	#[serde(rename = "IsRead", default)]
	pub is_read: Option<bool>,
}
impl Message {
	/// Header value by name, compared case-insensitively. The first occurrence wins.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers()
			.find(|(header, _)| header.eq_ignore_ascii_case(name))
			.map(|(_, value)| value)
	}

	pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
		self.internet_message_headers
			.iter()
			.flat_map(|headers| headers.headers.iter())
			.map(|header| (header.name.as_str(), header.value.as_str()))
	}

	pub fn category_names(&self) -> &[String] {
		self.categories.as_ref().map(|categories| categories.names.as_slice()).unwrap_or(&[])
	}

	/// Writes the settable fields in schema order. Read-only fields are skipped.
	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:Message", [])?;
		writer.leaf_opt("t:ItemClass", self.item_class.as_deref())?;
		writer.leaf_opt("t:Subject", self.subject.as_deref())?;
		writer.leaf_opt("t:Sensitivity", self.sensitivity.as_deref())?;

		if let Some(body) = &self.body {
			body.write(writer)?;
		}
		if let Some(attachments) = &self.attachments {
			attachments.write(writer)?;
		}
		if let Some(categories) = &self.categories {
			categories.write(writer)?;
		}

		writer.leaf_opt("t:Importance", self.importance.as_deref())?;

		for property in &self.extended_properties {
			property.write(writer)?;
		}

		if let Some(sender) = &self.sender {
			sender.write(writer, "t:Sender")?;
		}

		for (name, recipients) in [
			("t:ToRecipients", &self.to_recipients),
			("t:CcRecipients", &self.cc_recipients),
			("t:BccRecipients", &self.bcc_recipients),
		] {
			if let Some(recipients) = recipients {
				recipients.write(writer, name)?;
			}
		}

		writer.leaf_bool("t:IsReadReceiptRequested", self.is_read_receipt_requested)?;

		if let Some(from) = &self.from {
			from.write(writer, "t:From")?;
		}

		writer.leaf_bool("t:IsRead", self.is_read)?;
		writer.end("t:Message")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Attendees {
	#[serde(rename = "Attendee", default)]
	pub attendees: Vec<Attendee>,
}
impl Attendees {
	fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		writer.start(name, [])?;

		for attendee in &self.attendees {
			writer.start("t:Attendee", [])?;
			attendee.mailbox.write(writer)?;
			writer.end("t:Attendee")?;
		}

		writer.end(name)?;

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Attendee {
	#[serde(rename = "Mailbox")]
	pub mailbox: Mailbox,
	#[serde(rename = "ResponseType", default)]
	pub response_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CalendarItem {
	#[serde(rename = "ItemId", default)]
	pub item_id: Option<ItemId>,
	#[serde(rename = "ParentFolderId", default)]
	pub parent_folder_id: Option<ItemId>,
	#[serde(rename = "ItemClass", default)]
	pub item_class: Option<String>,
	#[serde(rename = "Subject", default)]
	pub subject: Option<String>,
	#[serde(rename = "Body", default)]
	pub body: Option<Body>,
	#[serde(rename = "Categories", default)]
	pub categories: Option<Categories>,
	#[serde(rename = "ReminderIsSet", default)]
	pub reminder_is_set: Option<bool>,
	#[serde(rename = "ReminderMinutesBeforeStart", default)]
	pub reminder_minutes_before_start: Option<u32>,
	#[serde(rename = "ExtendedProperty", default)]
	pub extended_properties: Vec<ExtendedProperty>,
	#[serde(rename = "Start", default, with = "ews_domain::time_serde::option")]
	pub start: Option<OffsetDateTime>,
	#[serde(rename = "End", default, with = "ews_domain::time_serde::option")]
	pub end: Option<OffsetDateTime>,
	#[serde(rename = "IsAllDayEvent", default)]
	pub is_all_day_event: Option<bool>,
	#[serde(rename = "LegacyFreeBusyStatus", default)]
	pub legacy_free_busy_status: Option<String>,
	#[serde(rename = "Location", default)]
	pub location: Option<String>,
	#[serde(rename = "RequiredAttendees", default)]
	pub required_attendees: Option<Attendees>,
	#[serde(rename = "OptionalAttendees", default)]
	pub optional_attendees: Option<Attendees>,
}
impl CalendarItem {
	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:CalendarItem", [])?;
		writer.leaf_opt("t:ItemClass", self.item_class.as_deref())?;
		writer.leaf_opt("t:Subject", self.subject.as_deref())?;

		if let Some(body) = &self.body {
			body.write(writer)?;
		}
		if let Some(categories) = &self.categories {
			categories.write(writer)?;
		}

		writer.leaf_bool("t:ReminderIsSet", self.reminder_is_set)?;

		if let Some(minutes) = self.reminder_minutes_before_start {
			writer.leaf("t:ReminderMinutesBeforeStart", &minutes.to_string())?;
		}

		for property in &self.extended_properties {
			property.write(writer)?;
		}

		if let Some(start) = self.start {
			writer.leaf("t:Start", &timestamp::format(start)?)?;
		}
		if let Some(end) = self.end {
			writer.leaf("t:End", &timestamp::format(end)?)?;
		}

		writer.leaf_bool("t:IsAllDayEvent", self.is_all_day_event)?;
		writer.leaf_opt("t:LegacyFreeBusyStatus", self.legacy_free_busy_status.as_deref())?;
		writer.leaf_opt("t:Location", self.location.as_deref())?;

		if let Some(attendees) = &self.required_attendees {
			attendees.write(writer, "t:RequiredAttendees")?;
		}
		if let Some(attendees) = &self.optional_attendees {
			attendees.write(writer, "t:OptionalAttendees")?;
		}

		writer.end("t:CalendarItem")?;

		Ok(())
	}
}
