use serde::Deserialize;

use ews_domain::xml::{self, XmlWriter};

/// Entity reference: a stable id plus the change key of the version that was read.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ItemId {
	#[serde(rename = "@Id")]
	pub id: String,
	#[serde(rename = "@ChangeKey", default)]
	pub change_key: Option<String>,
}
impl ItemId {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), change_key: None }
	}

	pub fn with_change_key(mut self, change_key: impl Into<String>) -> Self {
		self.change_key = Some(change_key.into());

		self
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		match self.change_key.as_deref() {
			Some(change_key) =>
				writer.empty(name, [("Id", self.id.as_str()), ("ChangeKey", change_key)]),
			None => writer.empty(name, [("Id", self.id.as_str())]),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FolderId {
	/// Well-known folder such as `inbox`, `drafts`, `sentitems` or `calendar`.
	Distinguished { id: String, mailbox: Option<String> },
	Folder { id: String, change_key: Option<String> },
}
impl FolderId {
	pub fn distinguished(id: impl Into<String>, mailbox: Option<&str>) -> Self {
		Self::Distinguished { id: id.into(), mailbox: mailbox.map(str::to_string) }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		match self {
			Self::Distinguished { id, mailbox: Some(mailbox) } => {
				writer.start("t:DistinguishedFolderId", [("Id", id.as_str())])?;
				writer.start("t:Mailbox", [])?;
				writer.leaf("t:EmailAddress", mailbox)?;
				writer.end("t:Mailbox")?;
				writer.end("t:DistinguishedFolderId")
			},
			Self::Distinguished { id, mailbox: None } =>
				writer.empty("t:DistinguishedFolderId", [("Id", id.as_str())]),
			Self::Folder { id, change_key: Some(change_key) } => writer.empty(
				"t:FolderId",
				[("Id", id.as_str()), ("ChangeKey", change_key.as_str())],
			),
			Self::Folder { id, change_key: None } =>
				writer.empty("t:FolderId", [("Id", id.as_str())]),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Mailbox {
	#[serde(rename = "Name", default)]
	pub name: Option<String>,
	#[serde(rename = "EmailAddress", default)]
	pub email_address: Option<String>,
	#[serde(rename = "RoutingType", default)]
	pub routing_type: Option<String>,
	#[serde(rename = "MailboxType", default)]
	pub mailbox_type: Option<String>,
}
impl Mailbox {
	pub fn address(email_address: impl Into<String>) -> Self {
		Self { email_address: Some(email_address.into()), ..Default::default() }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:Mailbox", [])?;
		writer.leaf_opt("t:Name", self.name.as_deref())?;
		writer.leaf_opt("t:EmailAddress", self.email_address.as_deref())?;
		writer.leaf_opt("t:RoutingType", self.routing_type.as_deref())?;
		writer.leaf_opt("t:MailboxType", self.mailbox_type.as_deref())?;
		writer.end("t:Mailbox")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Recipients {
	#[serde(rename = "Mailbox", default)]
	pub mailboxes: Vec<Mailbox>,
}
impl Recipients {
	pub fn addresses<I, S>(addresses: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { mailboxes: addresses.into_iter().map(Mailbox::address).collect() }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		writer.start(name, [])?;

		for mailbox in &self.mailboxes {
			mailbox.write(writer)?;
		}

		writer.end(name)?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SingleRecipient {
	#[serde(rename = "Mailbox")]
	pub mailbox: Mailbox,
}
impl SingleRecipient {
	pub(crate) fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		writer.start(name, [])?;
		self.mailbox.write(writer)?;
		writer.end(name)?;

		Ok(())
	}
}
