use std::{fmt, str::FromStr};

use serde::Deserialize;

use ews_domain::xml::{self, XmlWriter};

/// MAPI property tag. Tags compare numerically, so `0x7c08`, `0x7C08` and `31752` are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct PropertyTag(pub u16);
impl PropertyTag {
	/// Master category list blob on the calendar configuration item.
	pub const CATEGORIES: Self = Self(0x7c08);
	pub const INTERNET_MESSAGE_ID: Self = Self(0x1035);
}

impl FromStr for PropertyTag {
	type Err = InvalidPropertyTag;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let trimmed = raw.trim();
		let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
			Some(hex) => u16::from_str_radix(hex, 16),
			None => trimmed.parse::<u16>(),
		};

		parsed.map(Self).map_err(|_| InvalidPropertyTag { value: raw.to_string() })
	}
}

impl TryFrom<String> for PropertyTag {
	type Error = InvalidPropertyTag;

	fn try_from(raw: String) -> Result<Self, Self::Error> {
		raw.parse()
	}
}

impl fmt::Display for PropertyTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:04x}", self.0)
	}
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Property tag {value:?} is not a 16-bit hex or decimal number.")]
pub struct InvalidPropertyTag {
	pub value: String,
}

/// Declared type of an extended property. Unknown names are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum PropertyType {
	Binary,
	String,
	Integer,
	Boolean,
	DateTime,
	Double,
	Single,
	Other(String),
}
impl PropertyType {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Binary => "Binary",
			Self::String => "String",
			Self::Integer => "Integer",
			Self::Boolean => "Boolean",
			Self::DateTime => "SystemTime",
			Self::Double => "Double",
			Self::Single => "Float",
			Self::Other(name) => name,
		}
	}
}

impl From<String> for PropertyType {
	fn from(raw: String) -> Self {
		match raw.as_str() {
			"Binary" => Self::Binary,
			"String" => Self::String,
			"Integer" => Self::Integer,
			"Boolean" => Self::Boolean,
			"SystemTime" | "DateTime" => Self::DateTime,
			"Double" => Self::Double,
			"Float" | "Single" => Self::Single,
			_ => Self::Other(raw),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExtendedFieldUri {
	#[serde(rename = "@PropertyTag", default)]
	pub property_tag: Option<PropertyTag>,
	#[serde(rename = "@PropertyType")]
	pub property_type: PropertyType,
	#[serde(rename = "@DistinguishedPropertySetId", default)]
	pub distinguished_property_set_id: Option<String>,
	#[serde(rename = "@PropertySetId", default)]
	pub property_set_id: Option<String>,
	#[serde(rename = "@PropertyName", default)]
	pub property_name: Option<String>,
	#[serde(rename = "@PropertyId", default)]
	pub property_id: Option<i32>,
}
impl ExtendedFieldUri {
	pub fn tagged(tag: PropertyTag, property_type: PropertyType) -> Self {
		Self {
			property_tag: Some(tag),
			property_type,
			distinguished_property_set_id: None,
			property_set_id: None,
			property_name: None,
			property_id: None,
		}
	}

	/// Both the tag and the declared type have to agree.
	pub fn matches(&self, tag: PropertyTag, property_type: &PropertyType) -> bool {
		self.property_tag == Some(tag) && &self.property_type == property_type
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		let tag = self.property_tag.map(|tag| tag.to_string());
		let id = self.property_id.map(|id| id.to_string());
		let mut attrs = Vec::new();

		if let Some(set) = self.distinguished_property_set_id.as_deref() {
			attrs.push(("DistinguishedPropertySetId", set));
		}
		if let Some(set) = self.property_set_id.as_deref() {
			attrs.push(("PropertySetId", set));
		}
		if let Some(tag) = tag.as_deref() {
			attrs.push(("PropertyTag", tag));
		}
		if let Some(name) = self.property_name.as_deref() {
			attrs.push(("PropertyName", name));
		}
		if let Some(id) = id.as_deref() {
			attrs.push(("PropertyId", id));
		}

		attrs.push(("PropertyType", self.property_type.as_str()));

		writer.empty("t:ExtendedFieldURI", attrs)?;

		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExtendedProperty {
	#[serde(rename = "ExtendedFieldURI")]
	pub uri: ExtendedFieldUri,
	#[serde(rename = "Value", default)]
	pub value: Option<String>,
	#[serde(rename = "Values", default)]
	pub values: Option<MultiValues>,
}
impl ExtendedProperty {
	pub fn new(uri: ExtendedFieldUri, value: impl Into<String>) -> Self {
		Self { uri, value: Some(value.into()), values: None }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("t:ExtendedProperty", [])?;
		self.uri.write(writer)?;

		if let Some(value) = self.value.as_deref() {
			writer.leaf("t:Value", value)?;
		}
		if let Some(values) = &self.values {
			writer.start("t:Values", [])?;

			for value in &values.values {
				writer.leaf("t:Value", value)?;
			}

			writer.end("t:Values")?;
		}

		writer.end("t:ExtendedProperty")?;

		Ok(())
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MultiValues {
	#[serde(rename = "Value", default)]
	pub values: Vec<String>,
}

/// Selector for one property, used by shapes, restrictions and updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyPath {
	/// Schema field such as `item:Subject`.
	Field(String),
	Extended(ExtendedFieldUri),
}
impl PropertyPath {
	pub fn field(uri: impl Into<String>) -> Self {
		Self::Field(uri.into())
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		match self {
			Self::Field(uri) => writer.empty("t:FieldURI", [("FieldURI", uri.as_str())]),
			Self::Extended(uri) => uri.write(writer),
		}
	}
}
