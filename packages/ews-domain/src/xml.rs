//! Indented XML writer shared by the category list document and the request envelopes.
//!
//! Elements come out in call order. Attribute values also escape tabs and line breaks as
//! character references, otherwise a conforming reader would fold them into spaces.

use std::borrow::Cow;

use quick_xml::{
	Writer,
	escape::escape,
	events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::Attribute},
	name::QName,
};

use crate::EncodeError;

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

const INDENT_SIZE: usize = 2;

pub struct XmlWriter {
	inner: Writer<Vec<u8>>,
}
impl XmlWriter {
	pub fn new() -> Self {
		Self { inner: Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE) }
	}

	pub fn declaration(&mut self) -> Result<()> {
		self.inner.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

		Ok(())
	}

	pub fn start<'a>(
		&mut self,
		name: &str,
		attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<()> {
		let tag = BytesStart::new(name).with_attributes(attributes(attrs));

		self.inner.write_event(Event::Start(tag))?;

		Ok(())
	}

	pub fn end(&mut self, name: &str) -> Result<()> {
		self.inner.write_event(Event::End(BytesEnd::new(name)))?;

		Ok(())
	}

	pub fn empty<'a>(
		&mut self,
		name: &str,
		attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<()> {
		self.inner.create_element(name).with_attributes(attributes(attrs)).write_empty()?;

		Ok(())
	}

	pub fn text_element<'a>(
		&mut self,
		name: &str,
		attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
		text: &str,
	) -> Result<()> {
		self.inner
			.create_element(name)
			.with_attributes(attributes(attrs))
			.write_text_content(BytesText::new(text))?;

		Ok(())
	}

	/// Writes `<name>text</name>` without attributes.
	pub fn leaf(&mut self, name: &str, text: &str) -> Result<()> {
		self.text_element(name, [], text)
	}

	pub fn leaf_opt(&mut self, name: &str, text: Option<&str>) -> Result<()> {
		match text {
			Some(text) => self.leaf(name, text),
			None => Ok(()),
		}
	}

	pub fn leaf_bool(&mut self, name: &str, value: Option<bool>) -> Result<()> {
		match value {
			Some(value) => self.leaf(name, bool_token(value)),
			None => Ok(()),
		}
	}

	pub fn finish(self) -> Result<String> {
		Ok(String::from_utf8(self.inner.into_inner())?)
	}
}
impl Default for XmlWriter {
	fn default() -> Self {
		Self::new()
	}
}

/// Literal boolean token used by the wire format.
pub fn bool_token(value: bool) -> &'static str {
	if value { "true" } else { "false" }
}

/// Escapes an attribute value, including tabs and line breaks.
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
	let escaped = escape(value);

	if !escaped.contains(['\t', '\n', '\r']) {
		return escaped;
	}

	let mut out = String::with_capacity(escaped.len() + 8);

	for ch in escaped.chars() {
		match ch {
			'\t' => out.push_str("&#x9;"),
			'\n' => out.push_str("&#xA;"),
			'\r' => out.push_str("&#xD;"),
			_ => out.push(ch),
		}
	}

	Cow::Owned(out)
}

fn attributes<'a>(
	attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> impl Iterator<Item = Attribute<'a>> {
	attrs.into_iter().map(|(key, value)| Attribute {
		key: QName(key.as_bytes()),
		value: match escape_attribute(value) {
			Cow::Borrowed(value) => Cow::Borrowed(value.as_bytes()),
			Cow::Owned(value) => Cow::Owned(value.into_bytes()),
		},
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn writes_nested_escaped_elements() {
		let mut writer = XmlWriter::new();

		writer.start("a", [("x", "1 & 2")]).expect("Failed to open a.");
		writer.leaf("b", "<hi>").expect("Failed to write b.");
		writer.empty("c", []).expect("Failed to write c.");
		writer.end("a").expect("Failed to close a.");

		assert_eq!(
			writer.finish().expect("Output should be UTF-8."),
			"<a x=\"1 &amp; 2\">\n  <b>&lt;hi&gt;</b>\n  <c/>\n</a>"
		);
	}

	#[test]
	fn attribute_line_breaks_become_character_references() {
		assert_eq!(escape_attribute("plain"), "plain");
		assert_eq!(escape_attribute("a\r\nb\tc\"d"), "a&#xD;&#xA;b&#x9;c&quot;d");

		let mut writer = XmlWriter::new();

		writer.empty("c", [("name", "x\ny")]).expect("Failed to write c.");

		assert_eq!(writer.finish().expect("Output should be UTF-8."), "<c name=\"x&#xA;y\"/>");
	}
}
