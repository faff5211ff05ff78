use ews_domain::xml::{self, XmlWriter};

use crate::types::{BodyType, PropertyPath};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseShape {
	IdOnly,
	Default,
	AllProperties,
}
impl BaseShape {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::IdOnly => "IdOnly",
			Self::Default => "Default",
			Self::AllProperties => "AllProperties",
		}
	}
}

/// Which properties the server returns for each item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemShape {
	pub base_shape: BaseShape,
	pub include_mime_content: Option<bool>,
	pub body_type: Option<BodyType>,
	pub filter_html_content: Option<bool>,
	pub convert_html_code_page_to_utf8: Option<bool>,
	pub additional_properties: Vec<PropertyPath>,
}
impl ItemShape {
	pub fn new(base_shape: BaseShape) -> Self {
		Self {
			base_shape,
			include_mime_content: None,
			body_type: None,
			filter_html_content: None,
			convert_html_code_page_to_utf8: None,
			additional_properties: Vec::new(),
		}
	}

	pub fn with_property(mut self, path: PropertyPath) -> Self {
		self.additional_properties.push(path);

		self
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter, name: &str) -> xml::Result<()> {
		writer.start(name, [])?;
		writer.leaf("t:BaseShape", self.base_shape.as_str())?;
		writer.leaf_bool("t:IncludeMimeContent", self.include_mime_content)?;
		writer.leaf_opt("t:BodyType", self.body_type.map(BodyType::as_str))?;
		writer.leaf_bool("t:FilterHtmlContent", self.filter_html_content)?;
		writer.leaf_bool("t:ConvertHtmlCodePageToUTF8", self.convert_html_code_page_to_utf8)?;
		write_additional_properties(writer, &self.additional_properties)?;
		writer.end(name)?;

		Ok(())
	}
}

impl Default for ItemShape {
	fn default() -> Self {
		Self::new(BaseShape::AllProperties)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
	Shallow,
	Deep,
	SoftDeleted,
	/// Folder-associated items, where configuration items such as the category list live.
	#[default]
	Associated,
}
impl Traversal {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Shallow => "Shallow",
			Self::Deep => "Deep",
			Self::SoftDeleted => "SoftDeleted",
			Self::Associated => "Associated",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Restriction {
	IsEqualTo { path: PropertyPath, value: String },
}
impl Restriction {
	pub fn is_equal_to(path: PropertyPath, value: impl Into<String>) -> Self {
		Self::IsEqualTo { path, value: value.into() }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("m:Restriction", [])?;

		match self {
			Self::IsEqualTo { path, value } => {
				writer.start("t:IsEqualTo", [])?;
				path.write(writer)?;
				writer.start("t:FieldURIOrConstant", [])?;
				writer.empty("t:Constant", [("Value", value.as_str())])?;
				writer.end("t:FieldURIOrConstant")?;
				writer.end("t:IsEqualTo")?;
			},
		}

		writer.end("m:Restriction")?;

		Ok(())
	}
}

/// Offset-based page of a find result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexedPageView {
	pub max_entries_returned: Option<u32>,
	pub offset: u32,
	pub from_end: bool,
}
impl IndexedPageView {
	pub fn first(max_entries_returned: u32) -> Self {
		Self { max_entries_returned: Some(max_entries_returned), offset: 0, from_end: false }
	}

	pub(crate) fn write(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		let max = self.max_entries_returned.map(|max| max.to_string());
		let offset = self.offset.to_string();
		let base_point = if self.from_end { "End" } else { "Beginning" };
		let mut attrs = Vec::new();

		if let Some(max) = max.as_deref() {
			attrs.push(("MaxEntriesReturned", max));
		}

		attrs.push(("Offset", offset.as_str()));
		attrs.push(("BasePoint", base_point));

		writer.empty("m:IndexedPageItemView", attrs)?;

		Ok(())
	}
}

pub(crate) fn write_additional_properties(
	writer: &mut XmlWriter,
	paths: &[PropertyPath],
) -> xml::Result<()> {
	if paths.is_empty() {
		return Ok(());
	}

	writer.start("t:AdditionalProperties", [])?;

	for path in paths {
		path.write(writer)?;
	}

	writer.end("t:AdditionalProperties")?;

	Ok(())
}
