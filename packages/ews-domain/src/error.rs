#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("Category list is not valid base64.")]
	InvalidBase64(#[from] base64::DecodeError),
	#[error("Category list is not valid UTF-8.")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
	#[error("Category list XML is malformed: {message}")]
	MalformedXml { message: String },
	#[error("Attribute {name} has invalid value {value:?}.")]
	InvalidAttribute { name: &'static str, value: String },
	#[error("Element {element} is missing attribute {name}.")]
	MissingAttribute { element: &'static str, name: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
	#[error("Failed to write XML: {0}")]
	Xml(#[from] quick_xml::Error),
	#[error("Timestamp cannot be written as RFC 3339: {0}")]
	Timestamp(#[from] time::error::Format),
	#[error("Written XML is not valid UTF-8.")]
	InvalidUtf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddError {
	#[error("Category with name {name:?} already exists.")]
	DuplicateName { name: String },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
	#[error("Category with name {name:?} was not found.")]
	NotFound { name: String },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
	#[error("Color {value} is outside the palette range -1..=24.")]
	OutOfRange { value: i32 },
	#[error("Unknown color name {name:?}.")]
	UnknownName { name: String },
}
