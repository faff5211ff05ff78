//! Request envelope rendering and response classification shared by every operation.

use serde::Deserialize;

use ews_domain::xml::{self, XmlWriter};

use crate::{
	Error, Result,
	types::{Attachments, Items},
};

pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const MESSAGES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";
pub const TYPES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/types";

/// One request/response pair of the protocol.
///
/// An operation renders its own body element and projects the classified response messages into
/// its output. Everything around those two steps is shared.
pub trait Operation
where
	Self: Send + Sync,
{
	/// Local name of the request element, such as `GetItem`.
	const NAME: &'static str;

	type Output;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()>;

	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum ResponseClass {
	Success,
	Warning,
	Error,
}

/// One `*ResponseMessage` element of a response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ResponseMessage {
	#[serde(rename = "@ResponseClass")]
	pub response_class: ResponseClass,
	#[serde(rename = "MessageText", default)]
	pub message_text: Option<String>,
	#[serde(rename = "ResponseCode", default)]
	pub response_code: Option<String>,
	#[serde(rename = "DescriptiveLinkKey", default)]
	pub descriptive_link_key: Option<i64>,
	#[serde(rename = "MessageXml", default)]
	pub message_xml: Option<MessageXml>,
	#[serde(rename = "Items", default)]
	pub items: Option<Items>,
	#[serde(rename = "RootFolder", default)]
	pub root_folder: Option<RootFolder>,
	#[serde(rename = "Attachments", default)]
	pub attachments: Option<Attachments>,
}
impl ResponseMessage {
	pub fn code(&self) -> Option<&str> {
		self.response_code
			.as_deref()
			.or_else(|| self.message_xml.as_ref().and_then(|xml| xml.exception_code.as_deref()))
	}

	pub fn text(&self) -> Option<&str> {
		self.message_text
			.as_deref()
			.or_else(|| self.message_xml.as_ref().and_then(|xml| xml.exception_message.as_deref()))
	}

	/// Items of the payload, whichever slot carries them.
	pub fn into_items(self) -> Items {
		self.items
			.or_else(|| self.root_folder.and_then(|root| root.items))
			.unwrap_or_default()
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RootFolder {
	#[serde(rename = "@TotalItemsInView", default)]
	pub total_items_in_view: Option<u32>,
	#[serde(rename = "@IncludesLastItemInRange", default)]
	pub includes_last_item_in_range: Option<bool>,
	#[serde(rename = "@IndexedPagingOffset", default)]
	pub indexed_paging_offset: Option<u32>,
	#[serde(rename = "Items", default)]
	pub items: Option<Items>,
}

/// Fault detail as sent by the server. Both the named-children form and the `Value` list form
/// are accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MessageXml {
	#[serde(rename = "ExceptionType", default)]
	pub exception_type: Option<String>,
	#[serde(rename = "ExceptionCode", default)]
	pub exception_code: Option<String>,
	#[serde(rename = "ExceptionServerName", default)]
	pub exception_server_name: Option<String>,
	#[serde(rename = "ExceptionMessage", default)]
	pub exception_message: Option<String>,
	#[serde(rename = "Value", default)]
	pub values: Vec<MessageXmlValue>,
}
impl MessageXml {
	pub fn value(&self, name: &str) -> Option<&str> {
		self.values.iter().find(|value| value.name == name).map(|value| value.text.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageXmlValue {
	#[serde(rename = "@Name")]
	pub name: String,
	#[serde(rename = "$text", default)]
	pub text: String,
}

/// Structured detail attached to a server error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaultDetail {
	pub exception_type: Option<String>,
	pub exception_code: Option<String>,
	pub exception_server_name: Option<String>,
	pub exception_message: Option<String>,
}
impl From<MessageXml> for FaultDetail {
	fn from(xml: MessageXml) -> Self {
		let pick = |named: Option<String>, key: &str| {
			named.or_else(|| xml.value(key).map(str::to_string))
		};

		Self {
			exception_type: pick(xml.exception_type.clone(), "ExceptionType"),
			exception_code: pick(xml.exception_code.clone(), "ExceptionCode"),
			exception_server_name: pick(xml.exception_server_name.clone(), "ExceptionServerName"),
			exception_message: pick(xml.exception_message.clone(), "InnerErrorMessageText"),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServerVersionInfo {
	#[serde(rename = "@MajorVersion", default)]
	pub major_version: Option<u32>,
	#[serde(rename = "@MinorVersion", default)]
	pub minor_version: Option<u32>,
	#[serde(rename = "@MajorBuildNumber", default)]
	pub major_build_number: Option<u32>,
	#[serde(rename = "@MinorBuildNumber", default)]
	pub minor_build_number: Option<u32>,
	#[serde(rename = "@Version", default)]
	pub version: Option<String>,
}

/// Decoded response before classification.
#[derive(Debug)]
pub struct Response {
	pub server_version: Option<ServerVersionInfo>,
	pub operation: &'static str,
	pub messages: Vec<ResponseMessage>,
}

#[derive(Deserialize)]
struct RawEnvelope {
	#[serde(rename = "Header", default)]
	header: Option<RawHeader>,
	#[serde(rename = "Body")]
	body: RawBody,
}

#[derive(Deserialize)]
struct RawHeader {
	#[serde(rename = "ServerVersionInfo", default)]
	server_version_info: Option<ServerVersionInfo>,
}

#[derive(Deserialize)]
struct RawBody {
	#[serde(rename = "$value")]
	content: BodyContent,
}

#[derive(Deserialize)]
enum BodyContent {
	Fault(SoapFault),
	GetItemResponse(OperationResponse),
	FindItemResponse(OperationResponse),
	CreateItemResponse(OperationResponse),
	UpdateItemResponse(OperationResponse),
	SendItemResponse(OperationResponse),
	GetAttachmentResponse(OperationResponse),
}

#[derive(Deserialize)]
struct OperationResponse {
	#[serde(rename = "ResponseMessages")]
	response_messages: ResponseMessages,
}

#[derive(Deserialize)]
struct ResponseMessages {
	#[serde(rename = "$value", default)]
	messages: Vec<ResponseMessageElement>,
}

#[derive(Deserialize)]
enum ResponseMessageElement {
	GetItemResponseMessage(ResponseMessage),
	FindItemResponseMessage(ResponseMessage),
	CreateItemResponseMessage(ResponseMessage),
	UpdateItemResponseMessage(ResponseMessage),
	SendItemResponseMessage(ResponseMessage),
	GetAttachmentResponseMessage(ResponseMessage),
}
impl ResponseMessageElement {
	fn into_inner(self) -> ResponseMessage {
		match self {
			Self::GetItemResponseMessage(message)
			| Self::FindItemResponseMessage(message)
			| Self::CreateItemResponseMessage(message)
			| Self::UpdateItemResponseMessage(message)
			| Self::SendItemResponseMessage(message)
			| Self::GetAttachmentResponseMessage(message) => message,
		}
	}
}

#[derive(Deserialize)]
struct SoapFault {
	#[serde(rename = "faultcode", default)]
	fault_code: Option<String>,
	#[serde(rename = "faultstring", default)]
	fault_string: Option<FaultString>,
	#[serde(rename = "detail", default)]
	detail: Option<SoapFaultDetail>,
}

#[derive(Deserialize)]
struct FaultString {
	#[serde(rename = "$text", default)]
	text: String,
}

#[derive(Deserialize)]
struct SoapFaultDetail {
	#[serde(rename = "ResponseCode", default)]
	response_code: Option<String>,
	#[serde(rename = "Message", default)]
	message: Option<String>,
	#[serde(rename = "MessageXml", default)]
	message_xml: Option<MessageXml>,
}

/// Renders a complete request document for `op`.
pub fn to_xml_document<O>(op: &O, version: &str) -> Result<String>
where
	O: Operation,
{
	let mut writer = XmlWriter::new();

	writer.declaration()?;
	writer.start(
		"soap:Envelope",
		[("xmlns:soap", SOAP_NS), ("xmlns:m", MESSAGES_NS), ("xmlns:t", TYPES_NS)],
	)?;
	writer.start("soap:Header", [])?;
	writer.empty("t:RequestServerVersion", [("Version", version)])?;
	writer.end("soap:Header")?;
	writer.start("soap:Body", [])?;
	op.write_body(&mut writer)?;
	writer.end("soap:Body")?;
	writer.end("soap:Envelope")?;

	Ok(writer.finish()?)
}

/// Decodes a response document. A SOAP fault becomes [`Error::Server`].
pub fn parse_response(body: &str) -> Result<Response> {
	let envelope: RawEnvelope = quick_xml::de::from_str(body.trim_start_matches('\u{feff}'))
		.map_err(|err| Error::MalformedResponse {
			message: format!("Response envelope could not be parsed: {err}."),
		})?;
	let server_version = envelope.header.and_then(|header| header.server_version_info);
	let (operation, response) = match envelope.body.content {
		BodyContent::Fault(fault) => return Err(fault_error(fault)),
		BodyContent::GetItemResponse(response) => ("GetItem", response),
		BodyContent::FindItemResponse(response) => ("FindItem", response),
		BodyContent::CreateItemResponse(response) => ("CreateItem", response),
		BodyContent::UpdateItemResponse(response) => ("UpdateItem", response),
		BodyContent::SendItemResponse(response) => ("SendItem", response),
		BodyContent::GetAttachmentResponse(response) => ("GetAttachment", response),
	};
	let messages = response
		.response_messages
		.messages
		.into_iter()
		.map(ResponseMessageElement::into_inner)
		.collect();

	Ok(Response { server_version, operation, messages })
}

/// Fails on the first `Error` message. `Warning` messages pass through with their payload.
pub fn classify(operation: &str, messages: Vec<ResponseMessage>) -> Result<Vec<ResponseMessage>> {
	for message in &messages {
		match message.response_class {
			ResponseClass::Success => {},
			ResponseClass::Warning => {
				tracing::warn!(
					operation,
					code = message.code().unwrap_or_default(),
					message = message.text().unwrap_or_default(),
					"Server returned a warning."
				);
			},
			ResponseClass::Error => {
				let code = message.code().unwrap_or("ErrorUnknown").to_string();
				let text = message.text().map(str::to_string).unwrap_or_else(|| code.clone());

				return Err(Error::Server {
					code,
					message: text,
					fault: message.message_xml.clone().map(FaultDetail::from),
				});
			},
		}
	}

	Ok(messages)
}

/// Returns the single element of `values`.
pub fn exactly_one<T>(values: Vec<T>) -> Result<T> {
	let actual = values.len();
	let mut values = values.into_iter();

	match (values.next(), values.next()) {
		(Some(value), None) => Ok(value),
		_ => Err(Error::CardinalityMismatch { expected: 1, actual }),
	}
}

fn fault_error(fault: SoapFault) -> Error {
	let detail = fault.detail;
	let code = detail
		.as_ref()
		.and_then(|detail| detail.response_code.clone())
		.or(fault.fault_code)
		.unwrap_or_else(|| "ErrorUnknown".to_string());
	let message = fault
		.fault_string
		.map(|text| text.text)
		.filter(|text| !text.is_empty())
		.or_else(|| detail.as_ref().and_then(|detail| detail.message.clone()))
		.unwrap_or_else(|| code.clone());

	Error::Server {
		code,
		message,
		fault: detail.and_then(|detail| detail.message_xml).map(FaultDetail::from),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fault_detail_reads_value_form() {
		let xml = MessageXml {
			values: vec![MessageXmlValue {
				name: "InnerErrorMessageText".to_string(),
				text: "Boom.".to_string(),
			}],
			..Default::default()
		};
		let detail = FaultDetail::from(xml);

		assert_eq!(detail.exception_message.as_deref(), Some("Boom."));
		assert_eq!(detail.exception_code, None);
	}

	#[test]
	fn exactly_one_reports_actual_count() {
		assert_eq!(exactly_one(vec![7]).ok(), Some(7));
		assert!(matches!(
			exactly_one(vec![1, 2, 3]),
			Err(Error::CardinalityMismatch { expected: 1, actual: 3 })
		));
		assert!(matches!(
			exactly_one(Vec::<u8>::new()),
			Err(Error::CardinalityMismatch { expected: 1, actual: 0 })
		));
	}
}
