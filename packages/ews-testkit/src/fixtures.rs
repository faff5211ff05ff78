//! Response documents shaped the way an Exchange server sends them.
//!
//! Values are inserted verbatim, so callers pass text that needs no escaping.

pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const MESSAGES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";
pub const TYPES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/types";

/// Wraps `body` in a response envelope with a server version header.
pub fn envelope(body: &str) -> String {
	format!(
		r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="{SOAP_NS}">
  <s:Header>
    <h:ServerVersionInfo MajorVersion="15" MinorVersion="1" MajorBuildNumber="2507" MinorBuildNumber="39" Version="V2017_07_11" xmlns:h="{TYPES_NS}"/>
  </s:Header>
  <s:Body xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
{body}
  </s:Body>
</s:Envelope>"#
	)
}

/// Full response document for `operation` (such as `GetItem`) carrying `messages`.
pub fn response(operation: &str, messages: &[String]) -> String {
	envelope(&format!(
		r#"<m:{operation}Response xmlns:m="{MESSAGES_NS}" xmlns:t="{TYPES_NS}">
<m:ResponseMessages>
{}
</m:ResponseMessages>
</m:{operation}Response>"#,
		messages.concat()
	))
}

pub fn success_message(operation: &str, payload: &str) -> String {
	format!(
		r#"<m:{operation}ResponseMessage ResponseClass="Success">
<m:ResponseCode>NoError</m:ResponseCode>
{payload}
</m:{operation}ResponseMessage>"#
	)
}

pub fn warning_message(operation: &str, code: &str, text: &str, payload: &str) -> String {
	format!(
		r#"<m:{operation}ResponseMessage ResponseClass="Warning">
<m:MessageText>{text}</m:MessageText>
<m:ResponseCode>{code}</m:ResponseCode>
<m:DescriptiveLinkKey>0</m:DescriptiveLinkKey>
{payload}
</m:{operation}ResponseMessage>"#
	)
}

pub fn error_message(operation: &str, code: &str, text: &str) -> String {
	format!(
		r#"<m:{operation}ResponseMessage ResponseClass="Error">
<m:MessageText>{text}</m:MessageText>
<m:ResponseCode>{code}</m:ResponseCode>
<m:DescriptiveLinkKey>0</m:DescriptiveLinkKey>
<m:Items/>
</m:{operation}ResponseMessage>"#
	)
}

/// `<m:Items>` holding the given item elements.
pub fn items(inner: &[String]) -> String {
	format!("<m:Items>\n{}\n</m:Items>", inner.concat())
}

/// `<m:RootFolder>` as returned by FindItem.
pub fn root_folder(inner: &[String]) -> String {
	format!(
		r#"<m:RootFolder TotalItemsInView="{}" IncludesLastItemInRange="true">
<t:Items>
{}
</t:Items>
</m:RootFolder>"#,
		inner.len(),
		inner.concat()
	)
}

pub fn message_item(id: &str, change_key: &str, inner: &str) -> String {
	format!(
		r#"<t:Message>
<t:ItemId Id="{id}" ChangeKey="{change_key}"/>
{inner}
</t:Message>"#
	)
}

pub fn calendar_item(id: &str, change_key: &str, inner: &str) -> String {
	format!(
		r#"<t:CalendarItem>
<t:ItemId Id="{id}" ChangeKey="{change_key}"/>
{inner}
</t:CalendarItem>"#
	)
}

pub fn extended_property(tag: &str, property_type: &str, value: &str) -> String {
	format!(
		r#"<t:ExtendedProperty>
<t:ExtendedFieldURI PropertyTag="{tag}" PropertyType="{property_type}"/>
<t:Value>{value}</t:Value>
</t:ExtendedProperty>"#
	)
}

pub fn file_attachment(id: &str, name: &str, content_type: &str, base64: &str) -> String {
	format!(
		r#"<t:FileAttachment>
<t:AttachmentId Id="{id}"/>
<t:Name>{name}</t:Name>
<t:ContentType>{content_type}</t:ContentType>
<t:Content>{base64}</t:Content>
</t:FileAttachment>"#
	)
}

/// SOAP fault as sent with HTTP 500 for schema and authorization failures.
pub fn soap_fault(code: &str, text: &str) -> String {
	envelope(&format!(
		r#"<s:Fault>
<faultcode xmlns:a="http://schemas.microsoft.com/exchange/services/2006/types">a:{code}</faultcode>
<faultstring xml:lang="en-US">{text}</faultstring>
<detail>
<e:ResponseCode xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">{code}</e:ResponseCode>
<e:Message xmlns:e="http://schemas.microsoft.com/exchange/services/2006/errors">{text}</e:Message>
<t:MessageXml xmlns:t="{TYPES_NS}">
<t:Value Name="InnerErrorMessageText">{text}</t:Value>
<t:Value Name="InnerErrorResponseCode">{code}</t:Value>
</t:MessageXml>
</detail>
</s:Fault>"#
	))
}
