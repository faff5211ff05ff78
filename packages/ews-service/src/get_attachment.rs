use ews_domain::xml::{self, XmlWriter};

use crate::{
	Result,
	envelope::{Operation, ResponseMessage},
	types::{Attachment, AttachmentId, AttachmentShape},
};

/// Fetches attachments by id, content included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetAttachment {
	pub attachment_shape: AttachmentShape,
	pub attachment_ids: Vec<AttachmentId>,
}
impl GetAttachment {
	pub fn new(attachment_ids: Vec<AttachmentId>) -> Self {
		Self { attachment_shape: AttachmentShape::default(), attachment_ids }
	}
}

impl Operation for GetAttachment {
	const NAME: &'static str = "GetAttachment";

	type Output = Vec<Attachment>;

	fn write_body(&self, writer: &mut XmlWriter) -> xml::Result<()> {
		writer.start("m:GetAttachment", [])?;
		self.attachment_shape.write(writer)?;
		writer.start("m:AttachmentIds", [])?;

		for id in &self.attachment_ids {
			id.write(writer)?;
		}

		writer.end("m:AttachmentIds")?;
		writer.end("m:GetAttachment")?;

		Ok(())
	}

	/// One response message per requested id, in request order.
	fn project(&self, messages: Vec<ResponseMessage>) -> Result<Self::Output> {
		Ok(messages
			.into_iter()
			.filter_map(|message| message.attachments)
			.flat_map(|attachments| attachments.attachments)
			.collect())
	}
}
