//! Wire types shared by the operations.
//!
//! Deserialization goes through `quick_xml::de`, which matches local names and ignores namespace
//! prefixes. Serialization is written by hand so that element order follows the schema.

pub mod attachment;
pub mod folder;
pub mod item;
pub mod property;
pub mod shape;

pub use attachment::{
	Attachment, AttachmentId, AttachmentShape, Attachments, FileAttachment, ItemAttachment,
};
pub use folder::{FolderId, ItemId, Mailbox, Recipients, SingleRecipient};
pub use item::{
	Attendee, Attendees, Body, BodyType, CalendarItem, Categories, InternetMessageHeader,
	InternetMessageHeaders, Item, Items, Message,
};
pub use property::{
	ExtendedFieldUri, ExtendedProperty, InvalidPropertyTag, MultiValues, PropertyPath,
	PropertyTag, PropertyType,
};
pub use shape::{BaseShape, IndexedPageView, ItemShape, Restriction, Traversal};
