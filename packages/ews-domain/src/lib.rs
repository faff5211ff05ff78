pub mod category_list;
pub mod color;
pub mod time_serde;
pub mod timestamp;
pub mod xml;

mod codec;
mod error;

pub use category_list::{Category, CategoryList};
pub use codec::NAMESPACE;
pub use color::Color;
pub use error::{AddError, DecodeError, DeleteError, EncodeError, ParseColorError};
