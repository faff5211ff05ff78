pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let text =
		crate::timestamp::format(*value).map_err(<S::Error as serde::ser::Error>::custom)?;

	serializer.serialize_str(&text)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	crate::timestamp::parse(&raw).map_err(serde::de::Error::custom)
}
