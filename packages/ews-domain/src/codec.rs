use std::str::FromStr;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{Category, CategoryList, Color, DecodeError, EncodeError, timestamp, xml::XmlWriter};

/// Namespace declared on the root element of every encoded list.
pub const NAMESPACE: &str = "CategoryList.xsd";

const ROOT: &str = "categories";
const ENTRY: &str = "category";

impl CategoryList {
	/// Renders the list as an indented XML document with a leading declaration.
	pub fn to_xml(&self) -> Result<String, EncodeError> {
		let mut writer = XmlWriter::new();
		let session = self.last_saved_session.to_string();
		let saved_time = timestamp::format(self.last_saved_time)?;
		let root_attrs = [
			("xmlns", NAMESPACE),
			("default", self.default.as_str()),
			("lastSavedSession", session.as_str()),
			("lastSavedTime", saved_time.as_str()),
		];

		writer.declaration()?;

		if self.categories.is_empty() {
			writer.empty(ROOT, root_attrs)?;

			return writer.finish();
		}

		writer.start(ROOT, root_attrs)?;

		for category in &self.categories {
			write_category(&mut writer, category)?;
		}

		writer.end(ROOT)?;

		writer.finish()
	}

	/// Base64 form stored in the extended property.
	pub fn encode(&self) -> Result<String, EncodeError> {
		Ok(STANDARD.encode(self.to_xml()?))
	}

	pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
		let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
		let bytes = STANDARD.decode(compact.as_bytes())?;
		let text = String::from_utf8(bytes)?;

		Self::from_xml(&text)
	}

	pub fn from_xml(text: &str) -> Result<Self, DecodeError> {
		let text = text.strip_prefix('\u{feff}').unwrap_or(text);
		let RawDocument::Categories(raw) = quick_xml::de::from_str::<RawDocument>(text)
			.map_err(|err| DecodeError::MalformedXml { message: err.to_string() })?;

		raw.into_list()
	}
}

#[derive(Deserialize)]
enum RawDocument {
	#[serde(rename = "categories")]
	Categories(RawCategories),
}

#[derive(Deserialize)]
struct RawCategories {
	#[serde(rename = "@default", default)]
	default: Option<String>,
	#[serde(rename = "@lastSavedSession", default)]
	last_saved_session: Option<String>,
	#[serde(rename = "@lastSavedTime", default)]
	last_saved_time: Option<String>,
	#[serde(rename = "category", default)]
	categories: Vec<RawCategory>,
}
impl RawCategories {
	fn into_list(self) -> Result<CategoryList, DecodeError> {
		let last_saved_time = required(ROOT, "lastSavedTime", self.last_saved_time)?;
		let categories =
			self.categories.into_iter().map(RawCategory::into_category).collect::<Result<_, _>>()?;

		Ok(CategoryList {
			default: self.default.unwrap_or_default(),
			last_saved_session: parse_opt("lastSavedSession", self.last_saved_session)?
				.unwrap_or(0),
			last_saved_time: parse_time("lastSavedTime", &last_saved_time)?,
			categories,
		})
	}
}

#[derive(Deserialize)]
struct RawCategory {
	#[serde(rename = "@name", default)]
	name: Option<String>,
	#[serde(rename = "@color", default)]
	color: Option<String>,
	#[serde(rename = "@keyboardShortcut", default)]
	keyboard_shortcut: Option<String>,
	#[serde(rename = "@usageCount", default)]
	usage_count: Option<String>,
	#[serde(rename = "@lastTimeUsedNotes", default)]
	last_time_used_notes: Option<String>,
	#[serde(rename = "@lastTimeUsedJournal", default)]
	last_time_used_journal: Option<String>,
	#[serde(rename = "@lastTimeUsedContacts", default)]
	last_time_used_contacts: Option<String>,
	#[serde(rename = "@lastTimeUsedTasks", default)]
	last_time_used_tasks: Option<String>,
	#[serde(rename = "@lastTimeUsedCalendar", default)]
	last_time_used_calendar: Option<String>,
	#[serde(rename = "@lastTimeUsedMail", default)]
	last_time_used_mail: Option<String>,
	#[serde(rename = "@lastTimeUsed", default)]
	last_time_used: Option<String>,
	#[serde(rename = "@lastSessionUsed", default)]
	last_session_used: Option<String>,
	#[serde(rename = "@guid", default)]
	guid: Option<String>,
	#[serde(rename = "@renameOnFirstUse", default)]
	rename_on_first_use: Option<String>,
}
impl RawCategory {
	fn into_category(self) -> Result<Category, DecodeError> {
		let name = required(ENTRY, "name", self.name)?;
		let guid = required(ENTRY, "guid", self.guid)?;
		let last_time_used = required(ENTRY, "lastTimeUsed", self.last_time_used)?;
		let color = match self.color {
			Some(raw) => raw
				.trim()
				.parse::<i32>()
				.ok()
				.and_then(|value| Color::try_from(value).ok())
				.ok_or(DecodeError::InvalidAttribute { name: "color", value: raw })?,
			None => Color::None,
		};

		Ok(Category {
			name,
			color,
			keyboard_shortcut: parse_opt("keyboardShortcut", self.keyboard_shortcut)?.unwrap_or(0),
			usage_count: parse_opt("usageCount", self.usage_count)?,
			last_time_used_notes: parse_time_opt("lastTimeUsedNotes", self.last_time_used_notes)?,
			last_time_used_journal: parse_time_opt(
				"lastTimeUsedJournal",
				self.last_time_used_journal,
			)?,
			last_time_used_contacts: parse_time_opt(
				"lastTimeUsedContacts",
				self.last_time_used_contacts,
			)?,
			last_time_used_tasks: parse_time_opt("lastTimeUsedTasks", self.last_time_used_tasks)?,
			last_time_used_calendar: parse_time_opt(
				"lastTimeUsedCalendar",
				self.last_time_used_calendar,
			)?,
			last_time_used_mail: parse_time_opt("lastTimeUsedMail", self.last_time_used_mail)?,
			last_time_used: parse_time("lastTimeUsed", &last_time_used)?,
			last_session_used: parse_opt("lastSessionUsed", self.last_session_used)?.unwrap_or(0),
			guid,
			rename_on_first_use: parse_opt("renameOnFirstUse", self.rename_on_first_use)?,
		})
	}
}

fn write_category(writer: &mut XmlWriter, category: &Category) -> Result<(), EncodeError> {
	let mut attrs: Vec<(&str, String)> = vec![
		("name", category.name.clone()),
		("color", category.color.value().to_string()),
		("keyboardShortcut", category.keyboard_shortcut.to_string()),
	];

	if let Some(count) = category.usage_count {
		attrs.push(("usageCount", count.to_string()));
	}

	for (name, value) in [
		("lastTimeUsedNotes", category.last_time_used_notes),
		("lastTimeUsedJournal", category.last_time_used_journal),
		("lastTimeUsedContacts", category.last_time_used_contacts),
		("lastTimeUsedTasks", category.last_time_used_tasks),
		("lastTimeUsedCalendar", category.last_time_used_calendar),
		("lastTimeUsedMail", category.last_time_used_mail),
	] {
		if let Some(value) = value {
			attrs.push((name, timestamp::format(value)?));
		}
	}

	attrs.push(("lastTimeUsed", timestamp::format(category.last_time_used)?));
	attrs.push(("lastSessionUsed", category.last_session_used.to_string()));
	attrs.push(("guid", category.guid.clone()));

	if let Some(flag) = category.rename_on_first_use {
		attrs.push(("renameOnFirstUse", flag.to_string()));
	}

	writer.empty(ENTRY, attrs.iter().map(|(name, value)| (*name, value.as_str())))
}

fn required(
	element: &'static str,
	name: &'static str,
	value: Option<String>,
) -> Result<String, DecodeError> {
	value.ok_or(DecodeError::MissingAttribute { element, name })
}

fn parse_opt<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, DecodeError>
where
	T: FromStr,
{
	raw.map(|value| {
		value.trim().parse::<T>().map_err(|_| DecodeError::InvalidAttribute { name, value })
	})
	.transpose()
}

fn parse_time(name: &'static str, raw: &str) -> Result<OffsetDateTime, DecodeError> {
	timestamp::parse(raw)
		.map_err(|_| DecodeError::InvalidAttribute { name, value: raw.to_string() })
}

fn parse_time_opt(
	name: &'static str,
	raw: Option<String>,
) -> Result<Option<OffsetDateTime>, DecodeError> {
	raw.map(|value| parse_time(name, &value)).transpose()
}
