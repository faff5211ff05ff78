use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{AddError, Color, DeleteError};

/// Master category list of a mailbox.
///
/// Categories keep insertion order, which is the display order clients use. Every successful
/// mutation bumps `last_saved_session` by one and refreshes `last_saved_time`; a failed mutation
/// leaves the list untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryList {
	pub default: String,
	pub last_saved_session: i64,
	#[serde(with = "crate::time_serde")]
	pub last_saved_time: OffsetDateTime,
	pub categories: Vec<Category>,
}
impl CategoryList {
	pub fn new(now: OffsetDateTime) -> Self {
		Self {
			default: String::new(),
			last_saved_session: 0,
			last_saved_time: now,
			categories: Vec::new(),
		}
	}

	pub fn get(&self, name: &str) -> Option<&Category> {
		self.categories.iter().find(|category| category.name == name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.categories.is_empty()
	}

	pub fn add_category(&mut self, name: &str, color: Color) -> Result<&Category, AddError> {
		self.add_category_at(name, color, OffsetDateTime::now_utc())
	}

	pub fn add_category_at(
		&mut self,
		name: &str,
		color: Color,
		now: OffsetDateTime,
	) -> Result<&Category, AddError> {
		if self.contains(name) {
			return Err(AddError::DuplicateName { name: name.to_string() });
		}

		let session = self.last_saved_session + 1;

		self.categories.push(Category::new(name, color, session, now));
		self.touch(now);

		let added = self.categories.len() - 1;

		Ok(&self.categories[added])
	}

	pub fn delete_category(&mut self, name: &str) -> Result<Category, DeleteError> {
		self.delete_category_at(name, OffsetDateTime::now_utc())
	}

	pub fn delete_category_at(
		&mut self,
		name: &str,
		now: OffsetDateTime,
	) -> Result<Category, DeleteError> {
		let Some(index) = self.categories.iter().position(|category| category.name == name) else {
			return Err(DeleteError::NotFound { name: name.to_string() });
		};
		let removed = self.categories.remove(index);

		self.touch(now);

		Ok(removed)
	}

	fn touch(&mut self, now: OffsetDateTime) {
		self.last_saved_session += 1;
		self.last_saved_time = now;
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub name: String,
	pub color: Color,
	/// Zero means no shortcut is assigned.
	pub keyboard_shortcut: u32,
	pub usage_count: Option<u32>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_notes: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_journal: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_contacts: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_tasks: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_calendar: Option<OffsetDateTime>,
	#[serde(default, with = "crate::time_serde::option")]
	pub last_time_used_mail: Option<OffsetDateTime>,
	#[serde(with = "crate::time_serde")]
	pub last_time_used: OffsetDateTime,
	pub last_session_used: i64,
	/// Braced identifier, assigned once at creation.
	pub guid: String,
	pub rename_on_first_use: Option<i32>,
}
impl Category {
	fn new(name: &str, color: Color, session: i64, now: OffsetDateTime) -> Self {
		Self {
			name: name.to_string(),
			color,
			keyboard_shortcut: 0,
			usage_count: None,
			last_time_used_notes: None,
			last_time_used_journal: None,
			last_time_used_contacts: None,
			last_time_used_tasks: None,
			last_time_used_calendar: None,
			last_time_used_mail: None,
			last_time_used: now,
			last_session_used: session,
			guid: new_guid(),
			rename_on_first_use: None,
		}
	}
}

fn new_guid() -> String {
	format!("{{{}}}", Uuid::new_v4().hyphenated().to_string().to_uppercase())
}
