use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseColorError;

/// Palette entry of a category. `None` is the explicit "no color" sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum Color {
	None = -1,
	Red = 0,
	Orange = 1,
	Peach = 2,
	Yellow = 3,
	Green = 4,
	Teal = 5,
	Olive = 6,
	Blue = 7,
	Purple = 8,
	Maroon = 9,
	Steel = 10,
	DarkSteel = 11,
	Gray = 12,
	DarkGray = 13,
	Black = 14,
	DarkRed = 15,
	DarkOrange = 16,
	DarkPeach = 17,
	DarkYellow = 18,
	DarkGreen = 19,
	DarkTeal = 20,
	DarkOlive = 21,
	DarkBlue = 22,
	DarkPurple = 23,
	DarkMaroon = 24,
}
impl Color {
	pub const ALL: [Self; 26] = [
		Self::None,
		Self::Red,
		Self::Orange,
		Self::Peach,
		Self::Yellow,
		Self::Green,
		Self::Teal,
		Self::Olive,
		Self::Blue,
		Self::Purple,
		Self::Maroon,
		Self::Steel,
		Self::DarkSteel,
		Self::Gray,
		Self::DarkGray,
		Self::Black,
		Self::DarkRed,
		Self::DarkOrange,
		Self::DarkPeach,
		Self::DarkYellow,
		Self::DarkGreen,
		Self::DarkTeal,
		Self::DarkOlive,
		Self::DarkBlue,
		Self::DarkPurple,
		Self::DarkMaroon,
	];

	pub fn value(self) -> i32 {
		self as i32
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Red => "red",
			Self::Orange => "orange",
			Self::Peach => "peach",
			Self::Yellow => "yellow",
			Self::Green => "green",
			Self::Teal => "teal",
			Self::Olive => "olive",
			Self::Blue => "blue",
			Self::Purple => "purple",
			Self::Maroon => "maroon",
			Self::Steel => "steel",
			Self::DarkSteel => "dark-steel",
			Self::Gray => "gray",
			Self::DarkGray => "dark-gray",
			Self::Black => "black",
			Self::DarkRed => "dark-red",
			Self::DarkOrange => "dark-orange",
			Self::DarkPeach => "dark-peach",
			Self::DarkYellow => "dark-yellow",
			Self::DarkGreen => "dark-green",
			Self::DarkTeal => "dark-teal",
			Self::DarkOlive => "dark-olive",
			Self::DarkBlue => "dark-blue",
			Self::DarkPurple => "dark-purple",
			Self::DarkMaroon => "dark-maroon",
		}
	}
}

impl TryFrom<i32> for Color {
	type Error = ParseColorError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		Self::ALL
			.iter()
			.copied()
			.find(|color| color.value() == value)
			.ok_or(ParseColorError::OutOfRange { value })
	}
}

impl From<Color> for i32 {
	fn from(color: Color) -> Self {
		color.value()
	}
}

impl FromStr for Color {
	type Err = ParseColorError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		let raw = raw.trim();

		if let Ok(value) = raw.parse::<i32>() {
			return Self::try_from(value);
		}

		let normalized = raw.to_ascii_lowercase().replace(['_', ' '], "-");

		Self::ALL
			.iter()
			.copied()
			.find(|color| color.name() == normalized || color.name().replace('-', "") == normalized)
			.ok_or_else(|| ParseColorError::UnknownName { name: raw.to_string() })
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
