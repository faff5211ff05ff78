//! Timestamp text used by the category list and by item date fields.
//!
//! Values are written as RFC 3339 in UTC with nanosecond precision so that a decode after an
//! encode yields the same instant. Zone-less values, as produced by some clients, are read as
//! UTC.

use time::{
	OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::well_known::Rfc3339,
	macros::format_description,
};

pub fn format(value: OffsetDateTime) -> Result<String, time::error::Format> {
	value.to_offset(UtcOffset::UTC).format(&Rfc3339)
}

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	let raw = raw.trim();

	match OffsetDateTime::parse(raw, &Rfc3339) {
		Ok(value) => Ok(value.to_offset(UtcOffset::UTC)),
		Err(rfc_err) => PrimitiveDateTime::parse(
			raw,
			format_description!(
				"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
			),
		)
		.map(PrimitiveDateTime::assume_utc)
		.map_err(|_| rfc_err),
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn formats_utc_with_trimmed_fraction() {
		assert_eq!(
			format(datetime!(2024-03-01 08:15:00 UTC)).ok().as_deref(),
			Some("2024-03-01T08:15:00Z")
		);
		assert_eq!(
			format(datetime!(2024-03-01 10:15:00.120 +02:00)).ok().as_deref(),
			Some("2024-03-01T08:15:00.12Z")
		);
	}

	#[test]
	fn parses_offset_and_zoneless_values() {
		let expected = datetime!(2019-07-04 09:19:33.823 UTC);

		assert_eq!(parse("2019-07-04T09:19:33.823Z").ok(), Some(expected));
		assert_eq!(parse("2019-07-04T11:19:33.823+02:00").ok(), Some(expected));
		assert_eq!(parse("2019-07-04T09:19:33.823").ok(), Some(expected));
		assert!(parse("yesterday").is_err());
	}
}
