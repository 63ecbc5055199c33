// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timestamp parsing and formatting.
//!
//! All timestamps are stored and sent as UTC with millisecond precision
//! (`2026-01-01T19:00:00.000Z`), so string comparison orders them correctly.
//! Input also accepts offset-less local date-times, which are read as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parse an RFC 3339 timestamp or an offset-less `YYYY-MM-DDTHH:MM[:SS[.fff]]`.
pub fn parse_date_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Canonical storage and wire format.
pub fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter using [`parse_date_time`] and [`format_date_time`].
pub mod serde_flexible {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date_time(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_time(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_date_time("2030-01-01T20:00:00+01:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap());
    }

    #[test]
    fn parses_local_forms() {
        let expected = Utc.with_ymd_and_hms(2030, 1, 1, 19, 0, 0).unwrap();
        assert_eq!(parse_date_time("2030-01-01T19:00:00").unwrap(), expected);
        assert_eq!(parse_date_time("2030-01-01T19:00").unwrap(), expected);
        assert_eq!(parse_date_time("2030-01-01T19:00:00.000").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date_time("tomorrow at seven").is_none());
        assert!(parse_date_time("").is_none());
    }

    #[test]
    fn formatted_strings_sort_chronologically() {
        let early = format_date_time(&Utc.with_ymd_and_hms(2030, 1, 1, 9, 0, 0).unwrap());
        let late = format_date_time(&Utc.with_ymd_and_hms(2030, 1, 1, 21, 0, 0).unwrap());
        assert_eq!(early, "2030-01-01T09:00:00.000Z");
        assert!(early < late);
    }
}
