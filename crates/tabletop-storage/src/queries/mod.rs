// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Each function takes `&Database` and runs on the
//! single writer thread.

pub mod bookings;
pub mod restaurants;
pub mod users;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;

/// Parse a stored timestamp column, surfacing bad data as a conversion error.
pub(crate) fn timestamp_column(idx: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    tabletop_core::time::parse_date_time(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("invalid timestamp `{raw}`").into(),
        )
    })
}
