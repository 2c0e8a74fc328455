// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conversion between domain values and their stored text forms.
//!
//! Timestamps are stored as RFC 3339 UTC text truncated to whole seconds, so
//! string order matches chronological order.

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    let utc: OffsetDateTime = value
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .map_err(|e| PersistenceError::Other(format!("Invalid timestamp {value}: {e}")))?;
    utc.format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp {value}: {e}")))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRow` if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptRow(format!("Invalid timestamp '{value}': {e}")))
}

/// Returns the current time in its stored form.
///
/// # Errors
///
/// Returns an error if the current time cannot be formatted.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
}

/// Maps a domain decoding failure on a stored value to `CorruptRow`.
#[must_use]
pub fn corrupt<E: std::fmt::Display>(table: &str, err: E) -> PersistenceError {
    PersistenceError::CorruptRow(format!("{table}: {err}"))
}
