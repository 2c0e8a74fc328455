// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::validate_time_range;
use crate::types::NewCalendarEvent;

/// Maximum length of an event title, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validates an event title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is blank or too long.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title must not be empty",
        )));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates the record invariants of an event before it is written.
///
/// # Errors
///
/// Returns an error if the title is invalid or the event does not end after
/// it starts.
pub fn validate_event(event: &NewCalendarEvent) -> Result<(), DomainError> {
    validate_title(&event.title)?;
    validate_time_range(event.start, event.end)
}
