// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-time computation.
//!
//! Education sessions and tournaments have fixed lengths, so their end time
//! is derived from the start. Every other activity needs an explicit end.
//! A client may override the derived value by marking the end as touched.

use crate::activity::Activity;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Fixed length of an education session.
pub const EDUCATION_DURATION: Duration = Duration::minutes(60);

/// The level of a tournament. Determines how many days it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentScope {
    /// A national tournament (two days).
    National,
    /// An international Tennis Europe tournament (three days).
    InternationalTe,
}

impl TournamentScope {
    /// Returns the persisted label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::InternationalTe => "international_te",
        }
    }

    /// Returns how long a tournament of this scope runs.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        match self {
            Self::National => Duration::days(2),
            Self::InternationalTe => Duration::days(3),
        }
    }
}

impl FromStr for TournamentScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "national" => Ok(Self::National),
            "international_te" | "international te" | "international-te" => {
                Ok(Self::InternationalTe)
            }
            _ => Err(DomainError::MissingTournamentScope),
        }
    }
}

impl std::fmt::Display for TournamentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves the tournament scope supplied with an event.
///
/// Non-tournament activities never carry a scope; whatever was supplied is
/// discarded. For tournaments an absent scope is returned as `None` and left
/// for [`compute_end_time`] to judge, since an explicitly touched end time
/// does not need one.
///
/// # Errors
///
/// Returns `DomainError::MissingTournamentScope` if a tournament carries a
/// scope string that is not recognized.
pub fn resolve_tournament_scope(
    activity: Activity,
    raw: Option<&str>,
) -> Result<Option<TournamentScope>, DomainError> {
    if activity != Activity::Tournament {
        return Ok(None);
    }
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<TournamentScope>().map(Some),
    }
}

/// Computes the end time of an event.
///
/// Precedence:
/// 1. `end_touched` uses `explicit_end` verbatim.
/// 2. Education ends one hour after the start.
/// 3. Tournaments end two or three days after the start, by scope.
/// 4. Everything else uses `explicit_end`.
///
/// # Arguments
///
/// * `activity` - The normalized activity
/// * `start` - The event start
/// * `scope` - The tournament scope, if any
/// * `explicit_end` - The end time supplied by the client, if any
/// * `end_touched` - Whether the client explicitly overrode the end time
///
/// # Errors
///
/// Returns an error if:
/// - A required explicit end is missing (`MissingEndTime`)
/// - A tournament has no scope (`MissingTournamentScope`)
/// - An explicit end is not after the start (`InvalidTimeRange`)
/// - Date arithmetic overflows
pub fn compute_end_time(
    activity: Activity,
    start: OffsetDateTime,
    scope: Option<TournamentScope>,
    explicit_end: Option<OffsetDateTime>,
    end_touched: bool,
) -> Result<OffsetDateTime, DomainError> {
    if end_touched {
        let end: OffsetDateTime = explicit_end.ok_or(DomainError::MissingEndTime)?;
        validate_time_range(start, end)?;
        return Ok(end);
    }

    match activity {
        Activity::Education => add_duration(start, EDUCATION_DURATION),
        Activity::Tournament => {
            let scope: TournamentScope = scope.ok_or(DomainError::MissingTournamentScope)?;
            add_duration(start, scope.duration())
        }
        Activity::Practice | Activity::Gym | Activity::Match | Activity::Sparring => {
            let end: OffsetDateTime = explicit_end.ok_or(DomainError::MissingEndTime)?;
            validate_time_range(start, end)?;
            Ok(end)
        }
    }
}

/// Checks that an event ends strictly after it starts.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeRange` if `end <= start`.
pub fn validate_time_range(start: OffsetDateTime, end: OffsetDateTime) -> Result<(), DomainError> {
    if end <= start {
        return Err(DomainError::InvalidTimeRange { start, end });
    }
    Ok(())
}

/// Drops sub-second precision, matching how instants are stored.
#[must_use]
pub fn truncate_to_second(value: OffsetDateTime) -> OffsetDateTime {
    value - Duration::nanoseconds(i64::from(value.nanosecond()))
}

fn add_duration(start: OffsetDateTime, duration: Duration) -> Result<OffsetDateTime, DomainError> {
    start
        .checked_add(duration)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("adding {duration} to {start}"),
        })
}
