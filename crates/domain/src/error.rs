// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::activity::Activity;
use crate::types::UserId;
use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The activity does not normalize to a known activity type.
    InvalidActivityType(String),
    /// The role does not normalize to a known team role.
    InvalidRole(String),
    /// A membership or participation status label is unknown.
    InvalidStatus(String),
    /// A tournament was submitted without a usable scope.
    MissingTournamentScope,
    /// An explicit end time is required but was not supplied.
    MissingEndTime,
    /// The event does not end after it starts.
    InvalidTimeRange {
        /// The event start.
        start: OffsetDateTime,
        /// The rejected end.
        end: OffsetDateTime,
    },
    /// Event title is empty or too long.
    InvalidTitle(String),
    /// Match score text is malformed.
    InvalidScore(String),
    /// Attendance label is unknown.
    InvalidAttendance(String),
    /// Performance rating is outside 1..=10.
    InvalidRating(i64),
    /// The operation does not apply to this kind of event.
    UnsupportedActivity {
        /// The event's activity.
        activity: Activity,
        /// The rejected operation.
        operation: &'static str,
    },
    /// A match must have exactly two players.
    InvalidMatchPlayers {
        /// How many players the event has.
        count: usize,
    },
    /// The declared winner did not play the match.
    WinnerNotInMatch(UserId),
    /// The user is not attached to the event as a player.
    NotAPlayerParticipant(UserId),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl DomainError {
    /// Returns the stable machine-readable token for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidActivityType(_) => "invalid_activity_type",
            Self::InvalidRole(_) => "invalid_role",
            Self::MissingTournamentScope => "missing_tournament_scope",
            Self::MissingEndTime => "missing_end_time",
            Self::InvalidTimeRange { .. } => "invalid_time_range",
            Self::InvalidStatus(_)
            | Self::InvalidTitle(_)
            | Self::InvalidScore(_)
            | Self::InvalidAttendance(_)
            | Self::InvalidRating(_)
            | Self::UnsupportedActivity { .. }
            | Self::InvalidMatchPlayers { .. }
            | Self::WinnerNotInMatch(_)
            | Self::NotAPlayerParticipant(_)
            | Self::DateArithmeticOverflow { .. } => "invalid_input",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidActivityType(raw) => write!(f, "Invalid activity type: '{raw}'"),
            Self::InvalidRole(raw) => write!(f, "Invalid role: '{raw}'"),
            Self::InvalidStatus(raw) => write!(f, "Invalid status: '{raw}'"),
            Self::MissingTournamentScope => write!(
                f,
                "Tournament scope is required (national or international_te)"
            ),
            Self::MissingEndTime => write!(f, "An end time is required for this activity"),
            Self::InvalidTimeRange { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidScore(raw) => write!(
                f,
                "Invalid score '{raw}': expected sets like '6-4' separated by spaces"
            ),
            Self::InvalidAttendance(raw) => write!(
                f,
                "Invalid attendance '{raw}': expected attended, missed or late"
            ),
            Self::InvalidRating(value) => {
                write!(f, "Invalid performance rating {value}: must be 1 to 10")
            }
            Self::UnsupportedActivity {
                activity,
                operation,
            } => write!(f, "Cannot {operation} for a {activity} event"),
            Self::InvalidMatchPlayers { count } => write!(
                f,
                "A match result requires exactly 2 players, event has {count}"
            ),
            Self::WinnerNotInMatch(user_id) => {
                write!(f, "Winner {user_id} is not one of the match players")
            }
            Self::NotAPlayerParticipant(user_id) => {
                write!(f, "User {user_id} is not a player on this event")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
