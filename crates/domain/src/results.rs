// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match scores, attendance, and performance ratings.

use crate::activity::Activity;
use crate::error::DomainError;
use crate::types::{EventId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// A validated match score such as `6-4 3-6 7-5`.
///
/// Each set is two game counts of one or two digits separated by a hyphen.
/// Sets are separated by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(String);

impl MatchScore {
    /// Validates a score string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidScore` if the text is not a sequence of
    /// `N-N` sets.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() || !trimmed.split(' ').all(is_valid_set) {
            return Err(DomainError::InvalidScore(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the score text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_set(set: &str) -> bool {
    let Some((left, right)) = set.split_once('-') else {
        return false;
    };
    is_game_count(left) && is_game_count(right)
}

fn is_game_count(value: &str) -> bool {
    (1..=2).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Whether a player attended a training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    /// Returns the persisted label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    /// Accepts both the coach-facing labels (`attended`, `missed`, `late`)
    /// and the persisted ones.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "attended" | "present" => Ok(Self::Present),
            "missed" | "absent" => Ok(Self::Absent),
            "late" => Ok(Self::Late),
            _ => Err(DomainError::InvalidAttendance(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A coach's 1 to 10 rating of a player's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerformanceRating(u8);

impl PerformanceRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validates a rating.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is outside 1..=10.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(DomainError::InvalidRating(value))
    }

    /// Returns the rating.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// Checks that a score can be recorded for an activity.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedActivity` unless the activity is a match
/// or a sparring session.
pub fn ensure_competitive(activity: Activity) -> Result<(), DomainError> {
    if activity.is_competitive() {
        Ok(())
    } else {
        Err(DomainError::UnsupportedActivity {
            activity,
            operation: "record a match result",
        })
    }
}

/// Checks that attendance can be logged for an activity.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedActivity` unless the activity is a
/// practice, gym, or education session.
pub fn ensure_training(activity: Activity) -> Result<(), DomainError> {
    if activity.is_training() {
        Ok(())
    } else {
        Err(DomainError::UnsupportedActivity {
            activity,
            operation: "log training",
        })
    }
}

/// Validates the two sides of a match and the declared winner.
///
/// # Arguments
///
/// * `players` - The event's player-slot participants
/// * `winner` - The declared winner, if any
///
/// # Errors
///
/// Returns an error if the event does not have exactly two players or the
/// winner is not one of them.
pub fn validate_match_players(players: &[UserId], winner: Option<UserId>) -> Result<(), DomainError> {
    if players.len() != 2 {
        return Err(DomainError::InvalidMatchPlayers {
            count: players.len(),
        });
    }
    if let Some(winner) = winner
        && !players.contains(&winner)
    {
        return Err(DomainError::WinnerNotInMatch(winner));
    }
    Ok(())
}

/// A match result awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatchResult {
    pub event_id: EventId,
    pub score: MatchScore,
    pub winner: Option<UserId>,
    pub recorded_by: UserId,
}

/// A recorded match result. An event has at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub result_id: i64,
    pub event_id: EventId,
    pub score: MatchScore,
    pub winner: Option<UserId>,
    pub recorded_by: UserId,
    pub recorded_at: OffsetDateTime,
}

/// A training log entry awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrainingLog {
    pub event_id: EventId,
    pub player_id: UserId,
    pub attendance: AttendanceStatus,
    pub rating: Option<PerformanceRating>,
    pub notes: Option<String>,
    pub logged_by: UserId,
}

/// A player's logged attendance for one training event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingLog {
    pub log_id: i64,
    pub event_id: EventId,
    pub player_id: UserId,
    pub attendance: AttendanceStatus,
    pub rating: Option<PerformanceRating>,
    pub notes: Option<String>,
    pub logged_by: UserId,
    pub updated_at: OffsetDateTime,
}
