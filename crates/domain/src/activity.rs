// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Activity types and their normalization.
//!
//! Clients and older stored rows spell some activities in several ways.
//! Everything entering the domain passes through [`normalize_activity`]
//! first, so the rest of the system only ever sees the six canonical tags.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// A classroom or video session, fixed at one hour.
    Education,
    /// An on-court team practice.
    Practice,
    /// A fitness session.
    Gym,
    /// A competitive match between two players.
    Match,
    /// An informal hitting session between players.
    Sparring,
    /// A multi-day tournament.
    Tournament,
}

impl Activity {
    /// Every activity, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Education,
        Self::Practice,
        Self::Gym,
        Self::Match,
        Self::Sparring,
        Self::Tournament,
    ];

    /// Returns the canonical domain tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Practice => "practice",
            Self::Gym => "gym",
            Self::Match => "match",
            Self::Sparring => "sparring",
            Self::Tournament => "tournament",
        }
    }

    /// Returns the label this activity is persisted under.
    ///
    /// Stored rows predate the canonical `sparring` tag and keep the
    /// `sparring_request` wire-label.
    #[must_use]
    pub const fn storage_label(&self) -> &'static str {
        match self {
            Self::Sparring => "sparring_request",
            other => other.as_str(),
        }
    }

    /// Restores an activity from its persisted label.
    ///
    /// Any spelling accepted by [`Activity::parse`] is accepted here too.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActivityType` if the label does not name
    /// an activity.
    pub fn from_storage_label(label: &str) -> Result<Self, DomainError> {
        Self::parse(label)
    }

    /// Normalizes and validates a raw activity string.
    ///
    /// # Arguments
    ///
    /// * `raw` - The activity as supplied by a client or a stored row
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActivityType` if the normalized value is
    /// not one of the six canonical tags.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized: String = normalize_activity(raw);
        match normalized.as_str() {
            "education" => Ok(Self::Education),
            "practice" => Ok(Self::Practice),
            "gym" => Ok(Self::Gym),
            "match" => Ok(Self::Match),
            "sparring" => Ok(Self::Sparring),
            "tournament" => Ok(Self::Tournament),
            _ => Err(DomainError::InvalidActivityType(raw.to_string())),
        }
    }

    /// Returns whether this activity has a result (score) attached to it.
    #[must_use]
    pub const fn is_competitive(&self) -> bool {
        matches!(self, Self::Match | Self::Sparring)
    }

    /// Returns whether attendance can be logged for this activity.
    #[must_use]
    pub const fn is_training(&self) -> bool {
        matches!(self, Self::Practice | Self::Gym | Self::Education)
    }
}

impl FromStr for Activity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalizes a raw activity string.
///
/// Lower-cases and trims the input, then rewrites the known sparring
/// synonyms (`sparing`, `sparring request`, `sparring_request` and their
/// hyphen or underscore variants) to `sparring`. Anything else is returned
/// trimmed and lower-cased.
///
/// This function is total and idempotent.
#[must_use]
pub fn normalize_activity(raw: &str) -> String {
    let lowered: String = raw.trim().to_lowercase();

    let collapsed: String = lowered
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ");

    match collapsed.as_str() {
        "sparing" | "sparring" | "sparring request" | "sparing request" => String::from("sparring"),
        _ => lowered,
    }
}
