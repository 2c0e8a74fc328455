// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team roles, membership status, and participation labels.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A user's role within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A player on the team.
    Player,
    /// A coach. Coaches manage every event on the team.
    Coach,
    /// The parent or guardian of one or more players.
    Parent,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::Player, Self::Coach, Self::Parent];

    /// Returns the canonical role label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Coach => "coach",
            Self::Parent => "parent",
        }
    }

    /// Normalizes and validates a raw role string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRole` if the normalized value is not a
    /// known role.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match normalize_role(raw).as_str() {
            "player" => Ok(Self::Player),
            "coach" => Ok(Self::Coach),
            "parent" => Ok(Self::Parent),
            _ => Err(DomainError::InvalidRole(raw.to_string())),
        }
    }

    /// Returns the label this role takes when attached to an event.
    ///
    /// Parents attend in the player slot.
    #[must_use]
    pub const fn participant_role(&self) -> ParticipantRole {
        match self {
            Self::Coach => ParticipantRole::Coach,
            Self::Player | Self::Parent => ParticipantRole::Player,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalizes a raw role string.
///
/// `member` becomes `player` and `creator` becomes `coach`; everything else
/// is returned trimmed and lower-cased.
#[must_use]
pub fn normalize_role(raw: &str) -> String {
    let lowered: String = raw.trim().to_lowercase();
    match lowered.as_str() {
        "member" => String::from("player"),
        "creator" => String::from("coach"),
        _ => lowered,
    }
}

/// The state of a team membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Waiting for a coach to accept the membership.
    Pending,
    /// Active membership.
    Accepted,
}

impl MembershipStatus {
    /// Returns the persisted label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl FromStr for MembershipStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The slot a participant fills on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    /// Attending as a coach.
    Coach,
    /// Attending as a player (parents included).
    Player,
}

impl ParticipantRole {
    /// Returns the persisted label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coach => "coach",
            Self::Player => "player",
        }
    }
}

impl FromStr for ParticipantRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coach" => Ok(Self::Coach),
            "player" => Ok(Self::Player),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A participant's response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    /// No response yet.
    Pending,
    /// Attending.
    Confirmed,
    /// Not attending.
    Declined,
}

impl ParticipationStatus {
    /// Returns the persisted label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

impl FromStr for ParticipationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" | "accepted" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
