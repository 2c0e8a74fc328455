// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{DomainError, UserId};

use crate::store::StoreError;

/// A proposed participant whose team role may not attend the activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedParticipant {
    /// The proposed user.
    pub user_id: UserId,
    /// The user's team role, as stored.
    pub role: String,
}

/// Errors that can occur while authoring or reading events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The caller's role does not permit the action.
    Forbidden {
        /// The attempted action.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// The resource does not exist or is not visible to the caller.
    NotFound {
        /// The kind of resource.
        resource: String,
        /// A human-readable description.
        message: String,
    },
    /// Some proposed participants are not accepted members of the team.
    ParticipantNotInTeam {
        /// The users without an accepted membership.
        missing: Vec<UserId>,
    },
    /// Some proposed participants hold a role the activity does not admit.
    InvalidParticipants {
        /// The rejected users and their roles.
        rejected: Vec<RejectedParticipant>,
    },
    /// A tournament has no player and the team has several to choose from.
    SelectPlayerRequired {
        /// The team's players.
        candidates: Vec<UserId>,
    },
    /// The write collides with existing data.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// The store failed.
    Store(StoreError),
}

impl CoreError {
    /// Returns the stable machine-readable token for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DomainViolation(err) => err.kind(),
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::ParticipantNotInTeam { .. } => "participant_not_in_team",
            Self::InvalidParticipants { .. } => "invalid_participants",
            Self::SelectPlayerRequired { .. } => "select_player_required",
            Self::Conflict { .. } => "conflict",
            Self::Store(_) => "internal",
        }
    }

    pub(crate) fn event_not_found(event_id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            resource: String::from("event"),
            message: format!("Event {event_id} not found"),
        }
    }
}

fn join_ids(ids: &[UserId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join(", ")
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden to {action}: {reason}")
            }
            Self::NotFound { message, .. } => write!(f, "{message}"),
            Self::ParticipantNotInTeam { missing } => write!(
                f,
                "Participants are not members of this team: {}",
                join_ids(missing)
            ),
            Self::InvalidParticipants { rejected } => {
                let detail: String = rejected
                    .iter()
                    .map(|r| format!("{} ({})", r.user_id, r.role))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "Participants not allowed for this activity: {detail}")
            }
            Self::SelectPlayerRequired { candidates } => write!(
                f,
                "A tournament needs a player; choose one of: {}",
                join_ids(candidates)
            ),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => Self::Conflict { message },
            other => Self::Store(other),
        }
    }
}
