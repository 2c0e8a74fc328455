// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use courtside::{CoreError, RejectedParticipant};
use courtside_domain::DomainError;
use courtside_persistence::PersistenceError;
use tracing::error;

use crate::password_policy::PasswordPolicyError;
use crate::request_response::RejectedParticipantInfo;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The authenticated user may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized to {action}: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant maps to one stable kind token through [`ApiError::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No valid session accompanies the request.
    Unauthenticated {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller's role does not permit the action.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A scheduling rule rejected the request.
    Validation {
        /// The machine-readable kind token.
        kind: &'static str,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Some proposed participants may not attend the activity.
    InvalidParticipants {
        /// A human-readable description.
        message: String,
        /// The rejected participants and their team roles.
        rejected: Vec<RejectedParticipantInfo>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request collides with existing data.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable machine-readable token for this error.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "unauthenticated",
            Self::Forbidden { .. } => "forbidden",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Validation { kind, .. } => *kind,
            Self::InvalidParticipants { .. } => "invalid_participants",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: format!("'{field}' is required"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden to {action}: {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Validation { message, .. }
            | Self::InvalidParticipants { message, .. }
            | Self::Conflict { message } => write!(f, "{message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::Unauthenticated { reason },
            AuthError::Unauthorized { action, reason } => Self::Forbidden { action, reason },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("password"),
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidActivityType(_)
        | DomainError::InvalidRole(_)
        | DomainError::MissingTournamentScope
        | DomainError::MissingEndTime
        | DomainError::InvalidTimeRange { .. } => ApiError::Validation {
            kind: err.kind(),
            message,
        },
        DomainError::InvalidStatus(_) => invalid("status", message),
        DomainError::InvalidTitle(_) => invalid("title", message),
        DomainError::InvalidScore(_) => invalid("score", message),
        DomainError::InvalidAttendance(_) => invalid("attendance", message),
        DomainError::InvalidRating(_) => invalid("rating", message),
        DomainError::UnsupportedActivity { .. } => invalid("event_type", message),
        DomainError::InvalidMatchPlayers { .. } => invalid("participants", message),
        DomainError::WinnerNotInMatch(_) => invalid("winner_id", message),
        DomainError::NotAPlayerParticipant(_) => invalid("player_id", message),
        DomainError::DateArithmeticOverflow { .. } => invalid("start", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
/// Store failures are logged here and surface as `internal`.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Forbidden { action, reason } => ApiError::Forbidden { action, reason },
        CoreError::NotFound { resource, message } => ApiError::ResourceNotFound {
            resource_type: resource,
            message,
        },
        CoreError::ParticipantNotInTeam { .. } => ApiError::Validation {
            kind: "participant_not_in_team",
            message,
        },
        CoreError::InvalidParticipants { rejected } => ApiError::InvalidParticipants {
            message,
            rejected: rejected.iter().map(rejected_info).collect(),
        },
        CoreError::SelectPlayerRequired { .. } => ApiError::Validation {
            kind: "select_player_required",
            message,
        },
        CoreError::Conflict { message } => ApiError::Conflict { message },
        CoreError::Store(store_err) => {
            error!(error = %store_err, "Store failure");
            ApiError::Internal {
                message: store_err.to_string(),
            }
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Unique violations become conflicts and missing rows become not-found;
/// everything else is logged and reported as internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(message) => ApiError::Conflict {
            message: format!("{resource_type} already exists: {message}"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        other => {
            error!(error = %other, resource_type, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rejected_info(rejected: &RejectedParticipant) -> RejectedParticipantInfo {
    RejectedParticipantInfo {
        user_id: rejected.user_id.value(),
        role: rejected.role.clone(),
    }
}

