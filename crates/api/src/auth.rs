// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication types and services.

use courtside::Identity;
use courtside_domain::{TeamId, UserId};
use courtside_persistence::{Persistence, PersistenceError, SessionData, UserData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// A user whose session token has been validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's ID.
    pub user_id: UserId,
    /// The user's login email.
    pub email: String,
    /// The user's display name.
    pub display_name: String,
    /// The team the session acts in, if one has been chosen.
    pub team_id: Option<TeamId>,
    /// The token the user authenticated with.
    pub session_token: String,
}

impl AuthenticatedUser {
    /// Returns the caller identity for team-scoped operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the session has no team selected.
    pub fn identity(&self) -> Result<Identity, AuthError> {
        self.team_id
            .map(|team_id| Identity::new(self.user_id, team_id))
            .ok_or_else(|| AuthError::Unauthorized {
                action: String::from("access team data"),
                reason: String::from("No active team selected"),
            })
    }

    fn from_user(user: UserData, team_id: Option<i64>, session_token: String) -> Self {
        Self {
            user_id: UserId::new(user.user_id),
            email: user.email,
            display_name: user.display_name,
            team_id: team_id.map(TeamId::new),
            session_token,
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime.
    pub const DEFAULT_SESSION_LIFETIME: Duration = Duration::days(30);

    /// Authenticates a user and creates a session.
    ///
    /// The session acts in `requested_team` when given, which must be one of
    /// the user's accepted teams. Otherwise it acts in the user's oldest
    /// accepted team, or in no team at all.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The login email
    /// * `password` - The plain-text password
    /// * `requested_team` - The team to act in, if the caller chose one
    /// * `lifetime` - How long the session stays valid
    ///
    /// # Returns
    ///
    /// A tuple of (`authenticated_user`, `expires_at`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the requested team is
    /// not one of the user's teams, or the session cannot be created.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        requested_team: Option<i64>,
        lifetime: Duration,
    ) -> Result<(AuthenticatedUser, String), AuthError> {
        // Unknown emails and wrong passwords are reported identically.
        let invalid_credentials = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        };

        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(invalid_credentials)?;

        let password_valid: bool = Persistence::verify_password(password, &user.password_hash)
            .map_err(Self::map_persistence_error)?;
        if !password_valid {
            return Err(invalid_credentials());
        }

        let teams: Vec<i64> = persistence
            .list_accepted_teams_for_user(user.user_id)
            .map_err(Self::map_persistence_error)?;
        let team_id: Option<i64> = match requested_team {
            Some(requested) if teams.contains(&requested) => Some(requested),
            Some(requested) => {
                return Err(AuthError::Unauthorized {
                    action: String::from("log in"),
                    reason: format!("Not an accepted member of team {requested}"),
                });
            }
            None => teams.first().copied(),
        };

        let session_token: String = Self::generate_session_token();
        let expires_at: String = Self::expiry_from_now(lifetime)?;

        persistence
            .create_session(&session_token, user.user_id, team_id, &expires_at)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        tracing::info!(user_id = user.user_id, ?team_id, "User logged in");

        Ok((
            AuthenticatedUser::from_user(user, team_id, session_token),
            expires_at,
        ))
    }

    /// Validates a session token and returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or its user no
    /// longer exists.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(&session.expires_at, &Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to parse session expiration: {e}"),
            })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence
            .get_user_by_id(session.user_id)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("User not found"),
            })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(Self::map_persistence_error)?;

        Ok(AuthenticatedUser::from_user(
            user,
            session.team_id,
            session.session_token,
        ))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the logout fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates a session token.
    fn generate_session_token() -> String {
        format!(
            "session_{}_{}",
            OffsetDateTime::now_utc().unix_timestamp_nanos(),
            rand::random::<u64>()
        )
    }

    fn expiry_from_now(lifetime: Duration) -> Result<String, AuthError> {
        let expires_at: OffsetDateTime = (OffsetDateTime::now_utc() + lifetime)
            .replace_nanosecond(0)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to compute expiration time: {e}"),
            })?;
        expires_at
            .format(&Rfc3339)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        AuthError::AuthenticationFailed {
            reason: format!("Database error: {err}"),
        }
    }
}
