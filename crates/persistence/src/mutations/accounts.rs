// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User account and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::codec::now_timestamp;
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Creates a new user account.
///
/// The email is normalized to lowercase for case-insensitive uniqueness.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The login email (will be normalized)
/// * `display_name` - The display name
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken, or
/// another error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    display_name: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    info!("Creating user with email: {}", normalized_email);

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::email.eq(&normalized_email),
            users::display_name.eq(display_name.trim()),
            users::password_hash.eq(&password_hash),
            users::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, "User created successfully");
    Ok(user_id)
}

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `user_id` - The user ID
/// * `team_id` - The team the session acts in, if any
/// * `expires_at` - The expiration timestamp (RFC 3339)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: i64,
    team_id: Option<i64>,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(user_id, ?team_id, expires_at, "Creating session");

    let now: String = now_timestamp()?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::team_id.eq(team_id),
            sessions::created_at.eq(&now),
            sessions::last_activity_at.eq(&now),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = get_last_insert_rowid(conn)?;

    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}

/// Updates the last activity timestamp for a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<(), PersistenceError> {
    debug!(session_id, "Updating session activity");

    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(now_timestamp()?))
        .execute(conn)?;

    Ok(())
}

/// Points a session at a different team.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the session does not exist, or
/// another error if the update fails.
pub fn set_session_team(
    conn: &mut SqliteConnection,
    session_token: &str,
    team_id: i64,
) -> Result<(), PersistenceError> {
    info!(team_id, "Switching session team");

    let rows_affected: usize = diesel::update(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .set(sessions::team_id.eq(Some(team_id)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(String::from("Session not found")));
    }
    Ok(())
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes all expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    debug!("Deleting expired sessions");

    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.lt(now_timestamp()?))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}
