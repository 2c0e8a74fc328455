// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Courtside team calendar.
//!
//! This crate stores accounts, sessions, teams, memberships, parent links,
//! calendar events and their participants, match results, and training logs
//! in `SQLite` through Diesel. [`Persistence`] implements every store trait
//! the event core reads and writes through.
//!
//! ## Storage Conventions
//!
//! - Timestamps are RFC 3339 UTC text truncated to whole seconds.
//! - Activities are stored under their storage label, so `sparring` is
//!   written as `sparring_request`.
//! - Membership roles are stored as written; legacy `member` and `creator`
//!   rows are normalized when read by the permission engine.
//! - Deleting an event cascades to its participants, result, and training
//!   logs. Clones of a deleted event keep existing with their lineage
//!   cleared.
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] gets its own isolated
//! shared-cache in-memory database, so tests never observe each other.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use courtside_domain::{EventId, MembershipStatus, Role, TrainingLog};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod codec;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::{MemberData, SessionData, TeamData, UserData};
pub use error::PersistenceError;

/// Persistence adapter backed by a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates a user account and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email is taken.
    pub fn create_user(
        &mut self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_user(&mut self.conn, email, display_name, password)
    }

    /// Retrieves a user by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::accounts::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::accounts::get_user_by_id(&mut self.conn, user_id)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        queries::accounts::verify_password(password, password_hash)
    }

    // ========================================================================
    // Session Management
    // ========================================================================

    /// Creates a new session and returns its ID.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `user_id` - The user ID
    /// * `team_id` - The team the session acts in, if any
    /// * `expires_at` - The expiration timestamp (RFC 3339)
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        team_id: Option<i64>,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::accounts::create_session(
            &mut self.conn,
            session_token,
            user_id,
            team_id,
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::accounts::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::update_session_activity(&mut self.conn, session_id)
    }

    /// Points a session at a different team.
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the update fails.
    pub fn set_session_team(
        &mut self,
        session_token: &str,
        team_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::set_session_team(&mut self.conn, session_token, team_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::accounts::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::accounts::delete_expired_sessions(&mut self.conn)
    }

    // ========================================================================
    // Teams
    // ========================================================================

    /// Creates a team with its creator as an accepted coach.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the invite code is
    /// taken.
    pub fn create_team(
        &mut self,
        name: &str,
        invite_code: &str,
        created_by: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::teams::create_team(&mut self.conn, name, invite_code, created_by)
    }

    /// Retrieves a team by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_team_by_id(&mut self, team_id: i64) -> Result<Option<TeamData>, PersistenceError> {
        queries::teams::get_team_by_id(&mut self.conn, team_id)
    }

    /// Retrieves a team by invite code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_team_by_invite_code(
        &mut self,
        invite_code: &str,
    ) -> Result<Option<TeamData>, PersistenceError> {
        queries::teams::get_team_by_invite_code(&mut self.conn, invite_code)
    }

    /// Lists the members of a team in join order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_team_members(&mut self, team_id: i64) -> Result<Vec<MemberData>, PersistenceError> {
        queries::teams::list_team_members(&mut self.conn, team_id)
    }

    /// Lists the teams a user has an accepted membership in, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_accepted_teams_for_user(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<i64>, PersistenceError> {
        queries::teams::list_accepted_teams_for_user(&mut self.conn, user_id)
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the user is already a
    /// member.
    pub fn add_member(
        &mut self,
        team_id: i64,
        user_id: i64,
        role: Role,
        status: MembershipStatus,
    ) -> Result<(), PersistenceError> {
        mutations::teams::add_member(&mut self.conn, team_id, user_id, role, status)
    }

    /// Marks a pending membership as accepted.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the membership does not exist.
    pub fn accept_member(&mut self, team_id: i64, user_id: i64) -> Result<(), PersistenceError> {
        mutations::teams::accept_member(&mut self.conn, team_id, user_id)
    }

    /// Links a parent to a child.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the link exists.
    pub fn create_parent_link(
        &mut self,
        parent_id: i64,
        child_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::teams::create_parent_link(&mut self.conn, parent_id, child_id)
    }

    // ========================================================================
    // Training logs
    // ========================================================================

    /// Lists the training logs recorded for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_training_logs(
        &mut self,
        event_id: EventId,
    ) -> Result<Vec<TrainingLog>, PersistenceError> {
        queries::events::list_training_logs(&mut self.conn, event_id)
    }
}
