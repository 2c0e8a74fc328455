// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team, membership, and parent link mutations.

use courtside_domain::{MembershipStatus, Role};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::codec::now_timestamp;
use crate::diesel_schema::{parent_links, team_members, teams};
use crate::error::PersistenceError;

/// Creates a team and makes its creator an accepted coach.
///
/// Both rows are written in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `name` - The team name
/// * `invite_code` - The code other users join with (stored upper-cased)
/// * `created_by` - The creating user
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the invite code is taken,
/// or another error if either insert fails.
pub fn create_team(
    conn: &mut SqliteConnection,
    name: &str,
    invite_code: &str,
    created_by: i64,
) -> Result<i64, PersistenceError> {
    info!(created_by, "Creating team '{}'", name);

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let now: String = now_timestamp()?;
        diesel::insert_into(teams::table)
            .values((
                teams::name.eq(name.trim()),
                teams::invite_code.eq(invite_code.trim().to_uppercase()),
                teams::created_by.eq(created_by),
                teams::created_at.eq(&now),
            ))
            .execute(conn)?;
        let team_id: i64 = get_last_insert_rowid(conn)?;

        add_member(
            conn,
            team_id,
            created_by,
            Role::Coach,
            MembershipStatus::Accepted,
        )?;

        info!(team_id, created_by, "Team created");
        Ok(team_id)
    })
}

/// Adds a user to a team.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the user is already a
/// member, or another error if the insert fails.
pub fn add_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
    role: Role,
    status: MembershipStatus,
) -> Result<(), PersistenceError> {
    info!(team_id, user_id, %role, %status, "Adding team member");

    diesel::insert_into(team_members::table)
        .values((
            team_members::team_id.eq(team_id),
            team_members::user_id.eq(user_id),
            team_members::role.eq(role.as_str()),
            team_members::status.eq(status.as_str()),
            team_members::joined_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    Ok(())
}

/// Marks a pending membership as accepted.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user has no membership in the
/// team, or another error if the update fails.
pub fn accept_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    info!(team_id, user_id, "Accepting team member");

    let rows_affected: usize = diesel::update(team_members::table)
        .filter(team_members::team_id.eq(team_id))
        .filter(team_members::user_id.eq(user_id))
        .set(team_members::status.eq(MembershipStatus::Accepted.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User {user_id} is not a member of team {team_id}"
        )));
    }
    Ok(())
}

/// Links a parent to a child.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the link already exists,
/// or another error if the insert fails.
pub fn create_parent_link(
    conn: &mut SqliteConnection,
    parent_id: i64,
    child_id: i64,
) -> Result<(), PersistenceError> {
    info!(parent_id, child_id, "Linking parent to child");

    diesel::insert_into(parent_links::table)
        .values((
            parent_links::parent_id.eq(parent_id),
            parent_links::child_id.eq(child_id),
            parent_links::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    Ok(())
}
