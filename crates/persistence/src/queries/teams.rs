// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team, membership, and parent link queries.

use courtside::MembershipRecord;
use courtside_domain::{MembershipStatus, Role, TeamId, UserId};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{MemberData, TeamData};
use crate::diesel_schema::{parent_links, team_members, teams, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for team rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teams)]
struct TeamRow {
    team_id: i64,
    name: String,
    invite_code: String,
    created_by: i64,
    created_at: String,
}

impl From<TeamRow> for TeamData {
    fn from(row: TeamRow) -> Self {
        Self {
            team_id: row.team_id,
            name: row.name,
            invite_code: row.invite_code,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Diesel Queryable struct for membership rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = team_members)]
struct MembershipRow {
    team_id: i64,
    user_id: i64,
    role: String,
    status: String,
}

impl From<MembershipRow> for MembershipRecord {
    fn from(row: MembershipRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            team_id: TeamId::new(row.team_id),
            role: row.role,
            status: row.status,
        }
    }
}

/// Retrieves a team by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the team is not found.
pub fn get_team_by_id(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<TeamData>, PersistenceError> {
    debug!(team_id, "Looking up team by ID");

    let result: Result<TeamRow, diesel::result::Error> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a team by its invite code.
///
/// Codes are compared upper-cased.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no team uses the code.
pub fn get_team_by_invite_code(
    conn: &mut SqliteConnection,
    invite_code: &str,
) -> Result<Option<TeamData>, PersistenceError> {
    let normalized_code: String = invite_code.trim().to_uppercase();

    debug!("Looking up team by invite code: {}", normalized_code);

    let result: Result<TeamRow, diesel::result::Error> = teams::table
        .filter(teams::invite_code.eq(&normalized_code))
        .select(TeamRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the members of a team with their account details, in join order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_team_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<MemberData>, PersistenceError> {
    debug!(team_id, "Listing team members");

    let rows: Vec<(i64, String, String, String, String, String)> = team_members::table
        .inner_join(users::table)
        .filter(team_members::team_id.eq(team_id))
        .order_by(team_members::member_id.asc())
        .select((
            users::user_id,
            users::email,
            users::display_name,
            team_members::role,
            team_members::status,
            team_members::joined_at,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(
            |(user_id, email, display_name, role, status, joined_at)| MemberData {
                user_id,
                email,
                display_name,
                role,
                status,
                joined_at,
            },
        )
        .collect())
}

/// Lists the teams a user has an accepted membership in, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_accepted_teams_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    debug!(user_id, "Listing accepted teams for user");

    Ok(team_members::table
        .filter(team_members::user_id.eq(user_id))
        .filter(team_members::status.eq(MembershipStatus::Accepted.as_str()))
        .order_by(team_members::member_id.asc())
        .select(team_members::team_id)
        .load(conn)?)
}

/// Retrieves the membership of a user in a team, whatever its status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_membership(
    conn: &mut SqliteConnection,
    user_id: UserId,
    team_id: TeamId,
) -> Result<Option<MembershipRecord>, PersistenceError> {
    debug!(%user_id, %team_id, "Looking up membership");

    let result: Result<MembershipRow, diesel::result::Error> = team_members::table
        .filter(team_members::user_id.eq(user_id.value()))
        .filter(team_members::team_id.eq(team_id.value()))
        .select(MembershipRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into())),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the memberships of several users in a team.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_members_by_ids(
    conn: &mut SqliteConnection,
    team_id: TeamId,
    user_ids: &[UserId],
) -> Result<Vec<MembershipRecord>, PersistenceError> {
    let ids: Vec<i64> = user_ids.iter().map(UserId::value).collect();

    debug!(%team_id, count = ids.len(), "Looking up memberships by user IDs");

    let rows: Vec<MembershipRow> = team_members::table
        .filter(team_members::team_id.eq(team_id.value()))
        .filter(team_members::user_id.eq_any(&ids))
        .select(MembershipRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MembershipRecord::from).collect())
}

/// Lists the accepted players of a team, including legacy `member` rows.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_team_players(
    conn: &mut SqliteConnection,
    team_id: TeamId,
) -> Result<Vec<UserId>, PersistenceError> {
    debug!(%team_id, "Listing team players");

    let rows: Vec<MembershipRow> = team_members::table
        .filter(team_members::team_id.eq(team_id.value()))
        .filter(team_members::status.eq(MembershipStatus::Accepted.as_str()))
        .order_by(team_members::user_id.asc())
        .select(MembershipRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .filter(|row| matches!(Role::parse(&row.role), Ok(Role::Player)))
        .map(|row| UserId::new(row.user_id))
        .collect())
}

/// Lists the children linked to a parent.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_linked_children(
    conn: &mut SqliteConnection,
    parent_id: UserId,
) -> Result<Vec<UserId>, PersistenceError> {
    debug!(%parent_id, "Listing linked children");

    let children: Vec<i64> = parent_links::table
        .filter(parent_links::parent_id.eq(parent_id.value()))
        .order_by(parent_links::child_id.asc())
        .select(parent_links::child_id)
        .load(conn)?;

    Ok(children.into_iter().map(UserId::new).collect())
}
