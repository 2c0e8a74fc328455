// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar event, participant, and result queries.
//!
//! Stored labels are decoded back into domain types here. A row that no
//! longer decodes is reported as `PersistenceError::CorruptRow` rather than
//! silently skipped.

use courtside_domain::{
    Activity, AttendanceStatus, CalendarEvent, EventId, EventWindow, MatchResult, MatchScore,
    Participant, ParticipantRole, ParticipationStatus, PerformanceRating, Recurrence, TeamId,
    TournamentScope, TrainingLog, UserId,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::codec::{corrupt, format_timestamp, parse_timestamp};
use crate::diesel_schema::{calendar_events, event_participants, match_results, training_logs};
use crate::error::PersistenceError;

/// Diesel Queryable struct for calendar event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = calendar_events)]
struct EventRow {
    event_id: i64,
    team_id: i64,
    created_by: i64,
    title: String,
    description: Option<String>,
    location: Option<String>,
    event_type: String,
    start_time: String,
    end_time: String,
    tournament_scope: Option<String>,
    is_recurring: i32,
    recurrence_pattern: Option<String>,
    original_event_id: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<EventRow> for CalendarEvent {
    type Error = PersistenceError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let activity: Activity = Activity::from_storage_label(&row.event_type)
            .map_err(|e| corrupt("calendar_events", e))?;
        let tournament_scope: Option<TournamentScope> = row
            .tournament_scope
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| corrupt("calendar_events", e))?;

        Ok(Self {
            event_id: EventId::new(row.event_id),
            team_id: TeamId::new(row.team_id),
            created_by: UserId::new(row.created_by),
            title: row.title,
            description: row.description,
            location: row.location,
            activity,
            start: parse_timestamp(&row.start_time)?,
            end: parse_timestamp(&row.end_time)?,
            tournament_scope,
            recurrence: Recurrence {
                is_recurring: row.is_recurring != 0,
                pattern: row.recurrence_pattern,
            },
            original_event_id: row.original_event_id.map(EventId::new),
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Diesel Queryable struct for participant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = event_participants)]
struct ParticipantRow {
    event_id: i64,
    user_id: i64,
    role: String,
    status: String,
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = PersistenceError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_id: EventId::new(row.event_id),
            user_id: UserId::new(row.user_id),
            role: row
                .role
                .parse::<ParticipantRole>()
                .map_err(|e| corrupt("event_participants", e))?,
            status: row
                .status
                .parse::<ParticipationStatus>()
                .map_err(|e| corrupt("event_participants", e))?,
        })
    }
}

/// Diesel Queryable struct for match result rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = match_results)]
struct MatchResultRow {
    result_id: i64,
    event_id: i64,
    score: String,
    winner_id: Option<i64>,
    recorded_by: i64,
    recorded_at: String,
}

impl TryFrom<MatchResultRow> for MatchResult {
    type Error = PersistenceError;

    fn try_from(row: MatchResultRow) -> Result<Self, Self::Error> {
        Ok(Self {
            result_id: row.result_id,
            event_id: EventId::new(row.event_id),
            score: MatchScore::parse(&row.score).map_err(|e| corrupt("match_results", e))?,
            winner: row.winner_id.map(UserId::new),
            recorded_by: UserId::new(row.recorded_by),
            recorded_at: parse_timestamp(&row.recorded_at)?,
        })
    }
}

/// Diesel Queryable struct for training log rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = training_logs)]
struct TrainingLogRow {
    log_id: i64,
    event_id: i64,
    player_id: i64,
    attendance: String,
    rating: Option<i32>,
    notes: Option<String>,
    logged_by: i64,
    updated_at: String,
}

impl TryFrom<TrainingLogRow> for TrainingLog {
    type Error = PersistenceError;

    fn try_from(row: TrainingLogRow) -> Result<Self, Self::Error> {
        let attendance: AttendanceStatus = row
            .attendance
            .parse()
            .map_err(|e| corrupt("training_logs", e))?;
        let rating: Option<PerformanceRating> = row
            .rating
            .map(|value| PerformanceRating::new(i64::from(value)))
            .transpose()
            .map_err(|e| corrupt("training_logs", e))?;

        Ok(Self {
            log_id: row.log_id,
            event_id: EventId::new(row.event_id),
            player_id: UserId::new(row.player_id),
            attendance,
            rating,
            notes: row.notes,
            logged_by: UserId::new(row.logged_by),
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Retrieves an event scoped to its owning team.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if the team has no such event.
pub fn find_event(
    conn: &mut SqliteConnection,
    event_id: EventId,
    team_id: TeamId,
) -> Result<Option<CalendarEvent>, PersistenceError> {
    debug!(%event_id, %team_id, "Looking up event");

    let result: Result<EventRow, diesel::result::Error> = calendar_events::table
        .filter(calendar_events::event_id.eq(event_id.value()))
        .filter(calendar_events::team_id.eq(team_id.value()))
        .select(EventRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(CalendarEvent::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists a team's events inside a window, ordered by start time.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_events(
    conn: &mut SqliteConnection,
    team_id: TeamId,
    window: &EventWindow,
) -> Result<Vec<CalendarEvent>, PersistenceError> {
    debug!(%team_id, "Listing events");

    let mut query = calendar_events::table
        .filter(calendar_events::team_id.eq(team_id.value()))
        .select(EventRow::as_select())
        .order_by((
            calendar_events::start_time.asc(),
            calendar_events::event_id.asc(),
        ))
        .into_boxed();

    if let Some(from) = window.start {
        query = query.filter(calendar_events::start_time.ge(format_timestamp(from)?));
    }
    if let Some(to) = window.end {
        query = query.filter(calendar_events::end_time.le(format_timestamp(to)?));
    }

    let rows: Vec<EventRow> = query.load(conn)?;
    rows.into_iter().map(CalendarEvent::try_from).collect()
}

/// Lists the participants of several events, ordered by event then user.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_participants(
    conn: &mut SqliteConnection,
    event_ids: &[EventId],
) -> Result<Vec<Participant>, PersistenceError> {
    let ids: Vec<i64> = event_ids.iter().map(EventId::value).collect();

    debug!(count = ids.len(), "Listing participants");

    let rows: Vec<ParticipantRow> = event_participants::table
        .filter(event_participants::event_id.eq_any(&ids))
        .order_by((
            event_participants::event_id.asc(),
            event_participants::user_id.asc(),
        ))
        .select(ParticipantRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Participant::try_from).collect()
}

/// Retrieves the match result of an event.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
pub fn find_match_result(
    conn: &mut SqliteConnection,
    event_id: EventId,
) -> Result<Option<MatchResult>, PersistenceError> {
    debug!(%event_id, "Looking up match result");

    let result: Result<MatchResultRow, diesel::result::Error> = match_results::table
        .filter(match_results::event_id.eq(event_id.value()))
        .select(MatchResultRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(MatchResult::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves the training log of one player at one event.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
pub fn find_training_log(
    conn: &mut SqliteConnection,
    event_id: EventId,
    player_id: UserId,
) -> Result<Option<TrainingLog>, PersistenceError> {
    debug!(%event_id, %player_id, "Looking up training log");

    let result: Result<TrainingLogRow, diesel::result::Error> = training_logs::table
        .filter(training_logs::event_id.eq(event_id.value()))
        .filter(training_logs::player_id.eq(player_id.value()))
        .select(TrainingLogRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(TrainingLog::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists the training logs of an event, ordered by player.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_training_logs(
    conn: &mut SqliteConnection,
    event_id: EventId,
) -> Result<Vec<TrainingLog>, PersistenceError> {
    debug!(%event_id, "Listing training logs");

    let rows: Vec<TrainingLogRow> = training_logs::table
        .filter(training_logs::event_id.eq(event_id.value()))
        .order_by(training_logs::player_id.asc())
        .select(TrainingLogRow::as_select())
        .load(conn)?;

    rows.into_iter().map(TrainingLog::try_from).collect()
}
