// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar event, participant, and result mutations.
//!
//! None of these open a transaction of their own. Callers that need several
//! writes to land together wrap them in `Persistence::atomically`.

use courtside_domain::{
    CalendarEvent, EventId, MatchResult, NewCalendarEvent, NewMatchResult, NewParticipant,
    NewTrainingLog, ParticipationStatus, TeamId, TrainingLog, UserId,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::codec::{format_timestamp, now_timestamp};
use crate::diesel_schema::{calendar_events, event_participants, match_results, training_logs};
use crate::error::PersistenceError;
use crate::queries::events::{find_event, find_match_result, find_training_log};

/// Inserts an event and returns it as stored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &NewCalendarEvent,
) -> Result<CalendarEvent, PersistenceError> {
    info!(
        team_id = %event.team_id,
        created_by = %event.created_by,
        activity = %event.activity,
        "Inserting event"
    );

    let now: String = now_timestamp()?;
    diesel::insert_into(calendar_events::table)
        .values((
            calendar_events::team_id.eq(event.team_id.value()),
            calendar_events::created_by.eq(event.created_by.value()),
            calendar_events::title.eq(&event.title),
            calendar_events::description.eq(&event.description),
            calendar_events::location.eq(&event.location),
            calendar_events::event_type.eq(event.activity.storage_label()),
            calendar_events::start_time.eq(format_timestamp(event.start)?),
            calendar_events::end_time.eq(format_timestamp(event.end)?),
            calendar_events::tournament_scope.eq(event.tournament_scope.map(|s| s.as_str())),
            calendar_events::is_recurring.eq(i32::from(event.recurrence.is_recurring)),
            calendar_events::recurrence_pattern.eq(&event.recurrence.pattern),
            calendar_events::original_event_id.eq(event.original_event_id.map(|id| id.value())),
            calendar_events::created_at.eq(&now),
            calendar_events::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let event_id: EventId = EventId::new(get_last_insert_rowid(conn)?);
    info!(%event_id, "Event inserted");

    find_event(conn, event_id, event.team_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Event {event_id} vanished after insert")))
}

/// Overwrites the mutable fields of an event and returns it as stored.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the event does not exist in its
/// team, or another error if the update fails.
pub fn update_event(
    conn: &mut SqliteConnection,
    event: &CalendarEvent,
) -> Result<CalendarEvent, PersistenceError> {
    info!(event_id = %event.event_id, "Updating event");

    let rows_affected: usize = diesel::update(calendar_events::table)
        .filter(calendar_events::event_id.eq(event.event_id.value()))
        .filter(calendar_events::team_id.eq(event.team_id.value()))
        .set((
            calendar_events::title.eq(&event.title),
            calendar_events::description.eq(&event.description),
            calendar_events::location.eq(&event.location),
            calendar_events::event_type.eq(event.activity.storage_label()),
            calendar_events::start_time.eq(format_timestamp(event.start)?),
            calendar_events::end_time.eq(format_timestamp(event.end)?),
            calendar_events::tournament_scope.eq(event.tournament_scope.map(|s| s.as_str())),
            calendar_events::is_recurring.eq(i32::from(event.recurrence.is_recurring)),
            calendar_events::recurrence_pattern.eq(&event.recurrence.pattern),
            calendar_events::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Event {} not found",
            event.event_id
        )));
    }

    find_event(conn, event.event_id, event.team_id)?
        .ok_or_else(|| PersistenceError::NotFound(format!("Event {} not found", event.event_id)))
}

/// Deletes an event. Participants, results, and training logs cascade.
///
/// Returns whether a row was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_event(
    conn: &mut SqliteConnection,
    event_id: EventId,
    team_id: TeamId,
) -> Result<bool, PersistenceError> {
    info!(%event_id, %team_id, "Deleting event");

    let rows_affected: usize = diesel::delete(calendar_events::table)
        .filter(calendar_events::event_id.eq(event_id.value()))
        .filter(calendar_events::team_id.eq(team_id.value()))
        .execute(conn)?;

    Ok(rows_affected > 0)
}

/// Replaces the full participant set of an event.
///
/// # Errors
///
/// Returns an error if the delete or insert fails.
pub fn replace_participants(
    conn: &mut SqliteConnection,
    event_id: EventId,
    participants: &[NewParticipant],
) -> Result<(), PersistenceError> {
    debug!(%event_id, count = participants.len(), "Replacing participants");

    diesel::delete(event_participants::table)
        .filter(event_participants::event_id.eq(event_id.value()))
        .execute(conn)?;

    for participant in participants {
        diesel::insert_into(event_participants::table)
            .values((
                event_participants::event_id.eq(event_id.value()),
                event_participants::user_id.eq(participant.user_id.value()),
                event_participants::role.eq(participant.role.as_str()),
                event_participants::status.eq(participant.status.as_str()),
            ))
            .execute(conn)?;
    }

    Ok(())
}

/// Records a participant's response. Returns whether a row was updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn set_participant_status(
    conn: &mut SqliteConnection,
    event_id: EventId,
    user_id: UserId,
    status: ParticipationStatus,
) -> Result<bool, PersistenceError> {
    info!(%event_id, %user_id, %status, "Recording participant response");

    let rows_affected: usize = diesel::update(event_participants::table)
        .filter(event_participants::event_id.eq(event_id.value()))
        .filter(event_participants::user_id.eq(user_id.value()))
        .set(event_participants::status.eq(status.as_str()))
        .execute(conn)?;

    Ok(rows_affected > 0)
}

/// Records a match result.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the event already has a
/// result, or another error if the insert fails.
pub fn insert_match_result(
    conn: &mut SqliteConnection,
    result: &NewMatchResult,
) -> Result<MatchResult, PersistenceError> {
    info!(event_id = %result.event_id, "Recording match result");

    diesel::insert_into(match_results::table)
        .values((
            match_results::event_id.eq(result.event_id.value()),
            match_results::score.eq(result.score.as_str()),
            match_results::winner_id.eq(result.winner.map(|id| id.value())),
            match_results::recorded_by.eq(result.recorded_by.value()),
            match_results::recorded_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    find_match_result(conn, result.event_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!("Result for event {} not found", result.event_id))
    })
}

/// Creates or replaces a player's training log for an event.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_training_log(
    conn: &mut SqliteConnection,
    entry: &NewTrainingLog,
) -> Result<TrainingLog, PersistenceError> {
    info!(
        event_id = %entry.event_id,
        player_id = %entry.player_id,
        attendance = %entry.attendance,
        "Logging training"
    );

    let rating: Option<i32> = entry.rating.map(|r| i32::from(r.value()));
    diesel::insert_into(training_logs::table)
        .values((
            training_logs::event_id.eq(entry.event_id.value()),
            training_logs::player_id.eq(entry.player_id.value()),
            training_logs::attendance.eq(entry.attendance.as_str()),
            training_logs::rating.eq(rating),
            training_logs::notes.eq(&entry.notes),
            training_logs::logged_by.eq(entry.logged_by.value()),
            training_logs::updated_at.eq(now_timestamp()?),
        ))
        .on_conflict((training_logs::event_id, training_logs::player_id))
        .do_update()
        .set((
            training_logs::attendance.eq(excluded(training_logs::attendance)),
            training_logs::rating.eq(excluded(training_logs::rating)),
            training_logs::notes.eq(excluded(training_logs::notes)),
            training_logs::logged_by.eq(excluded(training_logs::logged_by)),
            training_logs::updated_at.eq(excluded(training_logs::updated_at)),
        ))
        .execute(conn)?;

    find_training_log(conn, entry.event_id, entry.player_id)?.ok_or_else(|| {
        PersistenceError::NotFound(format!(
            "Training log for player {} at event {} not found",
            entry.player_id, entry.event_id
        ))
    })
}
