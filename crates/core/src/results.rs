// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match results and training logs.

use courtside_domain::{
    AttendanceStatus, CalendarEvent, DomainError, EventId, MatchResult, MatchScore,
    NewMatchResult, NewTrainingLog, Participant, ParticipantRole, PerformanceRating, Role,
    TeamMembership, TrainingLog, UserId, ensure_competitive, ensure_training,
    validate_match_players,
};

use crate::error::CoreError;
use crate::permissions::{Identity, authorize_modify, require_membership};
use crate::store::CalendarStore;

/// Request to record the outcome of a match or sparring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordMatchResult {
    pub score: String,
    pub winner: Option<UserId>,
}

/// Request to log one player's attendance at a training event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTraining {
    pub player_id: UserId,
    /// `attended`, `missed`, or `late`.
    pub attendance: String,
    pub rating: Option<i64>,
    pub notes: Option<String>,
}

/// Records a match result.
///
/// Coaches and the two players of the match may record it. An event holds
/// at most one result.
///
/// # Errors
///
/// Returns an error if the event is missing, is not a match or sparring
/// session, does not have exactly two players, already has a result, the
/// score or winner is invalid, the caller may not record it, or the store
/// fails.
pub fn record_match_result<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
    cmd: RecordMatchResult,
) -> Result<MatchResult, CoreError> {
    let membership: TeamMembership = require_membership(store, identity, "record result")?;
    let event: CalendarEvent = store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;
    ensure_competitive(event.activity)?;

    let players: Vec<UserId> = store
        .list_participants(&[event_id])?
        .iter()
        .filter(|p| p.role == ParticipantRole::Player)
        .map(|p| p.user_id)
        .collect();

    if membership.role != Role::Coach && !players.contains(&identity.user_id) {
        return Err(CoreError::Forbidden {
            action: String::from("record result"),
            reason: String::from("Only coaches or the match players can record a result"),
        });
    }

    let score: MatchScore = MatchScore::parse(&cmd.score)?;
    validate_match_players(&players, cmd.winner)?;

    if store.find_match_result(event_id)?.is_some() {
        return Err(CoreError::Conflict {
            message: format!("Event {event_id} already has a result"),
        });
    }

    let result: NewMatchResult = NewMatchResult {
        event_id,
        score,
        winner: cmd.winner,
        recorded_by: identity.user_id,
    };
    store.atomically(|store| store.insert_match_result(&result).map_err(CoreError::from))
}

/// Logs a player's attendance and rating for a training event.
///
/// Only coaches may log training. Logging twice for the same player
/// replaces the earlier entry.
///
/// # Errors
///
/// Returns an error if the event is missing or is not a training activity,
/// the caller is not a coach, the player is not on the event, the
/// attendance or rating is invalid, or the store fails.
pub fn log_training<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
    cmd: LogTraining,
) -> Result<TrainingLog, CoreError> {
    let event: CalendarEvent = store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;
    authorize_modify(store, identity, "log training")?;
    ensure_training(event.activity)?;

    let attendance: AttendanceStatus = cmd.attendance.parse()?;
    let rating: Option<PerformanceRating> =
        cmd.rating.map(PerformanceRating::new).transpose()?;

    let participants: Vec<Participant> = store.list_participants(&[event_id])?;
    let is_player: bool = participants
        .iter()
        .any(|p| p.user_id == cmd.player_id && p.role == ParticipantRole::Player);
    if !is_player {
        return Err(DomainError::NotAPlayerParticipant(cmd.player_id).into());
    }

    let entry: NewTrainingLog = NewTrainingLog {
        event_id,
        player_id: cmd.player_id,
        attendance,
        rating,
        notes: cmd
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        logged_by: identity.user_id,
    };
    store.atomically(|store| store.upsert_training_log(&entry).map_err(CoreError::from))
}
