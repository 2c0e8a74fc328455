// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator traits the core reads and writes through.
//!
//! The core owns no I/O. Every operation receives a store implementing these
//! traits; the persistence crate provides the database-backed implementation.

use courtside_domain::{
    CalendarEvent, EventId, EventWindow, MatchResult, NewCalendarEvent, NewMatchResult,
    NewParticipant, NewTrainingLog, Participant, ParticipationStatus, TeamId, TrainingLog, UserId,
};

/// Errors raised by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// The row to modify does not exist.
    NotFound(String),
    /// Any other backend failure.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Backend(msg) => write!(f, "Store failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A team membership row as stored.
///
/// Role and status are kept raw; the permission engine normalizes them and
/// fails closed on anything it does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipRecord {
    pub user_id: UserId,
    pub team_id: TeamId,
    pub role: String,
    pub status: String,
}

/// Team membership lookups.
pub trait MembershipStore {
    /// Returns the membership of a user in a team, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_membership(
        &mut self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<MembershipRecord>, StoreError>;

    /// Returns every accepted player of a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_team_players(&mut self, team_id: TeamId) -> Result<Vec<UserId>, StoreError>;

    /// Returns the memberships of the given users in a team, whatever their
    /// status. Users without a membership are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_members_by_ids(
        &mut self,
        team_id: TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<MembershipRecord>, StoreError>;

    /// Returns the children linked to a parent.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_linked_children(&mut self, parent_id: UserId) -> Result<Vec<UserId>, StoreError>;
}

/// Calendar event rows.
pub trait EventStore {
    /// Inserts an event and returns it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn insert_event(&mut self, event: &NewCalendarEvent) -> Result<CalendarEvent, StoreError>;

    /// Fetches an event, scoped to the team that owns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_event(
        &mut self,
        event_id: EventId,
        team_id: TeamId,
    ) -> Result<Option<CalendarEvent>, StoreError>;

    /// Overwrites the mutable fields of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails or the event no longer exists.
    fn update_event(&mut self, event: &CalendarEvent) -> Result<CalendarEvent, StoreError>;

    /// Deletes an event. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete_event(&mut self, event_id: EventId, team_id: TeamId) -> Result<bool, StoreError>;

    /// Lists a team's events inside a window, ordered by start.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn list_events(
        &mut self,
        team_id: TeamId,
        window: &EventWindow,
    ) -> Result<Vec<CalendarEvent>, StoreError>;
}

/// Event participant rows.
pub trait ParticipantStore {
    /// Replaces the full participant set of an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn replace_participants(
        &mut self,
        event_id: EventId,
        participants: &[NewParticipant],
    ) -> Result<(), StoreError>;

    /// Lists the participants of several events at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn list_participants(&mut self, event_ids: &[EventId])
    -> Result<Vec<Participant>, StoreError>;

    /// Records a participant's response. Returns whether a row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn set_participant_status(
        &mut self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<bool, StoreError>;
}

/// Match results and training logs.
pub trait ResultStore {
    /// Returns the result recorded for an event, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_match_result(&mut self, event_id: EventId) -> Result<Option<MatchResult>, StoreError>;

    /// Records a match result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the event already has a result.
    fn insert_match_result(&mut self, result: &NewMatchResult) -> Result<MatchResult, StoreError>;

    /// Creates or replaces the training log of one player for one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn upsert_training_log(&mut self, entry: &NewTrainingLog) -> Result<TrainingLog, StoreError>;
}

/// Everything the lifecycle orchestrator needs, plus a unit of work.
pub trait CalendarStore: MembershipStore + EventStore + ParticipantStore + ResultStore {
    /// Runs `f` so that either all of its writes land or none do.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a store error if the unit of work
    /// cannot be started or committed.
    fn atomically<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>;
}
