// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event lifecycle: create, update, delete, clone, read, and respond.
//!
//! Each operation validates completely before its first write, and all of
//! its writes run inside one `CalendarStore::atomically` unit.

use courtside_domain::{
    Activity, CalendarEvent, DomainError, EventId, EventWindow, NewCalendarEvent, NewParticipant,
    Participant, ParticipationStatus, Recurrence, TeamMembership, TournamentScope, UserId,
    compute_end_time, resolve_tournament_scope, truncate_to_second, validate_event,
    validate_time_range, validate_title,
};
use time::{Duration, OffsetDateTime};

use crate::error::CoreError;
use crate::participants::{ResolvedParticipants, participant_rows, resolve_participants};
use crate::permissions::{
    Identity, Visibility, authorize_create, authorize_modify, require_membership,
};
use crate::store::CalendarStore;

/// Request to create an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// The raw activity, normalized before use.
    pub activity: String,
    pub start: OffsetDateTime,
    pub end: Option<OffsetDateTime>,
    /// Whether the client explicitly chose the end time.
    pub end_touched: bool,
    pub tournament_scope: Option<String>,
    pub participants: Vec<UserId>,
    pub recurrence: Recurrence,
}

/// Request to update an event. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub activity: Option<String>,
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
    pub end_touched: bool,
    pub tournament_scope: Option<String>,
    pub participants: Option<Vec<UserId>>,
    pub recurrence: Option<Recurrence>,
}

impl UpdateEvent {
    /// Returns whether the update touches anything the end time depends on.
    const fn affects_end_time(&self) -> bool {
        self.activity.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.tournament_scope.is_some()
            || self.end_touched
    }
}

/// Request to clone an event, optionally moving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloneEvent {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
}

/// An event together with its participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub event: CalendarEvent,
    pub participants: Vec<Participant>,
}

/// Creates an event.
///
/// # Arguments
///
/// * `store` - The calendar store
/// * `identity` - The caller
/// * `cmd` - The event to create
///
/// # Errors
///
/// Returns an error if the activity is unknown, the caller may not create
/// it, the end time cannot be determined, the participants are invalid, or
/// the store fails.
pub fn create_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    cmd: CreateEvent,
) -> Result<EventDetails, CoreError> {
    let activity: Activity = Activity::parse(&cmd.activity)?;
    authorize_create(store, identity, activity)?;

    let scope: Option<TournamentScope> =
        resolve_tournament_scope(activity, cmd.tournament_scope.as_deref())?;
    let start: OffsetDateTime = truncate_to_second(cmd.start);
    let end: OffsetDateTime = compute_end_time(
        activity,
        start,
        scope,
        cmd.end.map(truncate_to_second),
        cmd.end_touched,
    )?;
    let resolved: ResolvedParticipants =
        resolve_participants(store, identity.team_id, activity, &cmd.participants)?;

    let new_event: NewCalendarEvent = NewCalendarEvent {
        team_id: identity.team_id,
        created_by: identity.user_id,
        title: cmd.title.trim().to_string(),
        description: non_blank(cmd.description),
        location: non_blank(cmd.location),
        activity,
        start,
        end,
        tournament_scope: scope,
        recurrence: cmd.recurrence,
        original_event_id: None,
    };
    validate_event(&new_event)?;

    let rows: Vec<NewParticipant> = participant_rows(&resolved, identity.user_id, &[]);
    store.atomically(|store| insert_with_participants(store, &new_event, &rows))
}

/// Updates an event in place.
///
/// Only supplied fields change. The end time is recomputed whenever
/// something it depends on is supplied, and the participant set is
/// revalidated whenever the activity changes or a new list is supplied.
///
/// # Errors
///
/// Returns an error if the event is not in the caller's team, the caller is
/// not a coach, the merged event is invalid, or the store fails.
pub fn update_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
    cmd: UpdateEvent,
) -> Result<EventDetails, CoreError> {
    let existing: CalendarEvent = store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;
    authorize_modify(store, identity, "update event")?;

    let activity: Activity = match cmd.activity.as_deref() {
        Some(raw) => Activity::parse(raw)?,
        None => existing.activity,
    };
    let activity_changed: bool = activity != existing.activity;
    let start: OffsetDateTime = cmd.start.map_or(existing.start, truncate_to_second);

    let scope: Option<TournamentScope> = match cmd.tournament_scope.as_deref() {
        Some(raw) => resolve_tournament_scope(activity, Some(raw))?,
        None if activity == Activity::Tournament => existing.tournament_scope,
        None => None,
    };

    let end: OffsetDateTime = if cmd.affects_end_time() {
        compute_end_time(
            activity,
            start,
            scope,
            cmd.end.map(truncate_to_second).or(Some(existing.end)),
            cmd.end_touched,
        )?
    } else {
        existing.end
    };

    let current: Vec<Participant> = store.list_participants(&[event_id])?;
    let rows: Option<Vec<NewParticipant>> = if activity_changed || cmd.participants.is_some() {
        let proposed: Vec<UserId> = cmd
            .participants
            .clone()
            .unwrap_or_else(|| current.iter().map(|p| p.user_id).collect());
        let resolved: ResolvedParticipants =
            resolve_participants(store, identity.team_id, activity, &proposed)?;
        Some(participant_rows(&resolved, existing.created_by, &current))
    } else {
        None
    };

    let updated: CalendarEvent = CalendarEvent {
        title: cmd.title.map_or_else(
            || existing.title.clone(),
            |title| title.trim().to_string(),
        ),
        description: cmd
            .description
            .map_or_else(|| existing.description.clone(), |d| non_blank(Some(d))),
        location: cmd
            .location
            .map_or_else(|| existing.location.clone(), |l| non_blank(Some(l))),
        activity,
        start,
        end,
        tournament_scope: scope,
        recurrence: cmd.recurrence.unwrap_or_else(|| existing.recurrence.clone()),
        ..existing
    };
    validate_title(&updated.title)?;
    validate_time_range(updated.start, updated.end)?;

    store.atomically(|store| {
        let event: CalendarEvent = store.update_event(&updated)?;
        if let Some(rows) = &rows {
            store.replace_participants(event.event_id, rows)?;
        }
        let participants: Vec<Participant> = store.list_participants(&[event.event_id])?;
        Ok(EventDetails {
            event,
            participants,
        })
    })
}

/// Deletes an event along with its participants, result, and training logs.
///
/// # Errors
///
/// Returns an error if the event is not in the caller's team, the caller is
/// not a coach, or the store fails.
pub fn delete_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
) -> Result<(), CoreError> {
    store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;
    authorize_modify(store, identity, "delete event")?;

    let deleted: bool =
        store.atomically(|store| store.delete_event(event_id, identity.team_id))?;
    if !deleted {
        return Err(CoreError::event_not_found(event_id));
    }
    Ok(())
}

/// Copies an event into a new one authored by the caller.
///
/// A start override without an end override keeps the source's duration.
/// The source's participants are revalidated against the team as it is now.
///
/// # Errors
///
/// Returns an error if the source is not in the caller's team, the caller
/// may not create its activity, the moved event is invalid, the copied
/// participants no longer validate, or the store fails.
pub fn clone_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    source_id: EventId,
    cmd: CloneEvent,
) -> Result<EventDetails, CoreError> {
    let source: CalendarEvent = store
        .find_event(source_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(source_id))?;
    authorize_create(store, identity, source.activity)?;

    let requested_start: Option<OffsetDateTime> = cmd.start.map(truncate_to_second);
    let requested_end: Option<OffsetDateTime> = cmd.end.map(truncate_to_second);
    let start: OffsetDateTime = requested_start.unwrap_or(source.start);
    let end: OffsetDateTime = match (requested_start, requested_end) {
        (_, Some(end)) => end,
        (Some(start), None) => shift(start, source.duration())?,
        (None, None) => source.end,
    };

    let source_participants: Vec<UserId> = store
        .list_participants(&[source_id])?
        .iter()
        .map(|p| p.user_id)
        .collect();
    let resolved: ResolvedParticipants = resolve_participants(
        store,
        identity.team_id,
        source.activity,
        &source_participants,
    )?;

    let new_event: NewCalendarEvent = NewCalendarEvent {
        team_id: identity.team_id,
        created_by: identity.user_id,
        title: source.title,
        description: source.description,
        location: source.location,
        activity: source.activity,
        start,
        end,
        tournament_scope: source.tournament_scope,
        recurrence: source.recurrence,
        original_event_id: Some(source.event_id),
    };
    validate_event(&new_event)?;

    let rows: Vec<NewParticipant> = participant_rows(&resolved, identity.user_id, &[]);
    store.atomically(|store| insert_with_participants(store, &new_event, &rows))
}

/// Returns an event if the caller may see it.
///
/// Events outside the caller's visibility are reported as not found.
///
/// # Errors
///
/// Returns an error if the caller has no accepted membership, the event is
/// missing or hidden, or the store fails.
pub fn get_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
) -> Result<EventDetails, CoreError> {
    let membership: TeamMembership = require_membership(store, identity, "view event")?;
    let event: CalendarEvent = store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;
    let participants: Vec<Participant> = store.list_participants(&[event_id])?;

    let visibility: Visibility = Visibility::resolve(store, &membership)?;
    if !visibility.admits(&event, &participants) {
        return Err(CoreError::event_not_found(event_id));
    }
    Ok(EventDetails {
        event,
        participants,
    })
}

/// Lists the team events inside a window that the caller may see.
///
/// # Errors
///
/// Returns an error if the caller has no accepted membership or the store
/// fails.
pub fn list_visible_events<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    window: &EventWindow,
) -> Result<Vec<EventDetails>, CoreError> {
    let membership: TeamMembership = require_membership(store, identity, "list events")?;
    let visibility: Visibility = Visibility::resolve(store, &membership)?;

    let events: Vec<CalendarEvent> = store.list_events(identity.team_id, window)?;
    let event_ids: Vec<EventId> = events.iter().map(|e| e.event_id).collect();
    let participants: Vec<Participant> = if event_ids.is_empty() {
        Vec::new()
    } else {
        store.list_participants(&event_ids)?
    };

    Ok(events
        .into_iter()
        .filter(|event| visibility.admits(event, &participants))
        .map(|event| {
            let own: Vec<Participant> = participants
                .iter()
                .filter(|p| p.event_id == event.event_id)
                .cloned()
                .collect();
            EventDetails {
                event,
                participants: own,
            }
        })
        .collect())
}

/// Records the caller's response to an event they participate in.
///
/// # Errors
///
/// Returns an error if the caller has no accepted membership, the event is
/// missing, the caller is not a participant, or the store fails.
pub fn respond_to_event<S: CalendarStore>(
    store: &mut S,
    identity: &Identity,
    event_id: EventId,
    status: ParticipationStatus,
) -> Result<EventDetails, CoreError> {
    require_membership(store, identity, "respond to event")?;
    let event: CalendarEvent = store
        .find_event(event_id, identity.team_id)?
        .ok_or_else(|| CoreError::event_not_found(event_id))?;

    let updated: bool = store.atomically(|store| {
        store.set_participant_status(event_id, identity.user_id, status)
    })?;
    if !updated {
        return Err(CoreError::NotFound {
            resource: String::from("participant"),
            message: format!(
                "User {} is not a participant of event {event_id}",
                identity.user_id
            ),
        });
    }

    let participants: Vec<Participant> = store.list_participants(&[event_id])?;
    Ok(EventDetails {
        event,
        participants,
    })
}

fn insert_with_participants<S: CalendarStore>(
    store: &mut S,
    new_event: &NewCalendarEvent,
    rows: &[NewParticipant],
) -> Result<EventDetails, CoreError> {
    let event: CalendarEvent = store.insert_event(new_event)?;
    store.replace_participants(event.event_id, rows)?;
    let participants: Vec<Participant> = store.list_participants(&[event.event_id])?;
    Ok(EventDetails {
        event,
        participants,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn shift(start: OffsetDateTime, duration: Duration) -> Result<OffsetDateTime, CoreError> {
    start.checked_add(duration).ok_or_else(|| {
        CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
            operation: format!("shifting clone to {start}"),
        })
    })
}
