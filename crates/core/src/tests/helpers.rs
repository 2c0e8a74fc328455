// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{
    CalendarEvent, EventId, EventWindow, MatchResult, NewCalendarEvent, NewMatchResult,
    NewParticipant, NewTrainingLog, Participant, ParticipationStatus, Recurrence, TeamId,
    TrainingLog, UserId,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    CalendarStore, CreateEvent, EventStore, Identity, MembershipRecord, MembershipStore,
    ParticipantStore, ResultStore, StoreError,
};

pub const TEAM: TeamId = TeamId::new(1);
pub const OTHER_TEAM: TeamId = TeamId::new(2);

pub const COACH: UserId = UserId::new(1);
pub const PLAYER_A: UserId = UserId::new(10);
pub const PLAYER_B: UserId = UserId::new(11);
pub const PENDING_PLAYER: UserId = UserId::new(12);
pub const PARENT: UserId = UserId::new(20);
pub const OUTSIDER: UserId = UserId::new(30);

pub const fn identity(user_id: UserId) -> Identity {
    Identity::new(user_id, TEAM)
}

/// In-memory `CalendarStore` with snapshot rollback.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    pub memberships: Vec<MembershipRecord>,
    pub links: Vec<(UserId, UserId)>,
    pub events: Vec<CalendarEvent>,
    pub participants: Vec<Participant>,
    pub results: Vec<MatchResult>,
    pub training: Vec<TrainingLog>,
    pub fail_participant_writes: bool,
    next_id: i64,
}

impl FakeStore {
    pub fn add_member(&mut self, user_id: UserId, team_id: TeamId, role: &str, status: &str) {
        self.memberships.push(MembershipRecord {
            user_id,
            team_id,
            role: role.to_string(),
            status: status.to_string(),
        });
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// One coach, two players, one pending player, and a parent linked to
/// `PLAYER_A`. `OUTSIDER` plays for another team.
pub fn create_test_store() -> FakeStore {
    let mut store: FakeStore = FakeStore::default();
    store.add_member(COACH, TEAM, "creator", "accepted");
    store.add_member(PLAYER_A, TEAM, "player", "accepted");
    store.add_member(PLAYER_B, TEAM, "member", "accepted");
    store.add_member(PENDING_PLAYER, TEAM, "player", "pending");
    store.add_member(PARENT, TEAM, "parent", "accepted");
    store.add_member(OUTSIDER, OTHER_TEAM, "player", "accepted");
    store.links.push((PARENT, PLAYER_A));
    store
}

/// A team with a coach and exactly one player.
pub fn create_single_player_store() -> FakeStore {
    let mut store: FakeStore = FakeStore::default();
    store.add_member(COACH, TEAM, "coach", "accepted");
    store.add_member(PLAYER_A, TEAM, "player", "accepted");
    store.add_member(PARENT, TEAM, "parent", "accepted");
    store
}

pub fn create_test_command(activity: &str, participants: Vec<UserId>) -> CreateEvent {
    CreateEvent {
        title: String::from("Session"),
        description: None,
        location: Some(String::from("Court 1")),
        activity: activity.to_string(),
        start: datetime!(2025-01-10 10:00:00 UTC),
        end: Some(datetime!(2025-01-10 12:00:00 UTC)),
        end_touched: false,
        tournament_scope: None,
        participants,
        recurrence: Recurrence::default(),
    }
}

const NOW: OffsetDateTime = datetime!(2025-01-01 00:00:00 UTC);

impl MembershipStore for FakeStore {
    fn find_membership(
        &mut self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<Option<MembershipRecord>, StoreError> {
        Ok(self
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.team_id == team_id)
            .cloned())
    }

    fn find_team_players(&mut self, team_id: TeamId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .memberships
            .iter()
            .filter(|m| {
                m.team_id == team_id
                    && m.status == "accepted"
                    && courtside_domain::normalize_role(&m.role) == "player"
            })
            .map(|m| m.user_id)
            .collect())
    }

    fn find_members_by_ids(
        &mut self,
        team_id: TeamId,
        user_ids: &[UserId],
    ) -> Result<Vec<MembershipRecord>, StoreError> {
        Ok(self
            .memberships
            .iter()
            .filter(|m| m.team_id == team_id && user_ids.contains(&m.user_id))
            .cloned()
            .collect())
    }

    fn find_linked_children(&mut self, parent_id: UserId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .links
            .iter()
            .filter(|(parent, _)| *parent == parent_id)
            .map(|(_, child)| *child)
            .collect())
    }
}

impl EventStore for FakeStore {
    fn insert_event(&mut self, event: &NewCalendarEvent) -> Result<CalendarEvent, StoreError> {
        let event_id: EventId = EventId::new(self.next_id());
        let stored: CalendarEvent = CalendarEvent {
            event_id,
            team_id: event.team_id,
            created_by: event.created_by,
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            activity: event.activity,
            start: event.start,
            end: event.end,
            tournament_scope: event.tournament_scope,
            recurrence: event.recurrence.clone(),
            original_event_id: event.original_event_id,
            created_at: NOW,
            updated_at: NOW,
        };
        self.events.push(stored.clone());
        Ok(stored)
    }

    fn find_event(
        &mut self,
        event_id: EventId,
        team_id: TeamId,
    ) -> Result<Option<CalendarEvent>, StoreError> {
        Ok(self
            .events
            .iter()
            .find(|e| e.event_id == event_id && e.team_id == team_id)
            .cloned())
    }

    fn update_event(&mut self, event: &CalendarEvent) -> Result<CalendarEvent, StoreError> {
        let slot: &mut CalendarEvent = self
            .events
            .iter_mut()
            .find(|e| e.event_id == event.event_id)
            .ok_or_else(|| StoreError::NotFound(format!("event {}", event.event_id)))?;
        *slot = event.clone();
        Ok(slot.clone())
    }

    fn delete_event(&mut self, event_id: EventId, team_id: TeamId) -> Result<bool, StoreError> {
        let before: usize = self.events.len();
        self.events
            .retain(|e| !(e.event_id == event_id && e.team_id == team_id));
        if self.events.len() == before {
            return Ok(false);
        }
        self.participants.retain(|p| p.event_id != event_id);
        self.results.retain(|r| r.event_id != event_id);
        self.training.retain(|t| t.event_id != event_id);
        for event in &mut self.events {
            if event.original_event_id == Some(event_id) {
                event.original_event_id = None;
            }
        }
        Ok(true)
    }

    fn list_events(
        &mut self,
        team_id: TeamId,
        window: &EventWindow,
    ) -> Result<Vec<CalendarEvent>, StoreError> {
        let mut events: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|e| e.team_id == team_id && window.contains(e.start, e.end))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.start, e.event_id));
        Ok(events)
    }
}

impl ParticipantStore for FakeStore {
    fn replace_participants(
        &mut self,
        event_id: EventId,
        participants: &[NewParticipant],
    ) -> Result<(), StoreError> {
        if self.fail_participant_writes {
            return Err(StoreError::Backend(String::from("participant write failed")));
        }
        self.participants.retain(|p| p.event_id != event_id);
        self.participants
            .extend(participants.iter().map(|p| Participant {
                event_id,
                user_id: p.user_id,
                role: p.role,
                status: p.status,
            }));
        Ok(())
    }

    fn list_participants(
        &mut self,
        event_ids: &[EventId],
    ) -> Result<Vec<Participant>, StoreError> {
        Ok(self
            .participants
            .iter()
            .filter(|p| event_ids.contains(&p.event_id))
            .cloned()
            .collect())
    }

    fn set_participant_status(
        &mut self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<bool, StoreError> {
        match self
            .participants
            .iter_mut()
            .find(|p| p.event_id == event_id && p.user_id == user_id)
        {
            Some(participant) => {
                participant.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl ResultStore for FakeStore {
    fn find_match_result(&mut self, event_id: EventId) -> Result<Option<MatchResult>, StoreError> {
        Ok(self
            .results
            .iter()
            .find(|r| r.event_id == event_id)
            .cloned())
    }

    fn insert_match_result(&mut self, result: &NewMatchResult) -> Result<MatchResult, StoreError> {
        if self.results.iter().any(|r| r.event_id == result.event_id) {
            return Err(StoreError::Conflict(String::from("result exists")));
        }
        let stored: MatchResult = MatchResult {
            result_id: self.next_id(),
            event_id: result.event_id,
            score: result.score.clone(),
            winner: result.winner,
            recorded_by: result.recorded_by,
            recorded_at: NOW,
        };
        self.results.push(stored.clone());
        Ok(stored)
    }

    fn upsert_training_log(&mut self, entry: &NewTrainingLog) -> Result<TrainingLog, StoreError> {
        self.training
            .retain(|t| !(t.event_id == entry.event_id && t.player_id == entry.player_id));
        let stored: TrainingLog = TrainingLog {
            log_id: self.next_id(),
            event_id: entry.event_id,
            player_id: entry.player_id,
            attendance: entry.attendance,
            rating: entry.rating,
            notes: entry.notes.clone(),
            logged_by: entry.logged_by,
            updated_at: NOW,
        };
        self.training.push(stored.clone());
        Ok(stored)
    }
}

impl CalendarStore for FakeStore {
    fn atomically<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        let snapshot: Self = self.clone();
        let result: Result<T, E> = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
