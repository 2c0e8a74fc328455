// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::activity::Activity;
use crate::role::{MembershipStatus, ParticipantRole, ParticipationStatus, Role};
use crate::schedule::TournamentScope;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a database identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a user account.
    UserId
);
id_type!(
    /// Identifies a team.
    TeamId
);
id_type!(
    /// Identifies a calendar event.
    EventId
);

/// Recurrence metadata attached to an event.
///
/// Recurrence is descriptive only; occurrences are not expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Whether the event repeats.
    pub is_recurring: bool,
    /// A free-form recurrence pattern (e.g. `weekly`).
    pub pattern: Option<String>,
}

/// An accepted or pending membership of a user in a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMembership {
    /// The member.
    pub user_id: UserId,
    /// The team.
    pub team_id: TeamId,
    /// The member's normalized role.
    pub role: Role,
    /// Whether the membership is active.
    pub status: MembershipStatus,
}

impl TeamMembership {
    /// Returns whether the membership counts for permission checks.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self.status, MembershipStatus::Accepted)
    }
}

/// A validated event that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendarEvent {
    pub team_id: TeamId,
    pub created_by: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub activity: Activity,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub tournament_scope: Option<TournamentScope>,
    pub recurrence: Recurrence,
    /// The event this one was cloned from, if any.
    pub original_event_id: Option<EventId>,
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub event_id: EventId,
    pub team_id: TeamId,
    pub created_by: UserId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub activity: Activity,
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
    pub tournament_scope: Option<TournamentScope>,
    pub recurrence: Recurrence,
    pub original_event_id: Option<EventId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl CalendarEvent {
    /// Returns the length of the event.
    #[must_use]
    pub fn duration(&self) -> time::Duration {
        self.end - self.start
    }
}

/// A participant to attach to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewParticipant {
    pub user_id: UserId,
    pub role: ParticipantRole,
    pub status: ParticipationStatus,
}

/// A persisted event participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub event_id: EventId,
    pub user_id: UserId,
    pub role: ParticipantRole,
    pub status: ParticipationStatus,
}

/// The inclusive time window used when listing events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventWindow {
    /// Only events starting at or after this instant.
    pub start: Option<OffsetDateTime>,
    /// Only events ending at or before this instant.
    pub end: Option<OffsetDateTime>,
}

impl EventWindow {
    /// Returns whether an event lies inside the window.
    #[must_use]
    pub fn contains(&self, start: OffsetDateTime, end: OffsetDateTime) -> bool {
        self.start.is_none_or(|from| start >= from) && self.end.is_none_or(|to| end <= to)
    }
}
