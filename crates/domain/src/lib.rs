// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for the Courtside team calendar.
//!
//! This crate is pure: it performs no I/O and holds no state. It owns the
//! activity and role vocabularies, the eligibility and creator tables, and
//! the end-time rules every other crate defers to.

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

mod activity;
mod error;
mod results;
mod role;
mod rules;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use activity::{Activity, normalize_activity};
pub use error::DomainError;
pub use results::{
    AttendanceStatus, MatchResult, MatchScore, NewMatchResult, NewTrainingLog, PerformanceRating,
    TrainingLog, ensure_competitive, ensure_training, validate_match_players,
};
pub use role::{
    MembershipStatus, ParticipantRole, ParticipationStatus, Role, normalize_role,
};
pub use rules::{creatable_activities, eligible_roles, is_eligible};
pub use schedule::{
    EDUCATION_DURATION, TournamentScope, compute_end_time, resolve_tournament_scope,
    truncate_to_second, validate_time_range,
};
pub use types::{
    CalendarEvent, EventId, EventWindow, NewCalendarEvent, NewParticipant, Participant,
    Recurrence, TeamId, TeamMembership, UserId,
};
pub use validation::{MAX_TITLE_LENGTH, validate_event, validate_title};
