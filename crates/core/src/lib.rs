// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event authoring core for the Courtside team calendar.
//!
//! Every operation takes the caller's [`Identity`] explicitly and reads and
//! writes only through the [`CalendarStore`] it is given.

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

mod error;
mod lifecycle;
mod participants;
mod permissions;
mod results;
mod store;

#[cfg(test)]
mod tests;

pub use error::{CoreError, RejectedParticipant};
pub use lifecycle::{
    CloneEvent, CreateEvent, EventDetails, UpdateEvent, clone_event, create_event, delete_event,
    get_event, list_visible_events, respond_to_event, update_event,
};
pub use participants::{
    ResolvedParticipant, ResolvedParticipants, participant_rows, resolve_participants,
};
pub use permissions::{
    Capabilities, Identity, Visibility, VisibilityScope, accepted_membership, authorize_create,
    authorize_modify, can_create, can_modify, require_membership, resolve_membership,
    visibility_scope,
};
pub use results::{LogTraining, RecordMatchResult, log_training, record_match_result};
pub use store::{
    CalendarStore, EventStore, MembershipRecord, MembershipStore, ParticipantStore, ResultStore,
    StoreError,
};
