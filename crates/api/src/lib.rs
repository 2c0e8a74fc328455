// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Courtside team calendar.
//!
//! This crate owns the request and response contract: it normalizes
//! loosely-typed payloads, authenticates sessions, runs the event core
//! against the persistence layer, and translates every failure into an
//! [`ApiError`] carrying a stable kind token.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService};
pub use capabilities::{NO_CAPABILITIES, compute_event_capabilities};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    accept_member, clone_event, create_event, create_team, delete_event, get_current_team,
    get_event, get_permissions, join_team, link_parent, list_events, log_training, login, logout,
    record_match_result, respond_to_event, select_team, signup, update_event,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AcceptMemberResponse, Capability, CloneEventRequest, CreateTeamRequest, CreateTeamResponse,
    DeleteEventResponse, EventCapabilities, EventInfo, EventRequest, JoinTeamRequest,
    JoinTeamResponse, LinkParentRequest, LinkParentResponse, ListEventsQuery, ListEventsResponse,
    LoginRequest, LoginResponse, MatchResultInfo, MatchResultRequest, MemberInfo,
    ParticipantInfo, ParticipantRef, PermissionsResponse, RejectedParticipantInfo, RsvpRequest,
    SelectTeamRequest, SelectTeamResponse, SignupRequest, SignupResponse, TeamDetailsResponse,
    TrainingLogInfo, TrainingLogRequest,
};
