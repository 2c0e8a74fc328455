// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests accept the legacy camel-case spellings as serde aliases so that
//! older clients keep working. Every event payload is reduced to one
//! canonical participant list before it reaches the core.

use courtside::EventDetails;
use courtside_domain::{MatchResult, Participant, TrainingLog, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;

// ========================================================================
// Accounts
// ========================================================================

/// API request to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    /// The login email. Stored lowercased.
    pub email: String,
    /// The name shown to teammates.
    #[serde(alias = "displayName", alias = "name")]
    pub display_name: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    /// The new user's ID.
    pub user_id: i64,
    /// The normalized email.
    pub email: String,
    /// The display name.
    pub display_name: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login email.
    pub email: String,
    /// The password.
    pub password: String,
    /// The team to act in. Defaults to the user's first accepted team.
    #[serde(default, alias = "teamId")]
    pub team_id: Option<i64>,
}

/// API response for successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The user's ID.
    pub user_id: i64,
    /// The user's display name.
    pub display_name: String,
    /// The team the session acts in, if any.
    pub team_id: Option<i64>,
    /// Session expiration timestamp (RFC 3339).
    pub expires_at: String,
}

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What the session's team role may do with calendar events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCapabilities {
    pub can_create_education: Capability,
    pub can_create_practice: Capability,
    pub can_create_gym: Capability,
    pub can_create_match: Capability,
    pub can_create_sparring: Capability,
    pub can_create_tournament: Capability,
    /// Edit, delete, and clone.
    pub can_modify_events: Capability,
    /// See every team event rather than only one's own.
    pub can_view_all_events: Capability,
}

/// API response for the permissions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsResponse {
    /// The session's team, if any.
    pub team_id: Option<i64>,
    /// The caller's accepted role in that team, if any.
    pub role: Option<String>,
    /// Activities the caller may create, in canonical order.
    pub creatable: Vec<String>,
    /// Per-action flags.
    pub capabilities: EventCapabilities,
}

// ========================================================================
// Teams
// ========================================================================

/// API request to create a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    /// The team name.
    pub name: String,
}

/// API response for a created team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTeamResponse {
    pub team_id: i64,
    pub name: String,
    /// The code other users join with.
    pub invite_code: String,
}

/// API request to join a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTeamRequest {
    #[serde(alias = "inviteCode", alias = "code")]
    pub invite_code: String,
    /// `player`, `parent`, or `coach`.
    pub role: String,
}

/// API response for a join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinTeamResponse {
    pub team_id: i64,
    pub team_name: String,
    pub role: String,
    /// `accepted`, or `pending` for coaches awaiting approval.
    pub status: String,
}

/// API request to switch the session's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectTeamRequest {
    #[serde(alias = "teamId")]
    pub team_id: i64,
}

/// API response for a team switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectTeamResponse {
    pub team_id: i64,
    pub role: String,
}

/// A team member as listed in team details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub status: String,
}

/// API response for the current team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetailsResponse {
    pub team_id: i64,
    pub name: String,
    /// Only shown to coaches.
    pub invite_code: Option<String>,
    /// The caller's role.
    pub role: String,
    pub members: Vec<MemberInfo>,
}

/// API response for an accepted member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptMemberResponse {
    pub team_id: i64,
    pub user_id: i64,
    pub status: String,
}

/// API request to link a parent to a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkParentRequest {
    #[serde(alias = "parentId")]
    pub parent_id: i64,
    #[serde(alias = "childId", alias = "player_id", alias = "playerId")]
    pub child_id: i64,
}

/// API response for a created parent link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkParentResponse {
    pub parent_id: i64,
    pub child_id: i64,
}

// ========================================================================
// Calendar events
// ========================================================================

/// One entry of a loosely-typed participant list.
///
/// Clients send bare IDs, numeric strings, or `{ "user_id": n }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantRef {
    /// A bare numeric ID.
    Id(i64),
    /// An ID sent as text.
    Text(String),
    /// An object carrying the ID.
    Object {
        #[serde(alias = "userId", alias = "id")]
        user_id: i64,
    },
}

impl ParticipantRef {
    fn user_id(&self) -> Result<UserId, ApiError> {
        match self {
            Self::Id(id) | Self::Object { user_id: id } => Ok(UserId::new(*id)),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(UserId::new)
                .map_err(|_| ApiError::InvalidInput {
                    field: String::from("participants"),
                    message: format!("'{text}' is not a user ID"),
                }),
        }
    }
}

/// API request to create or update an event.
///
/// Creation requires `title`, `event_type`, and `start`. Updates apply only
/// the fields that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// The activity label, in any accepted spelling.
    #[serde(
        default,
        alias = "eventType",
        alias = "activity_type",
        alias = "activityType",
        alias = "activity",
        alias = "type"
    )]
    pub event_type: Option<String>,
    #[serde(
        default,
        alias = "startISO",
        alias = "start_time",
        alias = "startTime",
        with = "time::serde::rfc3339::option"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        default,
        alias = "endISO",
        alias = "end_time",
        alias = "endTime",
        with = "time::serde::rfc3339::option"
    )]
    pub end: Option<OffsetDateTime>,
    /// Whether the user edited the end time by hand.
    #[serde(default, alias = "endTouched")]
    pub end_touched: Option<bool>,
    #[serde(default, alias = "tournamentScope")]
    pub tournament_scope: Option<String>,
    #[serde(default)]
    pub participants: Option<Vec<ParticipantRef>>,
    #[serde(default, alias = "participantUserIds")]
    pub participant_user_ids: Option<Vec<ParticipantRef>>,
    #[serde(default, alias = "isRecurring")]
    pub is_recurring: Option<bool>,
    #[serde(default, alias = "recurrencePattern")]
    pub recurrence_pattern: Option<String>,
}

impl EventRequest {
    /// Merges every participant field into one ID list.
    ///
    /// Returns `None` when the request names no participant field at all.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if an entry is not a user ID.
    pub fn participant_ids(&self) -> Result<Option<Vec<UserId>>, ApiError> {
        if self.participants.is_none() && self.participant_user_ids.is_none() {
            return Ok(None);
        }
        let ids: Vec<UserId> = self
            .participants
            .iter()
            .chain(self.participant_user_ids.iter())
            .flatten()
            .map(ParticipantRef::user_id)
            .collect::<Result<Vec<UserId>, ApiError>>()?;
        Ok(Some(ids))
    }
}

/// API request to clone an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneEventRequest {
    #[serde(
        default,
        alias = "startISO",
        alias = "startTime",
        with = "time::serde::rfc3339::option"
    )]
    pub start: Option<OffsetDateTime>,
    #[serde(
        default,
        alias = "endISO",
        alias = "endTime",
        with = "time::serde::rfc3339::option"
    )]
    pub end: Option<OffsetDateTime>,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsQuery {
    /// Only events starting at or after this RFC 3339 instant.
    #[serde(default)]
    pub start: Option<String>,
    /// Only events ending at or before this RFC 3339 instant.
    #[serde(default)]
    pub end: Option<String>,
}

/// API request to answer an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpRequest {
    /// `confirmed` or `declined`.
    pub status: String,
}

/// A participant as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub user_id: i64,
    pub role: String,
    pub status: String,
}

impl From<&Participant> for ParticipantInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            user_id: participant.user_id.value(),
            role: participant.role.as_str().to_string(),
            status: participant.status.as_str().to_string(),
        }
    }
}

/// A calendar event as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub event_id: i64,
    pub team_id: i64,
    pub created_by: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// The canonical activity tag.
    pub event_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
    pub tournament_scope: Option<String>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    /// The event this one was cloned from.
    pub original_event_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub participants: Vec<ParticipantInfo>,
}

impl From<EventDetails> for EventInfo {
    fn from(details: EventDetails) -> Self {
        let EventDetails {
            event,
            participants,
        } = details;
        Self {
            event_id: event.event_id.value(),
            team_id: event.team_id.value(),
            created_by: event.created_by.value(),
            title: event.title,
            description: event.description,
            location: event.location,
            event_type: event.activity.as_str().to_string(),
            start: event.start,
            end: event.end,
            tournament_scope: event.tournament_scope.map(|s| s.as_str().to_string()),
            is_recurring: event.recurrence.is_recurring,
            recurrence_pattern: event.recurrence.pattern,
            original_event_id: event.original_event_id.map(|id| id.value()),
            created_at: event.created_at,
            updated_at: event.updated_at,
            participants: participants.iter().map(ParticipantInfo::from).collect(),
        }
    }
}

/// API response for listing events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<EventInfo>,
}

/// API response for a deleted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    pub event_id: i64,
    pub message: String,
}

/// A rejected participant in an `invalid_participants` error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedParticipantInfo {
    pub user_id: i64,
    /// The user's team role, as stored.
    pub role: String,
}

// ========================================================================
// Results
// ========================================================================

/// API request to record a match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResultRequest {
    /// Sets such as `6-4 7-5`.
    pub score: String,
    #[serde(default, alias = "winnerId", alias = "winner")]
    pub winner_id: Option<i64>,
}

/// A recorded match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResultInfo {
    pub result_id: i64,
    pub event_id: i64,
    pub score: String,
    pub winner_id: Option<i64>,
    pub recorded_by: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}

impl From<MatchResult> for MatchResultInfo {
    fn from(result: MatchResult) -> Self {
        Self {
            result_id: result.result_id,
            event_id: result.event_id.value(),
            score: result.score.as_str().to_string(),
            winner_id: result.winner.map(|id| id.value()),
            recorded_by: result.recorded_by.value(),
            recorded_at: result.recorded_at,
        }
    }
}

/// API request to log a player's training attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingLogRequest {
    #[serde(alias = "playerId")]
    pub player_id: i64,
    /// `attended`, `missed`, or `late`.
    pub attendance: String,
    /// 1 to 10.
    #[serde(
        default,
        alias = "performance_rating",
        alias = "performanceRating"
    )]
    pub rating: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A logged training entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingLogInfo {
    pub log_id: i64,
    pub event_id: i64,
    pub player_id: i64,
    pub attendance: String,
    pub rating: Option<u8>,
    pub notes: Option<String>,
    pub logged_by: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<TrainingLog> for TrainingLogInfo {
    fn from(log: TrainingLog) -> Self {
        Self {
            log_id: log.log_id,
            event_id: log.event_id.value(),
            player_id: log.player_id.value(),
            attendance: log.attendance.as_str().to_string(),
            rating: log.rating.map(|r| r.value()),
            notes: log.notes,
            logged_by: log.logged_by.value(),
            updated_at: log.updated_at,
        }
    }
}
