// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Handlers translate requests into core commands, run them against the
//! persistence layer, and translate results and errors into the API
//! contract. Every team-scoped handler takes the caller explicitly as an
//! [`AuthenticatedUser`].

use std::str::FromStr;

use courtside::{
    Capabilities, CloneEvent, CoreError, CreateEvent, EventDetails, Identity, LogTraining,
    RecordMatchResult, UpdateEvent, require_membership, resolve_membership,
};
use courtside_domain::{
    EventId, EventWindow, MatchResult, MembershipStatus, ParticipationStatus, Recurrence, Role,
    TeamId, TeamMembership, TrainingLog, UserId,
};
use courtside_persistence::{MemberData, Persistence, PersistenceError, TeamData};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::auth::{AuthenticatedUser, AuthenticationService};
use crate::capabilities::{NO_CAPABILITIES, compute_event_capabilities};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AcceptMemberResponse, CloneEventRequest, CreateTeamRequest, CreateTeamResponse,
    DeleteEventResponse, EventInfo, EventRequest, JoinTeamRequest, JoinTeamResponse,
    LinkParentRequest, LinkParentResponse, ListEventsQuery, ListEventsResponse, LoginRequest,
    LoginResponse, MatchResultInfo, MatchResultRequest, MemberInfo, PermissionsResponse,
    RsvpRequest, SelectTeamRequest, SelectTeamResponse, SignupRequest, SignupResponse,
    TeamDetailsResponse, TrainingLogInfo, TrainingLogRequest,
};

/// How many invite codes to try before giving up on a collision streak.
const INVITE_CODE_ATTEMPTS: usize = 5;

// ========================================================================
// Accounts
// ========================================================================

/// Creates a user account.
///
/// # Errors
///
/// Returns an error if:
/// - The email or display name is malformed
/// - The password violates the password policy
/// - The email is already registered
/// - Database operations fail
pub fn signup(
    persistence: &mut Persistence,
    request: &SignupRequest,
) -> Result<SignupResponse, ApiError> {
    let email: String = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("A valid email address is required"),
        });
    }

    let display_name: &str = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::missing_field("display_name"));
    }

    PasswordPolicy::default().validate(&request.password, &email)?;

    let user_id: i64 = persistence
        .create_user(&email, display_name, &request.password)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => ApiError::Conflict {
                message: String::from("Email is already registered"),
            },
            other => translate_persistence_error(other, "User"),
        })?;

    Ok(SignupResponse {
        user_id,
        email,
        display_name: display_name.to_string(),
    })
}

/// Logs a user in and creates a session.
///
/// # Errors
///
/// Returns an error if the credentials are invalid, the requested team is
/// not one of the user's accepted teams, or the session cannot be created.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
    session_lifetime: Duration,
) -> Result<LoginResponse, ApiError> {
    let (user, expires_at): (AuthenticatedUser, String) = AuthenticationService::login(
        persistence,
        &request.email,
        &request.password,
        request.team_id,
        session_lifetime,
    )?;

    Ok(LoginResponse {
        session_token: user.session_token,
        user_id: user.user_id.value(),
        display_name: user.display_name,
        team_id: user.team_id.map(|id| id.value()),
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns what the caller may do in the session's team.
///
/// Callers without a team, or without an accepted membership in it, get a
/// response with every capability denied.
///
/// # Errors
///
/// Returns an error if the membership lookup fails.
pub fn get_permissions(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
) -> Result<PermissionsResponse, ApiError> {
    let membership: Option<TeamMembership> = match user.team_id {
        Some(team_id) => resolve_membership(persistence, &Identity::new(user.user_id, team_id))
            .map_err(|e| ApiError::from(CoreError::from(e)))?,
        None => None,
    };

    let response: PermissionsResponse = match membership {
        Some(membership) => {
            let capabilities: Capabilities = Capabilities::for_role(membership.role);
            PermissionsResponse {
                team_id: Some(membership.team_id.value()),
                role: Some(membership.role.as_str().to_string()),
                creatable: capabilities
                    .creatable
                    .iter()
                    .map(|activity| activity.as_str().to_string())
                    .collect(),
                capabilities: compute_event_capabilities(&capabilities),
            }
        }
        None => PermissionsResponse {
            team_id: user.team_id.map(|id| id.value()),
            role: None,
            creatable: Vec::new(),
            capabilities: NO_CAPABILITIES,
        },
    };

    Ok(response)
}

// ========================================================================
// Teams
// ========================================================================

/// Creates a team and makes the caller its accepted coach.
///
/// The caller's session switches to the new team.
///
/// # Errors
///
/// Returns an error if the name is empty, no free invite code is found, or
/// database operations fail.
pub fn create_team(
    persistence: &mut Persistence,
    request: &CreateTeamRequest,
    user: &AuthenticatedUser,
) -> Result<CreateTeamResponse, ApiError> {
    let name: &str = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::missing_field("name"));
    }

    let mut attempt: usize = 0;
    let (team_id, invite_code): (i64, String) = loop {
        attempt += 1;
        let invite_code: String = generate_invite_code();
        match persistence.create_team(name, &invite_code, user.user_id.value()) {
            Ok(team_id) => break (team_id, invite_code),
            Err(PersistenceError::UniqueViolation(_)) if attempt < INVITE_CODE_ATTEMPTS => {
                warn!(attempt, "Invite code collision, retrying");
            }
            Err(e) => return Err(translate_persistence_error(e, "Team")),
        }
    };

    persistence
        .set_session_team(&user.session_token, team_id)
        .map_err(|e| translate_persistence_error(e, "Session"))?;

    info!(team_id, user_id = user.user_id.value(), "Team created");

    Ok(CreateTeamResponse {
        team_id,
        name: name.to_string(),
        invite_code,
    })
}

/// Joins a team by invite code.
///
/// Players and parents are accepted immediately; coaches wait for an
/// accepted coach to approve them. A session without a team switches to
/// the joined team once the membership is accepted.
///
/// # Errors
///
/// Returns an error if the role is unknown, the invite code matches no
/// team, the caller is already a member, or database operations fail.
pub fn join_team(
    persistence: &mut Persistence,
    request: &JoinTeamRequest,
    user: &AuthenticatedUser,
) -> Result<JoinTeamResponse, ApiError> {
    let role: Role = Role::parse(&request.role).map_err(translate_domain_error)?;

    let team: TeamData = persistence
        .get_team_by_invite_code(&request.invite_code)
        .map_err(|e| translate_persistence_error(e, "Team"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Team"),
            message: String::from("No team matches that invite code"),
        })?;

    let status: MembershipStatus = if role == Role::Coach {
        MembershipStatus::Pending
    } else {
        MembershipStatus::Accepted
    };

    persistence
        .add_member(team.team_id, user.user_id.value(), role, status)
        .map_err(|e| match e {
            PersistenceError::UniqueViolation(_) => ApiError::Conflict {
                message: String::from("Already a member of this team"),
            },
            other => translate_persistence_error(other, "Membership"),
        })?;

    if user.team_id.is_none() && status == MembershipStatus::Accepted {
        persistence
            .set_session_team(&user.session_token, team.team_id)
            .map_err(|e| translate_persistence_error(e, "Session"))?;
    }

    info!(
        team_id = team.team_id,
        user_id = user.user_id.value(),
        role = role.as_str(),
        status = status.as_str(),
        "User joined team"
    );

    Ok(JoinTeamResponse {
        team_id: team.team_id,
        team_name: team.name,
        role: role.as_str().to_string(),
        status: status.as_str().to_string(),
    })
}

/// Switches the session to another of the caller's teams.
///
/// # Errors
///
/// Returns an error if the caller has no accepted membership in the team,
/// or database operations fail.
pub fn select_team(
    persistence: &mut Persistence,
    request: &SelectTeamRequest,
    user: &AuthenticatedUser,
) -> Result<SelectTeamResponse, ApiError> {
    let identity: Identity = Identity::new(user.user_id, TeamId::new(request.team_id));
    let membership: TeamMembership = require_membership(persistence, &identity, "select team")?;

    persistence
        .set_session_team(&user.session_token, request.team_id)
        .map_err(|e| translate_persistence_error(e, "Session"))?;

    Ok(SelectTeamResponse {
        team_id: request.team_id,
        role: membership.role.as_str().to_string(),
    })
}

/// Returns the session team's details and member list.
///
/// The invite code is only shown to coaches.
///
/// # Errors
///
/// Returns an error if the session has no team, the caller is not an
/// accepted member, or database operations fail.
pub fn get_current_team(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
) -> Result<TeamDetailsResponse, ApiError> {
    let identity: Identity = user.identity()?;
    let membership: TeamMembership = require_membership(persistence, &identity, "view team")?;

    let team: TeamData = persistence
        .get_team_by_id(identity.team_id.value())
        .map_err(|e| translate_persistence_error(e, "Team"))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Team"),
            message: format!("Team {} does not exist", identity.team_id),
        })?;

    let members: Vec<MemberData> = persistence
        .list_team_members(team.team_id)
        .map_err(|e| translate_persistence_error(e, "Team"))?;

    let invite_code: Option<String> = (membership.role == Role::Coach).then_some(team.invite_code);

    Ok(TeamDetailsResponse {
        team_id: team.team_id,
        name: team.name,
        invite_code,
        role: membership.role.as_str().to_string(),
        members: members
            .into_iter()
            .map(|member| MemberInfo {
                user_id: member.user_id,
                email: member.email,
                display_name: member.display_name,
                role: member.role,
                status: member.status,
            })
            .collect(),
    })
}

/// Accepts a pending member of the session's team.
///
/// # Errors
///
/// Returns an error if the caller is not a coach, the user is not a member
/// of the team, or database operations fail.
pub fn accept_member(
    persistence: &mut Persistence,
    member_id: i64,
    user: &AuthenticatedUser,
) -> Result<AcceptMemberResponse, ApiError> {
    let identity: Identity = user.identity()?;
    require_coach(persistence, &identity, "accept member")?;

    persistence
        .accept_member(identity.team_id.value(), member_id)
        .map_err(|e| translate_persistence_error(e, "Membership"))?;

    info!(
        team_id = identity.team_id.value(),
        member_id, "Member accepted"
    );

    Ok(AcceptMemberResponse {
        team_id: identity.team_id.value(),
        user_id: member_id,
        status: MembershipStatus::Accepted.as_str().to_string(),
    })
}

/// Links a parent member to a player member of the session's team.
///
/// # Errors
///
/// Returns an error if the caller is not a coach, the parent or child does
/// not hold the expected accepted role in the team, the link exists, or
/// database operations fail.
pub fn link_parent(
    persistence: &mut Persistence,
    request: &LinkParentRequest,
    user: &AuthenticatedUser,
) -> Result<LinkParentResponse, ApiError> {
    let identity: Identity = user.identity()?;
    require_coach(persistence, &identity, "link parent")?;

    require_member_role(
        persistence,
        identity.team_id,
        request.parent_id,
        Role::Parent,
        "parent_id",
    )?;
    require_member_role(
        persistence,
        identity.team_id,
        request.child_id,
        Role::Player,
        "child_id",
    )?;

    persistence
        .create_parent_link(request.parent_id, request.child_id)
        .map_err(|e| translate_persistence_error(e, "Parent link"))?;

    Ok(LinkParentResponse {
        parent_id: request.parent_id,
        child_id: request.child_id,
    })
}

// ========================================================================
// Calendar events
// ========================================================================

/// Lists the caller's visible events in an optional window.
///
/// # Errors
///
/// Returns an error if the window bounds are not RFC 3339 instants, the
/// caller is not an accepted member, or the store fails.
pub fn list_events(
    persistence: &mut Persistence,
    query: &ListEventsQuery,
    user: &AuthenticatedUser,
) -> Result<ListEventsResponse, ApiError> {
    let identity: Identity = user.identity()?;
    let window: EventWindow = EventWindow {
        start: parse_instant("start", query.start.as_deref())?,
        end: parse_instant("end", query.end.as_deref())?,
    };

    let events: Vec<EventDetails> =
        courtside::list_visible_events(persistence, &identity, &window)?;

    Ok(ListEventsResponse {
        events: events.into_iter().map(EventInfo::from).collect(),
    })
}

/// Creates an event.
///
/// # Errors
///
/// Returns an error if a required field is missing or any scheduling,
/// permission, or participant rule rejects the event.
pub fn create_event(
    persistence: &mut Persistence,
    request: EventRequest,
    user: &AuthenticatedUser,
) -> Result<EventInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let cmd: CreateEvent = create_command(request)?;
    let details: EventDetails = courtside::create_event(persistence, &identity, cmd)?;
    Ok(EventInfo::from(details))
}

/// Retrieves one visible event.
///
/// # Errors
///
/// Returns an error if the event does not exist or is hidden from the
/// caller.
pub fn get_event(
    persistence: &mut Persistence,
    event_id: i64,
    user: &AuthenticatedUser,
) -> Result<EventInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let details: EventDetails =
        courtside::get_event(persistence, &identity, EventId::new(event_id))?;
    Ok(EventInfo::from(details))
}

/// Applies a partial update to an event.
///
/// # Errors
///
/// Returns an error if the event does not exist, the caller is not a
/// coach, or the merged event breaks a scheduling or participant rule.
pub fn update_event(
    persistence: &mut Persistence,
    event_id: i64,
    request: EventRequest,
    user: &AuthenticatedUser,
) -> Result<EventInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let cmd: UpdateEvent = update_command(request)?;
    let details: EventDetails =
        courtside::update_event(persistence, &identity, EventId::new(event_id), cmd)?;
    Ok(EventInfo::from(details))
}

/// Deletes an event with its participants and results.
///
/// # Errors
///
/// Returns an error if the event does not exist or the caller is not a
/// coach.
pub fn delete_event(
    persistence: &mut Persistence,
    event_id: i64,
    user: &AuthenticatedUser,
) -> Result<DeleteEventResponse, ApiError> {
    let identity: Identity = user.identity()?;
    courtside::delete_event(persistence, &identity, EventId::new(event_id))?;
    Ok(DeleteEventResponse {
        event_id,
        message: format!("Event {event_id} deleted"),
    })
}

/// Clones an event, optionally moving it.
///
/// # Errors
///
/// Returns an error if the source event does not exist, the caller is not
/// a coach, or the moved times are invalid.
pub fn clone_event(
    persistence: &mut Persistence,
    event_id: i64,
    request: &CloneEventRequest,
    user: &AuthenticatedUser,
) -> Result<EventInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let cmd: CloneEvent = CloneEvent {
        start: request.start,
        end: request.end,
    };
    let details: EventDetails =
        courtside::clone_event(persistence, &identity, EventId::new(event_id), cmd)?;
    Ok(EventInfo::from(details))
}

/// Records the caller's answer to an event invitation.
///
/// # Errors
///
/// Returns an error if the status is not `confirmed` or `declined`, the
/// event is hidden, or the caller is not a participant.
pub fn respond_to_event(
    persistence: &mut Persistence,
    event_id: i64,
    request: &RsvpRequest,
    user: &AuthenticatedUser,
) -> Result<EventInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let status: ParticipationStatus =
        ParticipationStatus::from_str(&request.status).map_err(translate_domain_error)?;
    if status == ParticipationStatus::Pending {
        return Err(ApiError::InvalidInput {
            field: String::from("status"),
            message: String::from("Status must be 'confirmed' or 'declined'"),
        });
    }

    let details: EventDetails =
        courtside::respond_to_event(persistence, &identity, EventId::new(event_id), status)?;
    Ok(EventInfo::from(details))
}

// ========================================================================
// Results
// ========================================================================

/// Records the result of a match or sparring event.
///
/// # Errors
///
/// Returns an error if the event is not competitive, the score or winner
/// is invalid, a result already exists, or the caller may not record it.
pub fn record_match_result(
    persistence: &mut Persistence,
    event_id: i64,
    request: &MatchResultRequest,
    user: &AuthenticatedUser,
) -> Result<MatchResultInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let cmd: RecordMatchResult = RecordMatchResult {
        score: request.score.clone(),
        winner: request.winner_id.map(UserId::new),
    };
    let result: MatchResult =
        courtside::record_match_result(persistence, &identity, EventId::new(event_id), cmd)?;
    Ok(MatchResultInfo::from(result))
}

/// Logs a player's attendance at a training event.
///
/// # Errors
///
/// Returns an error if the event is not a training activity, the caller is
/// not a coach, or the attendance, rating, or player is invalid.
pub fn log_training(
    persistence: &mut Persistence,
    event_id: i64,
    request: &TrainingLogRequest,
    user: &AuthenticatedUser,
) -> Result<TrainingLogInfo, ApiError> {
    let identity: Identity = user.identity()?;
    let cmd: LogTraining = LogTraining {
        player_id: UserId::new(request.player_id),
        attendance: request.attendance.clone(),
        rating: request.rating,
        notes: request.notes.clone(),
    };
    let log: TrainingLog =
        courtside::log_training(persistence, &identity, EventId::new(event_id), cmd)?;
    Ok(TrainingLogInfo::from(log))
}

// ========================================================================
// Helpers
// ========================================================================

fn generate_invite_code() -> String {
    format!("TEAM{:06}", rand::random::<u32>() % 1_000_000)
}

fn require_coach(
    persistence: &mut Persistence,
    identity: &Identity,
    action: &str,
) -> Result<(), ApiError> {
    let membership: TeamMembership = require_membership(persistence, identity, action)?;
    if membership.role != Role::Coach {
        warn!(
            user_id = identity.user_id.value(),
            action, "Coach-only action refused"
        );
        return Err(ApiError::Forbidden {
            action: action.to_string(),
            reason: String::from("Only coaches can manage team members"),
        });
    }
    Ok(())
}

fn require_member_role(
    persistence: &mut Persistence,
    team_id: TeamId,
    user_id: i64,
    role: Role,
    field: &str,
) -> Result<(), ApiError> {
    let identity: Identity = Identity::new(UserId::new(user_id), team_id);
    let membership: Option<TeamMembership> = resolve_membership(persistence, &identity)
        .map_err(|e| ApiError::from(CoreError::from(e)))?;

    match membership {
        Some(membership) if membership.role == role => Ok(()),
        _ => Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("User {user_id} is not an accepted {role} of this team"),
        }),
    }
}

fn parse_instant(field: &str, raw: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            OffsetDateTime::parse(value, &Rfc3339).map_err(|e| ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("'{value}' is not an RFC 3339 timestamp: {e}"),
            })
        })
        .transpose()
}

fn create_command(request: EventRequest) -> Result<CreateEvent, ApiError> {
    let participants: Vec<UserId> = request.participant_ids()?.unwrap_or_default();
    let recurrence: Recurrence = Recurrence {
        is_recurring: request.is_recurring.unwrap_or(false),
        pattern: request.recurrence_pattern,
    };

    Ok(CreateEvent {
        title: request.title.ok_or_else(|| ApiError::missing_field("title"))?,
        description: request.description,
        location: request.location,
        activity: request
            .event_type
            .ok_or_else(|| ApiError::missing_field("event_type"))?,
        start: request.start.ok_or_else(|| ApiError::missing_field("start"))?,
        end: request.end,
        end_touched: request.end_touched.unwrap_or(false),
        tournament_scope: request.tournament_scope,
        participants,
        recurrence,
    })
}

fn update_command(request: EventRequest) -> Result<UpdateEvent, ApiError> {
    let participants: Option<Vec<UserId>> = request.participant_ids()?;
    let recurrence: Option<Recurrence> =
        if request.is_recurring.is_some() || request.recurrence_pattern.is_some() {
            Some(Recurrence {
                is_recurring: request
                    .is_recurring
                    .unwrap_or(request.recurrence_pattern.is_some()),
                pattern: request.recurrence_pattern,
            })
        } else {
            None
        };

    Ok(UpdateEvent {
        title: request.title,
        description: request.description,
        location: request.location,
        activity: request.event_type,
        start: request.start,
        end: request.end,
        end_touched: request.end_touched.unwrap_or(false),
        tournament_scope: request.tournament_scope,
        participants,
        recurrence,
    })
}
