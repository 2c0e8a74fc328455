// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    ApiError, AuthenticatedUser, CloneEventRequest, DeleteEventResponse, EventInfo, EventRequest,
    LinkParentRequest, ListEventsQuery, ListEventsResponse, ParticipantRef,
    RejectedParticipantInfo, RsvpRequest, clone_event, create_event, delete_event, get_event,
    link_parent, list_events, respond_to_event, update_event,
};

use super::helpers::{MORNING, TeamFixture, create_team_fixture, event_request};

fn with_participants(mut request: EventRequest, users: &[&AuthenticatedUser]) -> EventRequest {
    request.participants = Some(
        users
            .iter()
            .map(|user| ParticipantRef::Id(user.user_id.value()))
            .collect(),
    );
    request
}

fn participant_ids(event: &EventInfo) -> Vec<i64> {
    let mut ids: Vec<i64> = event.participants.iter().map(|p| p.user_id).collect();
    ids.sort_unstable();
    ids
}

fn coach_practice(fixture: &mut TeamFixture) -> EventInfo {
    let request: EventRequest = with_participants(
        event_request("practice", MORNING),
        &[&fixture.player, &fixture.coach],
    );
    create_event(&mut fixture.persistence, request, &fixture.coach).unwrap()
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_coach_creates_practice() {
    let mut fixture: TeamFixture = create_team_fixture();

    let event: EventInfo = coach_practice(&mut fixture);

    assert_eq!(event.event_type, "practice");
    assert_eq!(event.team_id, fixture.team_id);
    assert_eq!(event.created_by, fixture.coach.user_id.value());
    assert_eq!(event.end, MORNING + Duration::hours(2));
    let mut expected: Vec<i64> = vec![
        fixture.coach.user_id.value(),
        fixture.player.user_id.value(),
    ];
    expected.sort_unstable();
    assert_eq!(participant_ids(&event), expected);
}

#[test]
fn test_created_event_reads_back_identically() {
    let mut fixture: TeamFixture = create_team_fixture();
    let created: EventInfo = coach_practice(&mut fixture);

    let fetched: EventInfo =
        get_event(&mut fixture.persistence, created.event_id, &fixture.coach).unwrap();

    assert_eq!(fetched, created);
}

#[test]
fn test_education_end_is_one_hour_after_start() {
    let mut fixture: TeamFixture = create_team_fixture();
    let start: OffsetDateTime = datetime!(2025-01-10 10:00 UTC);
    let request: EventRequest = with_participants(
        event_request("Education", start),
        &[&fixture.parent, &fixture.player],
    );

    let event: EventInfo = create_event(&mut fixture.persistence, request, &fixture.parent).unwrap();

    assert_eq!(event.event_type, "education");
    assert_eq!(event.end, datetime!(2025-01-10 11:00 UTC));
}

#[test]
fn test_tournament_payload_with_legacy_field_names() {
    let mut fixture: TeamFixture = create_team_fixture();
    let request: EventRequest = serde_json::from_value(serde_json::json!({
        "title": "Spring Open",
        "eventType": "Tournament",
        "startISO": "2025-06-01T09:00:00Z",
        "tournamentScope": "national",
        "participantUserIds": [fixture.player.user_id.value()],
    }))
    .unwrap();

    let event: EventInfo = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap();

    assert_eq!(event.end, datetime!(2025-06-03 09:00 UTC));
    assert_eq!(event.tournament_scope.as_deref(), Some("national"));
    assert_eq!(participant_ids(&event), vec![fixture.player.user_id.value()]);
}

#[test]
fn test_tournament_without_scope_is_rejected() {
    let mut fixture: TeamFixture = create_team_fixture();
    let request: EventRequest =
        with_participants(event_request("tournament", MORNING), &[&fixture.player]);

    let err: ApiError = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap_err();

    assert_eq!(err.kind(), "missing_tournament_scope");
}

#[test]
fn test_tournament_auto_adds_only_player() {
    let mut fixture: TeamFixture = create_team_fixture();
    let mut request: EventRequest = event_request("tournament", MORNING);
    request.tournament_scope = Some(String::from("international_te"));

    let event: EventInfo = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap();

    assert_eq!(event.end, MORNING + Duration::days(3));
    assert_eq!(participant_ids(&event), vec![fixture.player.user_id.value()]);
}

#[test]
fn test_tournament_without_player_on_larger_team_requires_selection() {
    let mut fixture: TeamFixture = create_team_fixture();
    fixture.join("second@example.com", "player");
    let mut request: EventRequest = event_request("tournament", MORNING);
    request.tournament_scope = Some(String::from("national"));

    let err: ApiError = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap_err();

    assert_eq!(err.kind(), "select_player_required");
}

#[test]
fn test_parent_in_match_is_rejected_with_role() {
    let mut fixture: TeamFixture = create_team_fixture();
    let request: EventRequest = with_participants(
        event_request("match", MORNING),
        &[&fixture.player, &fixture.parent],
    );

    let err: ApiError = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap_err();

    match err {
        ApiError::InvalidParticipants { rejected, .. } => {
            assert_eq!(
                rejected,
                vec![RejectedParticipantInfo {
                    user_id: fixture.parent.user_id.value(),
                    role: String::from("parent"),
                }]
            );
        }
        other => panic!("expected invalid_participants, got {other:?}"),
    }
}

#[test]
fn test_non_member_participant_is_rejected() {
    let mut fixture: TeamFixture = create_team_fixture();
    let mut request: EventRequest = event_request("practice", MORNING);
    request.participants = Some(vec![ParticipantRef::Id(9_999)]);

    let err: ApiError = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap_err();

    assert_eq!(err.kind(), "participant_not_in_team");
}

#[test]
fn test_player_creation_follows_creator_table() {
    let mut fixture: TeamFixture = create_team_fixture();
    let player: AuthenticatedUser = fixture.player.clone();

    let err: ApiError = create_event(
        &mut fixture.persistence,
        with_participants(event_request("match", MORNING), &[&player]),
        &player,
    )
    .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let event: EventInfo = create_event(
        &mut fixture.persistence,
        with_participants(event_request("sparring request", MORNING), &[&player]),
        &player,
    )
    .unwrap();
    assert_eq!(event.event_type, "sparring");
}

#[test]
fn test_missing_title_is_invalid_input() {
    let mut fixture: TeamFixture = create_team_fixture();
    let mut request: EventRequest = event_request("practice", MORNING);
    request.title = None;

    let err: ApiError = create_event(&mut fixture.persistence, request, &fixture.coach).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "title"));
}

// ============================================================================
// Update, delete, clone
// ============================================================================

#[test]
fn test_only_coach_updates() {
    let mut fixture: TeamFixture = create_team_fixture();
    let event: EventInfo = coach_practice(&mut fixture);
    let rename: EventRequest = EventRequest {
        title: Some(String::from("Serve clinic")),
        ..EventRequest::default()
    };

    let err: ApiError = update_event(
        &mut fixture.persistence,
        event.event_id,
        rename.clone(),
        &fixture.player,
    )
    .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let updated: EventInfo =
        update_event(&mut fixture.persistence, event.event_id, rename, &fixture.coach).unwrap();
    assert_eq!(updated.title, "Serve clinic");
    assert_eq!(updated.event_type, "practice");
    assert_eq!(updated.end, event.end);
    assert_eq!(participant_ids(&updated), participant_ids(&event));
}

#[test]
fn test_player_cannot_delete_own_event() {
    let mut fixture: TeamFixture = create_team_fixture();
    let player: AuthenticatedUser = fixture.player.clone();
    let event: EventInfo = create_event(
        &mut fixture.persistence,
        with_participants(event_request("gym", MORNING), &[&player]),
        &player,
    )
    .unwrap();

    let err: ApiError = delete_event(&mut fixture.persistence, event.event_id, &player).unwrap_err();

    assert_eq!(err.kind(), "forbidden");
}

#[test]
fn test_deleted_event_is_gone() {
    let mut fixture: TeamFixture = create_team_fixture();
    let event: EventInfo = coach_practice(&mut fixture);

    let response: DeleteEventResponse =
        delete_event(&mut fixture.persistence, event.event_id, &fixture.coach).unwrap();
    assert_eq!(response.event_id, event.event_id);

    let err: ApiError =
        get_event(&mut fixture.persistence, event.event_id, &fixture.coach).unwrap_err();
    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_clone_moves_event_and_records_lineage() {
    let mut fixture: TeamFixture = create_team_fixture();
    let source: EventInfo = coach_practice(&mut fixture);
    let next_week: OffsetDateTime = MORNING + Duration::weeks(1);

    let copy: EventInfo = clone_event(
        &mut fixture.persistence,
        source.event_id,
        &CloneEventRequest {
            start: Some(next_week),
            end: None,
        },
        &fixture.coach,
    )
    .unwrap();

    assert_ne!(copy.event_id, source.event_id);
    assert_eq!(copy.original_event_id, Some(source.event_id));
    assert_eq!(copy.start, next_week);
    assert_eq!(copy.end, next_week + Duration::hours(2));
    assert_eq!(copy.title, source.title);
}

// ============================================================================
// RSVP and visibility
// ============================================================================

#[test]
fn test_player_confirms_invitation() {
    let mut fixture: TeamFixture = create_team_fixture();
    let event: EventInfo = coach_practice(&mut fixture);
    let player_id: i64 = fixture.player.user_id.value();

    let updated: EventInfo = respond_to_event(
        &mut fixture.persistence,
        event.event_id,
        &RsvpRequest {
            status: String::from("Confirmed"),
        },
        &fixture.player,
    )
    .unwrap();

    let status: &str = updated
        .participants
        .iter()
        .find(|p| p.user_id == player_id)
        .map(|p| p.status.as_str())
        .unwrap();
    assert_eq!(status, "confirmed");
}

#[test]
fn test_rsvp_back_to_pending_is_rejected() {
    let mut fixture: TeamFixture = create_team_fixture();
    let event: EventInfo = coach_practice(&mut fixture);

    let err: ApiError = respond_to_event(
        &mut fixture.persistence,
        event.event_id,
        &RsvpRequest {
            status: String::from("pending"),
        },
        &fixture.player,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "status"));
}

#[test]
fn test_list_events_rejects_malformed_window() {
    let mut fixture: TeamFixture = create_team_fixture();

    let err: ApiError = list_events(
        &mut fixture.persistence,
        &ListEventsQuery {
            start: Some(String::from("next tuesday")),
            end: None,
        },
        &fixture.coach,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start"));
}

#[test]
fn test_list_events_applies_window() {
    let mut fixture: TeamFixture = create_team_fixture();
    coach_practice(&mut fixture);
    let later: EventInfo = create_event(
        &mut fixture.persistence,
        with_participants(
            event_request("gym", MORNING + Duration::days(10)),
            &[&fixture.player],
        ),
        &fixture.coach,
    )
    .unwrap();

    let response: ListEventsResponse = list_events(
        &mut fixture.persistence,
        &ListEventsQuery {
            start: Some(String::from("2025-03-05T00:00:00Z")),
            end: None,
        },
        &fixture.coach,
    )
    .unwrap();

    assert_eq!(response.events, vec![later]);
}

#[test]
fn test_parent_sees_linked_child_events() {
    let mut fixture: TeamFixture = create_team_fixture();
    let event: EventInfo = coach_practice(&mut fixture);
    let query: ListEventsQuery = ListEventsQuery::default();

    let before: ListEventsResponse =
        list_events(&mut fixture.persistence, &query, &fixture.parent).unwrap();
    assert!(before.events.is_empty());

    link_parent(
        &mut fixture.persistence,
        &LinkParentRequest {
            parent_id: fixture.parent.user_id.value(),
            child_id: fixture.player.user_id.value(),
        },
        &fixture.coach,
    )
    .unwrap();

    let after: ListEventsResponse =
        list_events(&mut fixture.persistence, &query, &fixture.parent).unwrap();
    assert_eq!(after.events, vec![event]);
}

#[test]
fn test_hidden_event_reads_as_not_found() {
    let mut fixture: TeamFixture = create_team_fixture();
    let rival: AuthenticatedUser = fixture.join("rival@example.com", "player");
    let event: EventInfo = coach_practice(&mut fixture);

    let err: ApiError = get_event(&mut fixture.persistence, event.event_id, &rival).unwrap_err();

    assert_eq!(err.kind(), "not_found");
}
