// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The event core running against the `SQLite` store.

use courtside::{
    CoreError, CreateEvent, EventDetails, Identity, RecordMatchResult, create_event, delete_event,
    get_event, list_visible_events, record_match_result,
};
use courtside_domain::{
    Activity, EventWindow, MembershipStatus, ParticipationStatus, Recurrence, Role, UserId,
};
use time::Duration;

use crate::tests::{Fixture, MORNING, create_fixture};

fn command(activity: &str, participants: Vec<UserId>) -> CreateEvent {
    CreateEvent {
        title: String::from("Session"),
        description: None,
        location: None,
        activity: activity.to_string(),
        start: MORNING,
        end: Some(MORNING + Duration::hours(2)),
        end_touched: false,
        tournament_scope: None,
        participants,
        recurrence: Recurrence::default(),
    }
}

fn as_user(fixture: &Fixture, user_id: UserId) -> Identity {
    Identity::new(user_id, fixture.team)
}

#[test]
fn test_created_event_reads_back_identically() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);

    let created: EventDetails = create_event(
        &mut fixture.persistence,
        &coach,
        command("practice", vec![fixture.player, fixture.coach]),
    )
    .unwrap();
    let read: EventDetails =
        get_event(&mut fixture.persistence, &coach, created.event.event_id).unwrap();

    assert_eq!(read, created);
    let coach_row = read
        .participants
        .iter()
        .find(|p| p.user_id == fixture.coach)
        .unwrap();
    assert_eq!(coach_row.status, ParticipationStatus::Confirmed);
}

#[test]
fn test_tournament_adds_the_only_player() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);

    let mut cmd: CreateEvent = command("tournament", vec![]);
    cmd.end = None;
    cmd.tournament_scope = Some(String::from("national"));
    let created: EventDetails = create_event(&mut fixture.persistence, &coach, cmd).unwrap();

    assert_eq!(created.event.activity, Activity::Tournament);
    assert_eq!(created.event.end, MORNING + Duration::days(2));
    let users: Vec<UserId> = created.participants.iter().map(|p| p.user_id).collect();
    assert_eq!(users, vec![fixture.player]);
}

#[test]
fn test_rejected_participants_leave_nothing_behind() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);

    let err: CoreError = create_event(
        &mut fixture.persistence,
        &coach,
        command("match", vec![fixture.player, fixture.parent]),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_participants");

    assert!(
        list_visible_events(&mut fixture.persistence, &coach, &EventWindow::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_sub_second_range_is_a_typed_validation_error() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);

    let mut cmd: CreateEvent = command("practice", vec![fixture.player]);
    cmd.start = MORNING + Duration::milliseconds(200);
    cmd.end = Some(MORNING + Duration::milliseconds(700));
    let err: CoreError = create_event(&mut fixture.persistence, &coach, cmd).unwrap_err();

    assert_eq!(err.kind(), "invalid_time_range");
    assert!(
        list_visible_events(&mut fixture.persistence, &coach, &EventWindow::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_parent_sees_only_linked_child_events() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);
    let other_player: UserId = fixture.add_user(
        "rival@example.com",
        Role::Player,
        MembershipStatus::Accepted,
    );

    let child_event: EventDetails = create_event(
        &mut fixture.persistence,
        &coach,
        command("practice", vec![fixture.player]),
    )
    .unwrap();
    create_event(
        &mut fixture.persistence,
        &coach,
        command("practice", vec![other_player]),
    )
    .unwrap();

    let parent: Identity = as_user(&fixture, fixture.parent);
    let visible: Vec<EventDetails> =
        list_visible_events(&mut fixture.persistence, &parent, &EventWindow::default()).unwrap();
    assert_eq!(visible, vec![child_event]);

    let everything: Vec<EventDetails> =
        list_visible_events(&mut fixture.persistence, &coach, &EventWindow::default()).unwrap();
    assert_eq!(everything.len(), 2);
}

#[test]
fn test_match_result_recorded_once() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);
    let opponent: UserId = fixture.add_user(
        "opponent@example.com",
        Role::Player,
        MembershipStatus::Accepted,
    );

    let event: EventDetails = create_event(
        &mut fixture.persistence,
        &coach,
        command("match", vec![fixture.player, opponent]),
    )
    .unwrap();
    let cmd: RecordMatchResult = RecordMatchResult {
        score: String::from("6-3 6-4"),
        winner: Some(opponent),
    };

    record_match_result(
        &mut fixture.persistence,
        &coach,
        event.event.event_id,
        cmd.clone(),
    )
    .unwrap();
    let err: CoreError =
        record_match_result(&mut fixture.persistence, &coach, event.event.event_id, cmd)
            .unwrap_err();
    assert_eq!(err.kind(), "conflict");
}

#[test]
fn test_deleted_event_is_gone() {
    let mut fixture: Fixture = create_fixture();
    let coach: Identity = as_user(&fixture, fixture.coach);
    let event: EventDetails = create_event(
        &mut fixture.persistence,
        &coach,
        command("gym", vec![fixture.player]),
    )
    .unwrap();

    delete_event(&mut fixture.persistence, &coach, event.event.event_id).unwrap();

    let err: CoreError =
        get_event(&mut fixture.persistence, &coach, event.event.event_id).unwrap_err();
    assert_eq!(err.kind(), "not_found");
}
