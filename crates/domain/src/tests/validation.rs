// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::{
    Activity, DomainError, MAX_TITLE_LENGTH, NewCalendarEvent, Recurrence, TeamId, UserId,
    validate_event, validate_title,
};

fn create_test_event() -> NewCalendarEvent {
    NewCalendarEvent {
        team_id: TeamId::new(1),
        created_by: UserId::new(1),
        title: String::from("Morning practice"),
        description: None,
        location: Some(String::from("Court 3")),
        activity: Activity::Practice,
        start: datetime!(2025-03-01 08:00:00 UTC),
        end: datetime!(2025-03-01 10:00:00 UTC),
        tournament_scope: None,
        recurrence: Recurrence::default(),
        original_event_id: None,
    }
}

#[test]
fn test_validate_event_accepts_valid_event() {
    assert!(validate_event(&create_test_event()).is_ok());
}

#[test]
fn test_validate_event_rejects_blank_title() {
    let mut event: NewCalendarEvent = create_test_event();
    event.title = String::from("   ");
    assert!(matches!(
        validate_event(&event),
        Err(DomainError::InvalidTitle(_))
    ));
}

#[test]
fn test_validate_event_rejects_reversed_range() {
    let mut event: NewCalendarEvent = create_test_event();
    event.end = datetime!(2025-03-01 07:00:00 UTC);
    assert!(matches!(
        validate_event(&event),
        Err(DomainError::InvalidTimeRange { .. })
    ));
}

#[test]
fn test_validate_title_length_limit() {
    let long_title: String = "x".repeat(MAX_TITLE_LENGTH + 1);
    assert!(validate_title(&long_title).is_err());
    assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
}
