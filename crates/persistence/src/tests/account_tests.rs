// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::create_fixture;
use crate::{Persistence, PersistenceError, SessionData, UserData};

#[test]
fn test_in_memory_instances_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    first
        .create_user("solo@example.com", "Solo", "password123")
        .unwrap();

    assert!(first.get_user_by_email("solo@example.com").unwrap().is_some());
    assert!(second.get_user_by_email("solo@example.com").unwrap().is_none());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_email_is_stored_lowercase_and_found_case_insensitively() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence
        .create_user("  Serena@Example.COM ", "Serena", "password123")
        .unwrap();

    let user: UserData = persistence
        .get_user_by_email("SERENA@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(user.user_id, user_id);
    assert_eq!(user.email, "serena@example.com");
    assert_ne!(user.password_hash, "password123");
}

#[test]
fn test_duplicate_email_is_a_unique_violation() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_user("dup@example.com", "First", "password123")
        .unwrap();

    let err: PersistenceError = persistence
        .create_user("DUP@example.com", "Second", "password123")
        .unwrap_err();
    assert!(matches!(err, PersistenceError::UniqueViolation(_)));
}

#[test]
fn test_password_verification() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .create_user("venus@example.com", "Venus", "correct-horse")
        .unwrap();
    let user: UserData = persistence
        .get_user_by_email("venus@example.com")
        .unwrap()
        .unwrap();

    assert!(Persistence::verify_password("correct-horse", &user.password_hash).unwrap());
    assert!(!Persistence::verify_password("wrong-horse", &user.password_hash).unwrap());
}

#[test]
fn test_session_lifecycle() {
    let mut fixture = create_fixture();
    let persistence: &mut Persistence = &mut fixture.persistence;
    let coach: i64 = fixture.coach.value();

    persistence
        .create_session("session_abc", coach, None, "2999-01-01T00:00:00Z")
        .unwrap();
    let session: SessionData = persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.user_id, coach);
    assert_eq!(session.team_id, None);

    persistence
        .set_session_team("session_abc", fixture.team.value())
        .unwrap();
    persistence.update_session_activity(session.session_id).unwrap();
    let switched: SessionData = persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(switched.team_id, Some(fixture.team.value()));

    persistence.delete_session("session_abc").unwrap();
    assert!(
        persistence
            .get_session_by_token("session_abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_switching_team_of_unknown_session_is_not_found() {
    let mut fixture = create_fixture();
    let err: PersistenceError = fixture
        .persistence
        .set_session_team("session_missing", fixture.team.value())
        .unwrap_err();
    assert!(matches!(err, PersistenceError::NotFound(_)));
}

#[test]
fn test_expired_sessions_are_purged() {
    let mut fixture = create_fixture();
    let persistence: &mut Persistence = &mut fixture.persistence;
    let coach: i64 = fixture.coach.value();

    persistence
        .create_session("session_old", coach, None, "2000-01-01T00:00:00Z")
        .unwrap();
    persistence
        .create_session("session_new", coach, None, "2999-01-01T00:00:00Z")
        .unwrap();

    assert_eq!(persistence.delete_expired_sessions().unwrap(), 1);
    assert!(persistence.get_session_by_token("session_old").unwrap().is_none());
    assert!(persistence.get_session_by_token("session_new").unwrap().is_some());
}
