// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Activity, AttendanceStatus, DomainError, MatchScore, PerformanceRating, UserId,
    ensure_competitive, ensure_training, validate_match_players,
};

#[test]
fn test_match_score_accepts_sets() {
    assert_eq!(MatchScore::parse("6-4").unwrap().as_str(), "6-4");
    assert_eq!(
        MatchScore::parse(" 6-4 3-6 10-8 ").unwrap().as_str(),
        "6-4 3-6 10-8"
    );
}

#[test]
fn test_match_score_rejects_malformed_text() {
    for raw in ["", "6", "6-", "-4", "6:4", "6-4,6-3", "6-4  6-3", "100-2", "a-b"] {
        assert!(
            matches!(MatchScore::parse(raw), Err(DomainError::InvalidScore(_))),
            "input: {raw:?}"
        );
    }
}

#[test]
fn test_attendance_accepts_coach_labels() {
    assert_eq!(
        "attended".parse::<AttendanceStatus>(),
        Ok(AttendanceStatus::Present)
    );
    assert_eq!(
        "Missed".parse::<AttendanceStatus>(),
        Ok(AttendanceStatus::Absent)
    );
    assert_eq!("late".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
    assert!("sick".parse::<AttendanceStatus>().is_err());
}

#[test]
fn test_rating_bounds() {
    assert_eq!(PerformanceRating::new(1).unwrap().value(), 1);
    assert_eq!(PerformanceRating::new(10).unwrap().value(), 10);
    assert_eq!(PerformanceRating::new(0), Err(DomainError::InvalidRating(0)));
    assert_eq!(
        PerformanceRating::new(11),
        Err(DomainError::InvalidRating(11))
    );
    assert_eq!(
        PerformanceRating::new(-3),
        Err(DomainError::InvalidRating(-3))
    );
}

#[test]
fn test_match_players_require_exactly_two() {
    let players: Vec<UserId> = vec![UserId::new(1), UserId::new(2)];
    assert!(validate_match_players(&players, Some(UserId::new(2))).is_ok());
    assert!(validate_match_players(&players, None).is_ok());
    assert_eq!(
        validate_match_players(&players[..1], None),
        Err(DomainError::InvalidMatchPlayers { count: 1 })
    );
}

#[test]
fn test_match_winner_must_have_played() {
    let players: Vec<UserId> = vec![UserId::new(1), UserId::new(2)];
    assert_eq!(
        validate_match_players(&players, Some(UserId::new(9))),
        Err(DomainError::WinnerNotInMatch(UserId::new(9)))
    );
}

#[test]
fn test_result_and_training_activity_gates() {
    assert!(ensure_competitive(Activity::Sparring).is_ok());
    assert!(ensure_competitive(Activity::Practice).is_err());
    assert!(ensure_training(Activity::Education).is_ok());
    assert!(ensure_training(Activity::Tournament).is_err());
}
