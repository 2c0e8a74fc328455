// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Activity, DomainError, ParticipantRole, Role, normalize_activity, normalize_role};

#[test]
fn test_sparring_synonyms_normalize_to_sparring() {
    for raw in [
        "Sparring Request",
        "sparing",
        "sparring_request",
        "  SPARRING  ",
        "sparing request",
        "sparring-request",
    ] {
        assert_eq!(normalize_activity(raw), "sparring", "input: {raw:?}");
    }
}

#[test]
fn test_normalize_activity_trims_and_lowercases_unknown_values() {
    assert_eq!(normalize_activity("  Yoga Class "), "yoga class");
    assert_eq!(normalize_activity("Practice"), "practice");
}

#[test]
fn test_normalize_activity_is_idempotent() {
    for raw in [
        "Sparring Request",
        "sparing",
        " Tournament ",
        "EDUCATION",
        "  Yoga  Class ",
        "",
        "match",
    ] {
        let once: String = normalize_activity(raw);
        assert_eq!(normalize_activity(&once), once, "input: {raw:?}");
    }
}

#[test]
fn test_parse_accepts_every_canonical_tag() {
    for activity in Activity::ALL {
        assert_eq!(Activity::parse(activity.as_str()), Ok(activity));
    }
}

#[test]
fn test_parse_rejects_unknown_activity() {
    let result: Result<Activity, DomainError> = Activity::parse("yoga");
    assert_eq!(
        result,
        Err(DomainError::InvalidActivityType(String::from("yoga")))
    );
    assert_eq!(result.unwrap_err().kind(), "invalid_activity_type");
}

#[test]
fn test_storage_label_round_trips_for_every_activity() {
    for activity in Activity::ALL {
        assert_eq!(
            Activity::from_storage_label(activity.storage_label()),
            Ok(activity)
        );
    }
    assert_eq!(Activity::Sparring.storage_label(), "sparring_request");
    assert_eq!(Activity::Match.storage_label(), "match");
}

#[test]
fn test_activity_display_uses_domain_tag() {
    assert_eq!(Activity::Sparring.to_string(), "sparring");
}

#[test]
fn test_normalize_role_maps_legacy_labels() {
    assert_eq!(normalize_role("member"), "player");
    assert_eq!(normalize_role("Creator"), "coach");
    assert_eq!(normalize_role(" Parent "), "parent");
    assert_eq!(Role::parse("member"), Ok(Role::Player));
    assert_eq!(Role::parse("creator"), Ok(Role::Coach));
}

#[test]
fn test_role_parse_rejects_unknown_role() {
    assert_eq!(
        Role::parse("umpire"),
        Err(DomainError::InvalidRole(String::from("umpire")))
    );
}

#[test]
fn test_parent_attends_in_player_slot() {
    assert_eq!(Role::Parent.participant_role().as_str(), "player");
    assert_eq!(Role::Player.participant_role().as_str(), "player");
    assert_eq!(Role::Coach.participant_role().as_str(), "coach");
}

#[test]
fn test_participant_role_parses_only_known_labels() {
    assert_eq!("coach".parse::<ParticipantRole>(), Ok(ParticipantRole::Coach));
    assert_eq!(" Player ".parse::<ParticipantRole>(), Ok(ParticipantRole::Player));
    assert_eq!(
        "umpire".parse::<ParticipantRole>(),
        Err(DomainError::InvalidRole(String::from("umpire")))
    );
}
