// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Activity, Role, creatable_activities, eligible_roles, is_eligible};

#[test]
fn test_every_activity_is_creatable_by_some_role() {
    for activity in Activity::ALL {
        assert!(
            Role::ALL
                .iter()
                .any(|role| creatable_activities(*role).contains(&activity)),
            "{activity} has no creator"
        );
    }
}

#[test]
fn test_every_activity_has_eligible_participants() {
    for activity in Activity::ALL {
        assert!(!eligible_roles(activity).is_empty(), "{activity}");
    }
}

#[test]
fn test_match_and_sparring_admit_players_only() {
    for activity in [Activity::Match, Activity::Sparring] {
        assert!(is_eligible(activity, Role::Player));
        assert!(!is_eligible(activity, Role::Parent));
        assert!(!is_eligible(activity, Role::Coach));
    }
}

#[test]
fn test_education_excludes_coaches() {
    assert!(is_eligible(Activity::Education, Role::Parent));
    assert!(is_eligible(Activity::Education, Role::Player));
    assert!(!is_eligible(Activity::Education, Role::Coach));
}

#[test]
fn test_tournament_admits_every_role() {
    for role in Role::ALL {
        assert!(is_eligible(Activity::Tournament, role));
    }
}

#[test]
fn test_creator_table() {
    assert_eq!(
        creatable_activities(Role::Parent),
        &[Activity::Tournament, Activity::Education]
    );
    assert_eq!(
        creatable_activities(Role::Player),
        &[Activity::Practice, Activity::Gym, Activity::Sparring]
    );
    assert_eq!(creatable_activities(Role::Coach).len(), Activity::ALL.len());
}
