// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use courtside_domain::{Activity, Role, TeamMembership};

use crate::tests::helpers::{
    COACH, FakeStore, OUTSIDER, PENDING_PLAYER, PLAYER_A, PLAYER_B, TEAM, create_test_store,
    identity,
};
use crate::{
    Capabilities, CoreError, Identity, VisibilityScope, authorize_create, can_create, can_modify,
    resolve_membership, visibility_scope,
};

#[test]
fn test_resolve_membership_normalizes_legacy_roles() {
    let mut store: FakeStore = create_test_store();

    let coach: TeamMembership = resolve_membership(&mut store, &identity(COACH))
        .unwrap()
        .unwrap();
    assert_eq!(coach.role, Role::Coach);

    let member: TeamMembership = resolve_membership(&mut store, &identity(PLAYER_B))
        .unwrap()
        .unwrap();
    assert_eq!(member.role, Role::Player);
}

#[test]
fn test_resolve_membership_ignores_pending_members() {
    let mut store: FakeStore = create_test_store();
    assert_eq!(
        resolve_membership(&mut store, &identity(PENDING_PLAYER)).unwrap(),
        None
    );
}

#[test]
fn test_resolve_membership_fails_closed_on_unknown_role() {
    let mut store: FakeStore = create_test_store();
    store.memberships[1].role = String::from("umpire");
    assert_eq!(
        resolve_membership(&mut store, &identity(PLAYER_A)).unwrap(),
        None
    );
}

#[test]
fn test_resolve_membership_is_team_scoped() {
    let mut store: FakeStore = create_test_store();
    assert_eq!(
        resolve_membership(&mut store, &Identity::new(OUTSIDER, TEAM)).unwrap(),
        None
    );
}

#[test]
fn test_can_create_follows_creator_table() {
    assert!(can_create(Role::Player, Activity::Sparring));
    assert!(can_create(Role::Player, Activity::Practice));
    assert!(!can_create(Role::Player, Activity::Match));
    assert!(can_create(Role::Parent, Activity::Tournament));
    assert!(can_create(Role::Parent, Activity::Education));
    assert!(!can_create(Role::Parent, Activity::Match));
    for activity in Activity::ALL {
        assert!(can_create(Role::Coach, activity));
    }
}

#[test]
fn test_only_coaches_can_modify() {
    assert!(can_modify(Role::Coach));
    assert!(!can_modify(Role::Player));
    assert!(!can_modify(Role::Parent));
}

#[test]
fn test_visibility_scope_by_role() {
    assert_eq!(visibility_scope(Role::Coach), VisibilityScope::AllTeamEvents);
    assert_eq!(visibility_scope(Role::Parent), VisibilityScope::LinkedChildren);
    assert_eq!(
        visibility_scope(Role::Player),
        VisibilityScope::OwnParticipation
    );
}

#[test]
fn test_authorize_create_reports_reason() {
    let mut store: FakeStore = create_test_store();
    let err: CoreError =
        authorize_create(&mut store, &identity(PLAYER_A), Activity::Match).unwrap_err();
    assert_eq!(err.kind(), "forbidden");
    assert!(err.to_string().contains("cannot create match"));
}

#[test]
fn test_authorize_create_without_membership_is_forbidden() {
    let mut store: FakeStore = create_test_store();
    let err: CoreError =
        authorize_create(&mut store, &identity(OUTSIDER), Activity::Sparring).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Forbidden { ref reason, .. } if reason == "User not found in team"
    ));
}

#[test]
fn test_capabilities_summary() {
    let caps: Capabilities = Capabilities::for_role(Role::Parent);
    assert_eq!(caps.creatable, vec![Activity::Tournament, Activity::Education]);
    assert!(!caps.can_modify);
    assert!(!caps.can_view_all);

    let caps: Capabilities = Capabilities::for_role(Role::Coach);
    assert!(caps.can_modify);
    assert!(caps.can_view_all);
}
