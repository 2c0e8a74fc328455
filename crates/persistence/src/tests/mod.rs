// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod account_tests;
mod calendar_tests;

use courtside_domain::{
    Activity, MembershipStatus, NewCalendarEvent, Recurrence, Role, TeamId, UserId,
};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub const INVITE_CODE: &str = "TEAM000001";

/// A team with one coach, one accepted player, and a parent linked to the
/// player.
pub struct Fixture {
    pub persistence: Persistence,
    pub team: TeamId,
    pub coach: UserId,
    pub player: UserId,
    pub parent: UserId,
}

impl Fixture {
    /// Creates an account and adds it to the fixture team.
    pub fn add_user(&mut self, email: &str, role: Role, status: MembershipStatus) -> UserId {
        let user_id: i64 = self
            .persistence
            .create_user(email, email, "password123")
            .unwrap();
        self.persistence
            .add_member(self.team.value(), user_id, role, status)
            .unwrap();
        UserId::new(user_id)
    }
}

pub fn create_fixture() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let coach: i64 = persistence
        .create_user("coach@example.com", "Coach Carter", "password123")
        .unwrap();
    let team: i64 = persistence
        .create_team("Baseline Aces", INVITE_CODE, coach)
        .unwrap();

    let player: i64 = persistence
        .create_user("player@example.com", "Pat Player", "password123")
        .unwrap();
    persistence
        .add_member(team, player, Role::Player, MembershipStatus::Accepted)
        .unwrap();

    let parent: i64 = persistence
        .create_user("parent@example.com", "Pam Parent", "password123")
        .unwrap();
    persistence
        .add_member(team, parent, Role::Parent, MembershipStatus::Accepted)
        .unwrap();
    persistence.create_parent_link(parent, player).unwrap();

    Fixture {
        persistence,
        team: TeamId::new(team),
        coach: UserId::new(coach),
        player: UserId::new(player),
        parent: UserId::new(parent),
    }
}

pub fn create_test_event(
    team: TeamId,
    created_by: UserId,
    activity: Activity,
    start: OffsetDateTime,
) -> NewCalendarEvent {
    NewCalendarEvent {
        team_id: team,
        created_by,
        title: String::from("Session"),
        description: None,
        location: Some(String::from("Court 3")),
        activity,
        start,
        end: start + time::Duration::hours(2),
        tournament_scope: None,
        recurrence: Recurrence::default(),
        original_event_id: None,
    }
}

pub const MORNING: OffsetDateTime = datetime!(2025-03-01 09:00:00 UTC);
