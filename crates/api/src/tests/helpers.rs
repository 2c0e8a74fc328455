// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use courtside_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    AuthenticatedUser, AuthenticationService, CreateTeamRequest, CreateTeamResponse,
    EventRequest, JoinTeamRequest, LoginRequest, LoginResponse, SignupRequest, create_team,
    join_team, login, signup,
};

pub const PASSWORD: &str = "baseline-rally";

/// Saturday morning practice slot.
pub const MORNING: OffsetDateTime = datetime!(2025-03-01 09:00 UTC);

/// A team with an accepted coach, player, and parent.
pub struct TeamFixture {
    pub persistence: Persistence,
    pub team_id: i64,
    pub invite_code: String,
    pub coach: AuthenticatedUser,
    pub player: AuthenticatedUser,
    pub parent: AuthenticatedUser,
}

impl TeamFixture {
    /// Signs up another user and joins them to the team.
    pub fn join(&mut self, email: &str, role: &str) -> AuthenticatedUser {
        let user: AuthenticatedUser = register(&mut self.persistence, email);
        join_team(
            &mut self.persistence,
            &JoinTeamRequest {
                invite_code: self.invite_code.clone(),
                role: role.to_string(),
            },
            &user,
        )
        .unwrap();
        refresh(&mut self.persistence, &user)
    }
}

/// Signs up a user, logs them in, and returns the validated session.
pub fn register(persistence: &mut Persistence, email: &str) -> AuthenticatedUser {
    let display_name: String = email.split('@').next().unwrap_or(email).to_string();
    signup(
        persistence,
        &SignupRequest {
            email: email.to_string(),
            display_name,
            password: PASSWORD.to_string(),
        },
    )
    .unwrap();

    let response: LoginResponse = login(
        persistence,
        &LoginRequest {
            email: email.to_string(),
            password: PASSWORD.to_string(),
            team_id: None,
        },
        Duration::days(1),
    )
    .unwrap();

    AuthenticationService::validate_session(persistence, &response.session_token).unwrap()
}

/// Re-reads a user's session, picking up team switches.
pub fn refresh(persistence: &mut Persistence, user: &AuthenticatedUser) -> AuthenticatedUser {
    AuthenticationService::validate_session(persistence, &user.session_token).unwrap()
}

pub fn create_team_fixture() -> TeamFixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let coach: AuthenticatedUser = register(&mut persistence, "coach@example.com");
    let team: CreateTeamResponse = create_team(
        &mut persistence,
        &CreateTeamRequest {
            name: String::from("Baseline Aces"),
        },
        &coach,
    )
    .unwrap();
    let coach: AuthenticatedUser = refresh(&mut persistence, &coach);

    let mut fixture: TeamFixture = TeamFixture {
        persistence,
        team_id: team.team_id,
        invite_code: team.invite_code,
        player: coach.clone(),
        parent: coach.clone(),
        coach,
    };
    fixture.player = fixture.join("player@example.com", "player");
    fixture.parent = fixture.join("parent@example.com", "parent");
    fixture
}

/// A create request with the required fields filled in.
pub fn event_request(event_type: &str, start: OffsetDateTime) -> EventRequest {
    EventRequest {
        title: Some(format!("{event_type} session")),
        event_type: Some(event_type.to_string()),
        start: Some(start),
        end: Some(start + Duration::hours(2)),
        ..EventRequest::default()
    }
}
