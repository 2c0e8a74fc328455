// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant eligibility and creator permission tables.
//!
//! These two tables are the single source of truth for who may attend and
//! who may author each activity. Nothing else in the workspace keeps a copy.

use crate::activity::Activity;
use crate::role::Role;

/// Team roles allowed to attend each activity.
static PARTICIPANT_RULES: [(Activity, &[Role]); 6] = [
    (Activity::Education, &[Role::Parent, Role::Player]),
    (Activity::Practice, &[Role::Player, Role::Coach]),
    (Activity::Gym, &[Role::Player, Role::Coach]),
    (Activity::Match, &[Role::Player]),
    (Activity::Sparring, &[Role::Player]),
    (
        Activity::Tournament,
        &[Role::Parent, Role::Player, Role::Coach],
    ),
];

/// Activities each team role may create.
static CREATOR_RULES: [(Role, &[Activity]); 3] = [
    (Role::Parent, &[Activity::Tournament, Activity::Education]),
    (
        Role::Player,
        &[Activity::Practice, Activity::Gym, Activity::Sparring],
    ),
    (
        Role::Coach,
        &[
            Activity::Practice,
            Activity::Gym,
            Activity::Match,
            Activity::Sparring,
            Activity::Tournament,
            Activity::Education,
        ],
    ),
];

/// Returns the team roles eligible to participate in an activity.
#[must_use]
pub fn eligible_roles(activity: Activity) -> &'static [Role] {
    PARTICIPANT_RULES
        .iter()
        .find(|(candidate, _)| *candidate == activity)
        .map(|(_, roles)| *roles)
        .unwrap_or_default()
}

/// Returns whether a team role may attend an activity.
#[must_use]
pub fn is_eligible(activity: Activity, role: Role) -> bool {
    eligible_roles(activity).contains(&role)
}

/// Returns the activities a team role may create.
#[must_use]
pub fn creatable_activities(role: Role) -> &'static [Activity] {
    CREATOR_RULES
        .iter()
        .find(|(candidate, _)| *candidate == role)
        .map(|(_, activities)| *activities)
        .unwrap_or_default()
}
