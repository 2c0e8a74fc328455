// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based permission checks.
//!
//! Authorization always starts from an accepted team membership. Pending
//! memberships and unrecognized roles resolve to no membership at all, so
//! every check below fails closed.

use courtside_domain::{
    Activity, CalendarEvent, MembershipStatus, Participant, Role, TeamId, TeamMembership, UserId,
    creatable_activities,
};

use crate::error::CoreError;
use crate::store::{MembershipRecord, MembershipStore, StoreError};

/// The caller of a core operation.
///
/// Identity is always passed explicitly; the core never reads request state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub team_id: TeamId,
}

impl Identity {
    #[must_use]
    pub const fn new(user_id: UserId, team_id: TeamId) -> Self {
        Self { user_id, team_id }
    }
}

/// Which of a team's events a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityScope {
    /// Every event of the team.
    AllTeamEvents,
    /// Events a linked child participates in, plus events the caller wrote.
    LinkedChildren,
    /// Events the caller participates in, plus events the caller wrote.
    OwnParticipation,
}

/// Resolves the caller's accepted membership in their team.
///
/// # Errors
///
/// Returns an error if the membership lookup fails.
pub fn resolve_membership<S: MembershipStore + ?Sized>(
    store: &mut S,
    identity: &Identity,
) -> Result<Option<TeamMembership>, StoreError> {
    let record: Option<MembershipRecord> =
        store.find_membership(identity.user_id, identity.team_id)?;
    Ok(record.and_then(|record| accepted_membership(&record)))
}

/// Normalizes a stored membership row, keeping it only if it is accepted and
/// carries a known role.
#[must_use]
pub fn accepted_membership(record: &MembershipRecord) -> Option<TeamMembership> {
    let status: MembershipStatus = record.status.parse().ok()?;
    if status != MembershipStatus::Accepted {
        return None;
    }
    let role: Role = Role::parse(&record.role).ok()?;
    Some(TeamMembership {
        user_id: record.user_id,
        team_id: record.team_id,
        role,
        status,
    })
}

/// Returns whether a role may create an activity.
#[must_use]
pub fn can_create(role: Role, activity: Activity) -> bool {
    creatable_activities(role).contains(&activity)
}

/// Returns whether a role may modify or delete events.
///
/// Only coaches may. Authoring an event grants nothing.
#[must_use]
pub const fn can_modify(role: Role) -> bool {
    matches!(role, Role::Coach)
}

/// Returns which events a role may see.
#[must_use]
pub const fn visibility_scope(role: Role) -> VisibilityScope {
    match role {
        Role::Coach => VisibilityScope::AllTeamEvents,
        Role::Parent => VisibilityScope::LinkedChildren,
        Role::Player => VisibilityScope::OwnParticipation,
    }
}

/// Resolves the caller's membership or refuses the action.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the caller has no accepted membership.
pub fn require_membership<S: MembershipStore + ?Sized>(
    store: &mut S,
    identity: &Identity,
    action: &str,
) -> Result<TeamMembership, CoreError> {
    resolve_membership(store, identity)?.ok_or_else(|| CoreError::Forbidden {
        action: action.to_string(),
        reason: String::from("User not found in team"),
    })
}

/// Checks that the caller may create an activity.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the caller has no accepted membership
/// or their role may not create the activity.
pub fn authorize_create<S: MembershipStore + ?Sized>(
    store: &mut S,
    identity: &Identity,
    activity: Activity,
) -> Result<TeamMembership, CoreError> {
    let action: String = format!("create {activity}");
    let membership: TeamMembership = require_membership(store, identity, &action)?;
    if !can_create(membership.role, activity) {
        return Err(CoreError::Forbidden {
            action,
            reason: format!(
                "A {} cannot create {activity} events",
                membership.role
            ),
        });
    }
    Ok(membership)
}

/// Checks that the caller may modify or delete events.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the caller has no accepted membership
/// or is not a coach.
pub fn authorize_modify<S: MembershipStore + ?Sized>(
    store: &mut S,
    identity: &Identity,
    action: &str,
) -> Result<TeamMembership, CoreError> {
    let membership: TeamMembership = require_membership(store, identity, action)?;
    if !can_modify(membership.role) {
        return Err(CoreError::Forbidden {
            action: action.to_string(),
            reason: String::from("Only coaches can modify events"),
        });
    }
    Ok(membership)
}

/// The caller's resolved view of the team calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    user_id: UserId,
    scope: VisibilityScope,
    children: Vec<UserId>,
}

impl Visibility {
    /// Builds the caller's visibility, loading linked children for parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the linked children cannot be loaded.
    pub fn resolve<S: MembershipStore + ?Sized>(
        store: &mut S,
        membership: &TeamMembership,
    ) -> Result<Self, StoreError> {
        let scope: VisibilityScope = visibility_scope(membership.role);
        let children: Vec<UserId> = if scope == VisibilityScope::LinkedChildren {
            store.find_linked_children(membership.user_id)?
        } else {
            Vec::new()
        };
        Ok(Self {
            user_id: membership.user_id,
            scope,
            children,
        })
    }

    /// Returns whether the caller may see an event with these participants.
    #[must_use]
    pub fn admits(&self, event: &CalendarEvent, participants: &[Participant]) -> bool {
        if event.created_by == self.user_id {
            return true;
        }
        let mut attending = participants
            .iter()
            .filter(|p| p.event_id == event.event_id)
            .map(|p| p.user_id);
        match self.scope {
            VisibilityScope::AllTeamEvents => true,
            VisibilityScope::LinkedChildren => {
                attending.any(|id| self.children.contains(&id))
            }
            VisibilityScope::OwnParticipation => attending.any(|id| id == self.user_id),
        }
    }
}

/// An advisory summary of what a role may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub role: Role,
    pub creatable: Vec<Activity>,
    pub can_modify: bool,
    pub can_view_all: bool,
}

impl Capabilities {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            creatable: creatable_activities(role).to_vec(),
            can_modify: can_modify(role),
            can_view_all: visibility_scope(role) == VisibilityScope::AllTeamEvents,
        }
    }
}
