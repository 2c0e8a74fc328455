// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant validation and resolution.

use std::collections::BTreeSet;

use courtside_domain::{
    Activity, NewParticipant, Participant, ParticipationStatus, Role, TeamId, UserId,
    is_eligible,
};

use crate::error::{CoreError, RejectedParticipant};
use crate::permissions::accepted_membership;
use crate::store::{MembershipRecord, MembershipStore};

/// A validated participant and the team role they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedParticipant {
    pub user_id: UserId,
    pub role: Role,
}

/// The outcome of participant resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedParticipants {
    /// Every participant to attach, ordered by user id.
    pub participants: Vec<ResolvedParticipant>,
    /// The player added automatically to a tournament, if any.
    pub auto_added: Option<UserId>,
}

impl ResolvedParticipants {
    /// Returns the participant user ids.
    #[must_use]
    pub fn user_ids(&self) -> Vec<UserId> {
        self.participants.iter().map(|p| p.user_id).collect()
    }
}

/// Validates a proposed participant list against a team and an activity.
///
/// The steps are:
/// 1. Duplicate ids are collapsed.
/// 2. Every id must be an accepted member of the team, otherwise the whole
///    list is rejected with `ParticipantNotInTeam`.
/// 3. Every member's role must be eligible for the activity, otherwise the
///    list is rejected with `InvalidParticipants`.
/// 4. A tournament without a player gets the team's only player added. If
///    the team has several players the caller must choose
///    (`SelectPlayerRequired`). A team with no players proceeds as is.
///
/// # Arguments
///
/// * `store` - Membership lookups
/// * `team_id` - The team owning the event
/// * `activity` - The normalized activity
/// * `proposed` - The proposed participant ids
///
/// # Errors
///
/// Returns an error if any of the checks above fails or the store fails.
pub fn resolve_participants<S: MembershipStore + ?Sized>(
    store: &mut S,
    team_id: TeamId,
    activity: Activity,
    proposed: &[UserId],
) -> Result<ResolvedParticipants, CoreError> {
    let unique_ids: Vec<UserId> = proposed
        .iter()
        .copied()
        .collect::<BTreeSet<UserId>>()
        .into_iter()
        .collect();

    let mut participants: Vec<ResolvedParticipant> = Vec::with_capacity(unique_ids.len());

    if !unique_ids.is_empty() {
        let records: Vec<MembershipRecord> = store.find_members_by_ids(team_id, &unique_ids)?;
        let accepted: Vec<&MembershipRecord> = records
            .iter()
            .filter(|record| {
                record.team_id == team_id
                    && record.status.trim().eq_ignore_ascii_case("accepted")
            })
            .collect();

        let missing: Vec<UserId> = unique_ids
            .iter()
            .copied()
            .filter(|id| !accepted.iter().any(|record| record.user_id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::ParticipantNotInTeam { missing });
        }

        let mut rejected: Vec<RejectedParticipant> = Vec::new();
        for user_id in &unique_ids {
            let Some(record) = accepted.iter().find(|record| record.user_id == *user_id) else {
                continue;
            };
            match accepted_membership(record) {
                Some(membership) if is_eligible(activity, membership.role) => {
                    participants.push(ResolvedParticipant {
                        user_id: *user_id,
                        role: membership.role,
                    });
                }
                _ => rejected.push(RejectedParticipant {
                    user_id: *user_id,
                    role: record.role.clone(),
                }),
            }
        }
        if !rejected.is_empty() {
            return Err(CoreError::InvalidParticipants { rejected });
        }
    }

    let mut auto_added: Option<UserId> = None;
    if activity == Activity::Tournament && !participants.iter().any(|p| p.role == Role::Player) {
        let players: Vec<UserId> = store.find_team_players(team_id)?;
        match players.as_slice() {
            [] => {}
            [only] => {
                participants.push(ResolvedParticipant {
                    user_id: *only,
                    role: Role::Player,
                });
                participants.sort_by_key(|p| p.user_id);
                auto_added = Some(*only);
            }
            _ => return Err(CoreError::SelectPlayerRequired { candidates: players }),
        }
    }

    Ok(ResolvedParticipants {
        participants,
        auto_added,
    })
}

/// Builds the participant rows to persist for a resolved set.
///
/// Users already attached keep their response. New users start `pending`,
/// except the event's author, who is `confirmed`.
///
/// # Arguments
///
/// * `resolved` - The validated participants
/// * `author` - The event's author
/// * `existing` - The event's current participants, if any
#[must_use]
pub fn participant_rows(
    resolved: &ResolvedParticipants,
    author: UserId,
    existing: &[Participant],
) -> Vec<NewParticipant> {
    resolved
        .participants
        .iter()
        .map(|p| {
            let status: ParticipationStatus = existing
                .iter()
                .find(|current| current.user_id == p.user_id)
                .map_or_else(
                    || {
                        if p.user_id == author {
                            ParticipationStatus::Confirmed
                        } else {
                            ParticipationStatus::Pending
                        }
                    },
                    |current| current.status,
                );
            NewParticipant {
                user_id: p.user_id,
                role: p.role.participant_role(),
                status,
            }
        })
        .collect()
}
