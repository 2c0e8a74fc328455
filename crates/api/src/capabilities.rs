// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for permission-aware UI gating.
//!
//! Capabilities expose what event actions a team member may perform. They
//! are advisory only and do not replace the core's authorization checks.

use courtside::Capabilities;
use courtside_domain::Activity;

use crate::request_response::{Capability, EventCapabilities};

/// Capabilities of a caller with no accepted team role.
pub const NO_CAPABILITIES: EventCapabilities = EventCapabilities {
    can_create_education: Capability::Denied,
    can_create_practice: Capability::Denied,
    can_create_gym: Capability::Denied,
    can_create_match: Capability::Denied,
    can_create_sparring: Capability::Denied,
    can_create_tournament: Capability::Denied,
    can_modify_events: Capability::Denied,
    can_view_all_events: Capability::Denied,
};

/// Computes the event capabilities of a resolved team role.
///
/// # Arguments
///
/// * `capabilities` - The role's capabilities as computed by the core
#[must_use]
pub fn compute_event_capabilities(capabilities: &Capabilities) -> EventCapabilities {
    let creatable = |activity: Activity| -> Capability {
        Capability::from_bool(capabilities.creatable.contains(&activity))
    };

    EventCapabilities {
        can_create_education: creatable(Activity::Education),
        can_create_practice: creatable(Activity::Practice),
        can_create_gym: creatable(Activity::Gym),
        can_create_match: creatable(Activity::Match),
        can_create_sparring: creatable(Activity::Sparring),
        can_create_tournament: creatable(Activity::Tournament),
        can_modify_events: Capability::from_bool(capabilities.can_modify),
        can_view_all_events: Capability::from_bool(capabilities.can_view_all),
    }
}
