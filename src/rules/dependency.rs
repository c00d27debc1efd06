//! Dependency resolution: is an activity blocked by its upstream parent?

use crate::models::{Activity, ActivityStatus};

/// Returns `true` if the activity is blocked by its dependency.
///
/// The check is deliberately shallow:
/// - sentinel or absent `dependency_code` never blocks;
/// - the parent is looked up by exact, case-sensitive `activity_code`;
/// - a dependency code that matches no activity never blocks (references to
///   work tracked outside the schedule are allowed to dangle);
/// - a resolved parent blocks if and only if it is not `Done`.
///
/// Only the immediate dependency is consulted. The relation is
/// single-parent, so there is no multi-hop traversal and nothing to
/// cycle-check. Pure function: idempotent, order-independent with respect
/// to the snapshot.
pub fn is_blocked(activity: &Activity, snapshot: &[Activity]) -> bool {
    let Some(dep_code) = activity.dependency() else {
        return false;
    };

    match snapshot.iter().find(|a| a.activity_code == dep_code) {
        Some(parent) => parent.status != ActivityStatus::Done,
        None => false,
    }
}
