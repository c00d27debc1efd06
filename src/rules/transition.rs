//! Activity status transition validation.

use super::dependency::is_blocked;
use super::Rejection;
use crate::models::{Activity, ActivityStatus};

/// Validate a requested status change against the current snapshot.
///
/// Gate order is fixed:
/// 1. Dependency gate: a blocked activity rejects every transition,
///    whatever the target status.
/// 2. Evidence gate: only when the target is `Done` and the activity names
///    a required evidence. `evidence_present` must come from a live
///    evidence-store query, not from the cached `has_file_uploaded` flag.
/// 3. Otherwise the transition is approved and the caller persists it.
///
/// The caller's role is deliberately not consulted here: activity status
/// changes are open to any collaborator who can see the activity. Only the
/// mechanism pipeline is role-gated.
pub fn validate_transition(
    activity: &Activity,
    target: ActivityStatus,
    evidence_present: bool,
    snapshot: &[Activity],
) -> Result<(), Rejection> {
    if is_blocked(activity, snapshot) {
        // is_blocked only returns true when a dependency code is present.
        let code = activity.dependency().unwrap_or_default().to_string();
        return Err(Rejection::BlockedByDependency { code });
    }

    if target == ActivityStatus::Done {
        if let Some(requirement) = activity.required_evidence() {
            if !evidence_present {
                return Err(Rejection::MissingEvidence {
                    requirement: requirement.to_string(),
                });
            }
        }
    }

    Ok(())
}
