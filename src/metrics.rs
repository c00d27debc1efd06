//! Program progress roll-ups for the status dashboard.

use crate::models::{Activity, ActivityStatus, Role};

/// Overall schedule completion.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressMetrics {
    pub total: usize,
    pub completed: usize,
    /// Percentage of activities done, rounded to one decimal.
    pub progress_percent: f64,
}

/// Completion counts for one role's activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleProgress {
    pub role: Role,
    pub total: usize,
    pub completed: usize,
}

/// Compute overall progress from a snapshot. An empty schedule is 0.0%.
pub fn progress(snapshot: &[Activity]) -> ProgressMetrics {
    let total = snapshot.len();
    let completed = snapshot
        .iter()
        .filter(|a| a.status == ActivityStatus::Done)
        .count();

    let progress_percent = if total > 0 {
        let raw = completed as f64 / total as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    } else {
        0.0
    };

    ProgressMetrics {
        total,
        completed,
        progress_percent,
    }
}

/// Per-role completion breakdown, in reporting order, roles with no
/// activities omitted.
pub fn progress_by_role(snapshot: &[Activity]) -> Vec<RoleProgress> {
    Role::all()
        .into_iter()
        .filter_map(|role| {
            let of_role: Vec<_> = snapshot
                .iter()
                .filter(|a| a.primary_role == role)
                .collect();
            if of_role.is_empty() {
                return None;
            }
            let completed = of_role
                .iter()
                .filter(|a| a.status == ActivityStatus::Done)
                .count();
            Some(RoleProgress {
                role,
                total: of_role.len(),
                completed,
            })
        })
        .collect()
}
