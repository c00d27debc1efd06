use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// Sentinel markers meaning "no value" in reference fields.
///
/// Schedule data imported from earlier spreadsheets uses `-` and `?` as
/// placeholders in the dependency and evidence columns. They are equivalent
/// to an absent value everywhere in the system.
const REFERENCE_SENTINELS: &[&str] = &["", "-", "?"];

/// Normalize a nullable reference field, mapping sentinel markers to `None`.
pub fn normalize_reference(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if REFERENCE_SENTINELS.contains(&value) {
        None
    } else {
        Some(value)
    }
}

/// A scheduled unit of work in the master program schedule.
///
/// Activities are keyed by `activity_code` (unique, human-assigned). At most
/// one upstream dependency is supported: `dependency_code` names the
/// `activity_code` of the parent, or holds a sentinel meaning "none".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub activity_code: String,
    pub task_name: String,
    /// Week indices relative to the configured project start date.
    pub week_start: u32,
    pub week_end: u32,
    pub dependency_code: Option<String>,
    pub evidence_requirement: Option<String>,
    pub primary_role: Role,
    #[serde(default)]
    pub co_responsibles: Vec<String>,
    pub status: ActivityStatus,
    /// Display cache only. The transition rules query the evidence store
    /// live; this flag is refreshed by the explicit evidence sync step.
    #[serde(default)]
    pub has_file_uploaded: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Status of an activity in the schedule.
///
/// There is no enforced status graph: the transition rules gate writes on
/// dependency completion and evidence presence, not on the previous status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivityStatus {
    /// Not started.
    #[serde(rename = "pending", alias = "PENDING")]
    Pending,

    /// Actively being worked on.
    #[serde(rename = "in-progress", alias = "IN_PROGRESS")]
    InProgress,

    /// Flagged as blocked by its owner (distinct from computed dependency
    /// blocking, which is derived from the snapshot at read time).
    #[serde(rename = "blocked", alias = "BLOCKED")]
    Blocked,

    /// Finished. Completion releases downstream dependents.
    #[serde(rename = "done", alias = "DONE")]
    Done,
}

impl ActivityStatus {
    /// All statuses, in reporting order.
    pub fn all() -> [ActivityStatus; 4] {
        [
            ActivityStatus::Pending,
            ActivityStatus::InProgress,
            ActivityStatus::Blocked,
            ActivityStatus::Done,
        ]
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Pending => write!(f, "pending"),
            ActivityStatus::InProgress => write!(f, "in-progress"),
            ActivityStatus::Blocked => write!(f, "blocked"),
            ActivityStatus::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for ActivityStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ActivityStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(ActivityStatus::InProgress),
            "blocked" => Ok(ActivityStatus::Blocked),
            "done" => Ok(ActivityStatus::Done),
            _ => anyhow::bail!(
                "Invalid activity status: {s}. Valid values: pending, in-progress, blocked, done"
            ),
        }
    }
}

impl Activity {
    pub fn new(activity_code: String, task_name: String, primary_role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            activity_code,
            task_name,
            week_start: 0,
            week_end: 0,
            dependency_code: None,
            evidence_requirement: None,
            primary_role,
            co_responsibles: Vec::new(),
            status: ActivityStatus::Pending,
            has_file_uploaded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// The upstream dependency code, with sentinels normalized away.
    pub fn dependency(&self) -> Option<&str> {
        normalize_reference(self.dependency_code.as_deref())
    }

    /// The evidence requirement, with sentinels normalized away.
    pub fn required_evidence(&self) -> Option<&str> {
        normalize_reference(self.evidence_requirement.as_deref())
    }

    pub fn set_status(&mut self, status: ActivityStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_schedule(&mut self, week_start: u32, week_end: u32) {
        self.week_start = week_start;
        self.week_end = week_end;
        self.updated_at = Utc::now();
    }

    pub fn set_file_uploaded(&mut self, uploaded: bool) {
        if self.has_file_uploaded != uploaded {
            self.has_file_uploaded = uploaded;
            self.updated_at = Utc::now();
        }
    }
}
