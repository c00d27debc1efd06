//! Check-then-write orchestration over the store.
//!
//! Every mutating operation here follows the same shape: acquire the store
//! lock, read a fresh snapshot, consult the rules, perform a single
//! persistence write. Rule rejections pass through as [`Rejection`] (still
//! downcastable from the returned `anyhow::Error`); everything else in the
//! error chain is a store I/O failure.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::{Activity, ActivityStatus, EvidenceFile, Mechanism, Role};
use crate::rules::{advance, is_blocked, validate_transition};
use crate::store::activities::{
    list_activities, load_activity, save_activity, update_status,
};
use crate::store::evidence::{delete_evidence, has_evidence, save_evidence};
use crate::store::mechanisms::{load_mechanism, update_stage};
use crate::store::{DataDir, StoreLock};

/// Who is performing an operation.
///
/// Caller identity is always explicit: there is no ambient "current user".
/// The role only gates the mechanism pipeline; for activity transitions it
/// is carried for logging and evidence attribution.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub role: Role,
    pub name: Option<String>,
}

impl CallerContext {
    pub fn new(role: Role) -> Self {
        Self { role, name: None }
    }

    pub fn with_name(role: Role, name: Option<String>) -> Self {
        Self { role, name }
    }

    /// Attribution string for records and logs: the caller's name when
    /// given, otherwise the role.
    pub fn attribution(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.role.to_string(),
        }
    }
}

/// An activity currently blocked by its dependency, for reporting.
#[derive(Debug, Clone)]
pub struct BlockedActivity {
    pub activity_code: String,
    pub task_name: String,
    pub dependency_code: String,
}

/// Change an activity's status, enforcing the transition rules.
///
/// The evidence answer comes from a live store query, never from the
/// activity's cached flag. The whole read-check-write sequence holds the
/// store lock.
pub fn set_status(
    dir: &DataDir,
    activity_code: &str,
    target: ActivityStatus,
    ctx: &CallerContext,
) -> Result<Activity> {
    let _guard = StoreLock::acquire(dir)?;

    let snapshot = list_activities(dir)?;
    let activity = snapshot
        .iter()
        .find(|a| a.activity_code == activity_code)
        .with_context(|| format!("Unknown activity: {activity_code}"))?;

    let evidence_present = has_evidence(dir, activity_code)?;
    validate_transition(activity, target, evidence_present, &snapshot)?;

    let updated = update_status(dir, activity_code, target)?;
    info!(
        activity = %activity_code,
        status = %target,
        caller = %ctx.attribution(),
        "Activity status updated"
    );
    Ok(updated)
}

/// Advance a mechanism one stage down the approval pipeline.
///
/// Rejections happen before the write, so a failed call leaves the
/// mechanism record untouched.
pub fn advance_mechanism(dir: &DataDir, id: &str, ctx: &CallerContext) -> Result<Mechanism> {
    let _guard = StoreLock::acquire(dir)?;

    let mechanism = load_mechanism(dir, id)?;
    let next = advance(mechanism.stage, ctx.role)?;

    let updated = update_stage(dir, id, next)?;
    info!(
        mechanism = %id,
        stage = %next,
        caller = %ctx.attribution(),
        "Mechanism advanced"
    );
    Ok(updated)
}

/// Attach an evidence file to an activity.
///
/// Copies the payload into the store's files area, records the evidence,
/// and refreshes the activity's display cache.
pub fn attach_evidence(
    dir: &DataDir,
    activity_code: &str,
    source: &Path,
    ctx: &CallerContext,
) -> Result<EvidenceFile> {
    let _guard = StoreLock::acquire(dir)?;

    let mut activity = load_activity(dir, activity_code)?;

    if !source.is_file() {
        bail!("Evidence file not found: {}", source.display());
    }
    let filename = source
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid evidence file name: {}", source.display()))?
        .to_string();

    let record = EvidenceFile::new(
        activity_code.to_string(),
        filename,
        &dir.files_dir(),
        ctx.attribution(),
    );
    fs::copy(source, &record.storage_path).with_context(|| {
        format!(
            "Failed to copy evidence into store: {}",
            record.storage_path.display()
        )
    })?;
    save_evidence(dir, &record)?;

    activity.set_file_uploaded(true);
    save_activity(dir, &activity)?;

    info!(
        activity = %activity_code,
        file = %record.filename,
        caller = %ctx.attribution(),
        "Evidence attached"
    );
    Ok(record)
}

/// Remove an evidence record (and its stored payload), then refresh the
/// owning activity's display cache.
pub fn remove_evidence(dir: &DataDir, id: uuid::Uuid) -> Result<EvidenceFile> {
    let _guard = StoreLock::acquire(dir)?;

    let record = delete_evidence(dir, id)?;

    // The activity may have been deleted out from under the record.
    if let Some(mut activity) =
        crate::store::activities::load_activity_opt(dir, &record.activity_code)?
    {
        let still_present = has_evidence(dir, &record.activity_code)?;
        activity.set_file_uploaded(still_present);
        save_activity(dir, &activity)?;
    }

    info!(activity = %record.activity_code, file = %record.filename, "Evidence removed");
    Ok(record)
}

/// Recompute every activity's cached `has_file_uploaded` flag from the
/// evidence store. Returns the number of activities whose flag changed.
pub fn sync_evidence_flags(dir: &DataDir) -> Result<usize> {
    let _guard = StoreLock::acquire(dir)?;

    let mut changed = 0;
    for mut activity in list_activities(dir)? {
        let present = has_evidence(dir, &activity.activity_code)?;
        if activity.has_file_uploaded != present {
            debug!(
                activity = %activity.activity_code,
                present,
                "Evidence flag out of sync"
            );
            activity.set_file_uploaded(present);
            save_activity(dir, &activity)?;
            changed += 1;
        }
    }

    if changed > 0 {
        info!(changed, "Evidence flags synced");
    }
    Ok(changed)
}

/// All activities currently blocked by an unfinished dependency.
pub fn blocked_report(dir: &DataDir) -> Result<Vec<BlockedActivity>> {
    let snapshot = list_activities(dir)?;

    let blocked = snapshot
        .iter()
        .filter(|a| is_blocked(a, &snapshot))
        .map(|a| BlockedActivity {
            activity_code: a.activity_code.clone(),
            task_name: a.task_name.clone(),
            // is_blocked is only true when a dependency code is present.
            dependency_code: a.dependency().unwrap_or_default().to_string(),
        })
        .collect();

    Ok(blocked)
}
