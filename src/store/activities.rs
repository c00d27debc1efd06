//! Activity record I/O: `.cadence/activities/{activity_code}.json`

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::data_dir::DataDir;
use super::locking::{locked_read, locked_write};
use crate::models::{Activity, ActivityStatus};

pub fn activity_path(dir: &DataDir, activity_code: &str) -> PathBuf {
    dir.activities_dir().join(format!("{activity_code}.json"))
}

pub fn save_activity(dir: &DataDir, activity: &Activity) -> Result<PathBuf> {
    let path = activity_path(dir, &activity.activity_code);
    let json = serde_json::to_string_pretty(activity)
        .context("Failed to serialize activity record")?;
    locked_write(&path, &json)?;
    Ok(path)
}

pub fn load_activity(dir: &DataDir, activity_code: &str) -> Result<Activity> {
    let path = activity_path(dir, activity_code);
    let content = locked_read(&path)
        .with_context(|| format!("Unknown activity: {activity_code}"))?;
    let activity: Activity = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse activity record: {}", path.display()))?;
    Ok(activity)
}

pub fn load_activity_opt(dir: &DataDir, activity_code: &str) -> Result<Option<Activity>> {
    if !activity_path(dir, activity_code).exists() {
        return Ok(None);
    }
    load_activity(dir, activity_code).map(Some)
}

pub fn activity_exists(dir: &DataDir, activity_code: &str) -> bool {
    activity_path(dir, activity_code).exists()
}

pub fn delete_activity(dir: &DataDir, activity_code: &str) -> Result<()> {
    let path = activity_path(dir, activity_code);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete activity: {}", path.display()))?;
    }
    Ok(())
}

/// List all activities, sorted by activity code for deterministic output.
///
/// Unparseable records are skipped with a warning rather than failing the
/// whole listing.
pub fn list_activities(dir: &DataDir) -> Result<Vec<Activity>> {
    let activities_dir = dir.activities_dir();

    if !activities_dir.exists() {
        return Ok(Vec::new());
    }

    let mut activities = Vec::new();
    let entries = fs::read_dir(&activities_dir).with_context(|| {
        format!(
            "Failed to read activities directory: {}",
            activities_dir.display()
        )
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        match locked_read(&path) {
            Ok(content) => match serde_json::from_str::<Activity>(&content) {
                Ok(activity) => activities.push(activity),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unparseable activity record");
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable activity record");
            }
        }
    }

    activities.sort_by(|a, b| a.activity_code.cmp(&b.activity_code));
    Ok(activities)
}

/// Persist a status change for one activity.
pub fn update_status(
    dir: &DataDir,
    activity_code: &str,
    status: ActivityStatus,
) -> Result<Activity> {
    let mut activity = load_activity(dir, activity_code)?;
    activity.set_status(status);
    save_activity(dir, &activity)?;
    Ok(activity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn test_dir() -> (tempfile::TempDir, DataDir) {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());
        dir.initialize().unwrap();
        (temp, dir)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp, dir) = test_dir();
        let mut activity = Activity::new(
            "A001".to_string(),
            "Inception report".to_string(),
            Role::Coord,
        );
        activity.set_schedule(1, 3);
        activity.evidence_requirement = Some("Signed report".to_string());

        save_activity(&dir, &activity).unwrap();
        let loaded = load_activity(&dir, "A001").unwrap();

        assert_eq!(loaded.id, activity.id);
        assert_eq!(loaded.task_name, "Inception report");
        assert_eq!(loaded.week_start, 1);
        assert_eq!(loaded.week_end, 3);
        assert_eq!(loaded.required_evidence(), Some("Signed report"));
        assert_eq!(loaded.status, ActivityStatus::Pending);
    }

    #[test]
    fn test_load_missing_names_the_code() {
        let (_temp, dir) = test_dir();
        let err = load_activity(&dir, "A404").unwrap_err();
        assert!(err.to_string().contains("A404"));
    }

    #[test]
    fn test_load_opt_missing_is_none() {
        let (_temp, dir) = test_dir();
        assert!(load_activity_opt(&dir, "A404").unwrap().is_none());
    }

    #[test]
    fn test_list_is_sorted_by_code() {
        let (_temp, dir) = test_dir();
        for code in ["B002", "A001", "C003"] {
            let activity =
                Activity::new(code.to_string(), format!("Task {code}"), Role::Legal);
            save_activity(&dir, &activity).unwrap();
        }

        let listed = list_activities(&dir).unwrap();
        let codes: Vec<_> = listed.iter().map(|a| a.activity_code.as_str()).collect();
        assert_eq!(codes, vec!["A001", "B002", "C003"]);
    }

    #[test]
    fn test_list_skips_corrupt_records() {
        let (_temp, dir) = test_dir();
        let activity = Activity::new("A001".to_string(), "Task".to_string(), Role::Coord);
        save_activity(&dir, &activity).unwrap();
        fs::write(dir.activities_dir().join("broken.json"), "{ not json").unwrap();

        let listed = list_activities(&dir).unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_update_status_persists() {
        let (_temp, dir) = test_dir();
        let activity = Activity::new("A001".to_string(), "Task".to_string(), Role::Coord);
        save_activity(&dir, &activity).unwrap();

        update_status(&dir, "A001", ActivityStatus::Done).unwrap();
        let loaded = load_activity(&dir, "A001").unwrap();
        assert_eq!(loaded.status, ActivityStatus::Done);
    }

    #[test]
    fn test_delete_activity() {
        let (_temp, dir) = test_dir();
        let activity = Activity::new("A001".to_string(), "Task".to_string(), Role::Coord);
        save_activity(&dir, &activity).unwrap();

        delete_activity(&dir, "A001").unwrap();
        assert!(!activity_exists(&dir, "A001"));
        // Deleting again is a no-op.
        delete_activity(&dir, "A001").unwrap();
    }
}
