//! Integration tests for evidence gating and the cached-flag sync step.

use cadence::engine::{
    attach_evidence, remove_evidence, set_status, sync_evidence_flags, CallerContext,
};
use cadence::models::{Activity, ActivityStatus, Role};
use cadence::rules::Rejection;
use cadence::store::activities::{load_activity, save_activity};
use cadence::store::evidence::{has_evidence, list_evidence_for};
use cadence::store::DataDir;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, DataDir) {
    let temp = TempDir::new().unwrap();
    let dir = DataDir::new(temp.path());
    dir.initialize().expect("Should initialize data dir");
    (temp, dir)
}

fn save_with_requirement(dir: &DataDir, code: &str, requirement: &str) {
    let mut activity = Activity::new(code.to_string(), format!("Task {code}"), Role::Legal);
    activity.evidence_requirement = Some(requirement.to_string());
    save_activity(dir, &activity).expect("Should save activity");
}

#[test]
fn test_completion_gated_until_evidence_attached() {
    let (temp, dir) = setup();
    let legal = CallerContext::with_name(Role::Legal, Some("Constanza".to_string()));

    save_with_requirement(&dir, "LEG-01", "Gap analysis report");

    // No evidence yet: completion is rejected with the requirement named.
    let err = set_status(&dir, "LEG-01", ActivityStatus::Done, &legal).unwrap_err();
    match err.downcast_ref::<Rejection>() {
        Some(Rejection::MissingEvidence { requirement }) => {
            assert_eq!(requirement, "Gap analysis report");
        }
        other => panic!("Expected MissingEvidence, got {other:?}"),
    }

    // Attach a file and retry.
    let source = temp.path().join("gap-analysis.pdf");
    fs::write(&source, b"final version").unwrap();
    let record = attach_evidence(&dir, "LEG-01", &source, &legal).unwrap();
    assert_eq!(record.uploaded_by, "Constanza");
    assert!(has_evidence(&dir, "LEG-01").unwrap());

    let done = set_status(&dir, "LEG-01", ActivityStatus::Done, &legal).unwrap();
    assert_eq!(done.status, ActivityStatus::Done);
}

#[test]
fn test_non_done_targets_ignore_evidence_requirement() {
    let (_temp, dir) = setup();
    let legal = CallerContext::new(Role::Legal);

    save_with_requirement(&dir, "LEG-01", "Gap analysis report");

    let updated = set_status(&dir, "LEG-01", ActivityStatus::InProgress, &legal).unwrap();
    assert_eq!(updated.status, ActivityStatus::InProgress);
}

#[test]
fn test_stale_cached_flag_does_not_bypass_gate() {
    let (_temp, dir) = setup();
    let legal = CallerContext::new(Role::Legal);

    save_with_requirement(&dir, "LEG-01", "Gap analysis report");

    // Corrupt the display cache: flag says uploaded, store has nothing.
    let mut activity = load_activity(&dir, "LEG-01").unwrap();
    activity.set_file_uploaded(true);
    save_activity(&dir, &activity).unwrap();

    let err = set_status(&dir, "LEG-01", ActivityStatus::Done, &legal).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Rejection>(),
        Some(Rejection::MissingEvidence { .. })
    ));

    // The sync step repairs the cache.
    assert_eq!(sync_evidence_flags(&dir).unwrap(), 1);
    assert!(!load_activity(&dir, "LEG-01").unwrap().has_file_uploaded);
}

#[test]
fn test_remove_evidence_restores_the_gate() {
    let (temp, dir) = setup();
    let legal = CallerContext::new(Role::Legal);

    save_with_requirement(&dir, "LEG-01", "Gap analysis report");

    let source = temp.path().join("draft.pdf");
    fs::write(&source, b"draft").unwrap();
    let record = attach_evidence(&dir, "LEG-01", &source, &legal).unwrap();
    assert!(record.storage_path.is_file());

    remove_evidence(&dir, record.id).unwrap();
    assert!(list_evidence_for(&dir, "LEG-01").unwrap().is_empty());
    assert!(!record.storage_path.exists());
    assert!(!load_activity(&dir, "LEG-01").unwrap().has_file_uploaded);

    let err = set_status(&dir, "LEG-01", ActivityStatus::Done, &legal).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Rejection>(),
        Some(Rejection::MissingEvidence { .. })
    ));
}

#[test]
fn test_multiple_files_per_activity() {
    let (temp, dir) = setup();
    let legal = CallerContext::new(Role::Legal);

    save_with_requirement(&dir, "LEG-01", "Gap analysis report");

    for name in ["part-1.pdf", "part-2.pdf"] {
        let source = temp.path().join(name);
        fs::write(&source, b"content").unwrap();
        attach_evidence(&dir, "LEG-01", &source, &legal).unwrap();
    }

    let records = list_evidence_for(&dir, "LEG-01").unwrap();
    assert_eq!(records.len(), 2);

    // Removing one file still leaves evidence present.
    remove_evidence(&dir, records[0].id).unwrap();
    assert!(has_evidence(&dir, "LEG-01").unwrap());
    assert!(load_activity(&dir, "LEG-01").unwrap().has_file_uploaded);
}
