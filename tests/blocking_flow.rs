//! Integration tests for dependency blocking across the engine and store.

use cadence::engine::{blocked_report, set_status, CallerContext};
use cadence::models::{Activity, ActivityStatus, Role};
use cadence::rules::{is_blocked, Rejection};
use cadence::store::activities::{list_activities, load_activity, save_activity};
use cadence::store::DataDir;
use tempfile::TempDir;

fn setup() -> (TempDir, DataDir) {
    let temp = TempDir::new().unwrap();
    let dir = DataDir::new(temp.path());
    dir.initialize().expect("Should initialize data dir");
    (temp, dir)
}

fn save(dir: &DataDir, code: &str, dependency: Option<&str>) {
    let mut activity = Activity::new(code.to_string(), format!("Task {code}"), Role::Coord);
    activity.dependency_code = dependency.map(str::to_string);
    save_activity(dir, &activity).expect("Should save activity");
}

#[test]
fn test_dependency_chain_unblocks_as_parents_complete() {
    let (_temp, dir) = setup();
    let coord = CallerContext::new(Role::Coord);

    // A001 has no dependency and no evidence requirement; A002 depends on
    // A001; A003 depends on A002.
    save(&dir, "A001", None);
    save(&dir, "A002", Some("A001"));
    save(&dir, "A003", Some("A002"));

    let snapshot = list_activities(&dir).expect("Should list activities");
    assert_eq!(snapshot.len(), 3);

    // Initially only A001 is actionable.
    assert!(!is_blocked(&snapshot[0], &snapshot));
    assert!(is_blocked(&snapshot[1], &snapshot));
    assert!(is_blocked(&snapshot[2], &snapshot));

    // Completing A002 while blocked is rejected and nothing is written.
    let err = set_status(&dir, "A002", ActivityStatus::Done, &coord).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Rejection>(),
        Some(Rejection::BlockedByDependency { code }) if code == "A001"
    ));
    assert_eq!(
        load_activity(&dir, "A002").unwrap().status,
        ActivityStatus::Pending
    );

    // A001 (no dependency, no evidence requirement) completes directly.
    set_status(&dir, "A001", ActivityStatus::Done, &coord).expect("Should complete A001");

    // A002 is released; A003 is still waiting on A002.
    let snapshot = list_activities(&dir).unwrap();
    let a002 = snapshot.iter().find(|a| a.activity_code == "A002").unwrap();
    let a003 = snapshot.iter().find(|a| a.activity_code == "A003").unwrap();
    assert!(!is_blocked(a002, &snapshot));
    assert!(is_blocked(a003, &snapshot));

    set_status(&dir, "A002", ActivityStatus::Done, &coord).expect("Should complete A002");
    set_status(&dir, "A003", ActivityStatus::Done, &coord).expect("Should complete A003");
}

#[test]
fn test_blocked_report_tracks_snapshot_changes() {
    let (_temp, dir) = setup();
    let coord = CallerContext::new(Role::Coord);

    save(&dir, "A001", None);
    save(&dir, "A002", Some("A001"));

    let report = blocked_report(&dir).expect("Should build report");
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].activity_code, "A002");
    assert_eq!(report[0].dependency_code, "A001");

    set_status(&dir, "A001", ActivityStatus::Done, &coord).unwrap();
    assert!(blocked_report(&dir).unwrap().is_empty());
}

#[test]
fn test_dangling_and_sentinel_dependencies_never_block() {
    let (_temp, dir) = setup();
    let coord = CallerContext::new(Role::Coord);

    save(&dir, "A001", Some("EXTERNAL-99"));
    save(&dir, "A002", Some("-"));
    save(&dir, "A003", Some("?"));

    assert!(blocked_report(&dir).unwrap().is_empty());

    // All three are actionable despite the odd dependency fields.
    for code in ["A001", "A002", "A003"] {
        set_status(&dir, code, ActivityStatus::Done, &coord)
            .unwrap_or_else(|e| panic!("{code} should complete: {e}"));
    }
}

#[test]
fn test_backward_move_is_validated_and_allowed() {
    let (_temp, dir) = setup();
    let coord = CallerContext::new(Role::Coord);

    save(&dir, "A001", None);
    set_status(&dir, "A001", ActivityStatus::Done, &coord).unwrap();

    // Reopening goes through the same gates and succeeds when clear.
    let reopened = set_status(&dir, "A001", ActivityStatus::InProgress, &coord).unwrap();
    assert_eq!(reopened.status, ActivityStatus::InProgress);
}
