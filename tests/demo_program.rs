//! End-to-end test over the built-in demo program.

use cadence::engine::{blocked_report, set_status, CallerContext};
use cadence::metrics::progress;
use cadence::models::{ActivityStatus, Role};
use cadence::seed::{demo_activities, demo_mechanisms};
use cadence::store::activities::{list_activities, save_activity};
use cadence::store::mechanisms::save_mechanism;
use cadence::store::DataDir;
use tempfile::TempDir;

fn seeded() -> (TempDir, DataDir) {
    let temp = TempDir::new().unwrap();
    let dir = DataDir::new(temp.path());
    dir.initialize().expect("Should initialize data dir");

    for activity in demo_activities() {
        save_activity(&dir, &activity).expect("Should save demo activity");
    }
    for mechanism in demo_mechanisms() {
        save_mechanism(&dir, &mechanism).expect("Should save demo mechanism");
    }
    (temp, dir)
}

#[test]
fn test_demo_program_round_trips_through_store() {
    let (_temp, dir) = seeded();

    let snapshot = list_activities(&dir).unwrap();
    assert_eq!(snapshot.len(), demo_activities().len());

    let metrics = progress(&snapshot);
    assert_eq!(metrics.completed, 0);
    assert_eq!(metrics.progress_percent, 0.0);
}

#[test]
fn test_demo_kickoff_unblocks_work_plan() {
    let (_temp, dir) = seeded();
    let coord = CallerContext::with_name(Role::Coord, Some("Astrid".to_string()));

    // The work plan waits on the kickoff workshop.
    let blocked: Vec<_> = blocked_report(&dir)
        .unwrap()
        .into_iter()
        .map(|b| b.activity_code)
        .collect();
    assert!(blocked.contains(&"ARR-02".to_string()));

    // The kickoff requires evidence; without it, completion is rejected.
    assert!(set_status(&dir, "ARR-01", ActivityStatus::Done, &coord).is_err());

    // The gender action plan has no dependency and can start right away.
    let started = set_status(&dir, "GEN-01", ActivityStatus::InProgress, &coord).unwrap();
    assert_eq!(started.status, ActivityStatus::InProgress);
}
