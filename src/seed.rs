//! Built-in demo program: a small master schedule with dependencies,
//! evidence requirements, and one draft mechanism. Used by `cadence seed`
//! and reusable from integration tests.

use crate::models::{Activity, Mechanism, Role};
use crate::store::Config;
use chrono::NaiveDate;

#[allow(clippy::too_many_arguments)]
fn activity(
    code: &str,
    name: &str,
    week_start: u32,
    week_end: u32,
    dependency: Option<&str>,
    evidence: Option<&str>,
    role: Role,
    co_responsibles: &[&str],
) -> Activity {
    let mut a = Activity::new(code.to_string(), name.to_string(), role);
    a.set_schedule(week_start, week_end);
    a.dependency_code = dependency.map(str::to_string);
    a.evidence_requirement = evidence.map(str::to_string);
    a.co_responsibles = co_responsibles.iter().map(|s| s.to_string()).collect();
    a
}

/// The demo master schedule, phased the way the program plan lays it out:
/// start-up (weeks 0-1), baseline (2-5), mechanism factory (6-11),
/// implementation (12-20), close-out (21+).
pub fn demo_activities() -> Vec<Activity> {
    vec![
        activity(
            "ARR-01",
            "Kickoff workshop with all counterparts",
            0,
            1,
            None,
            Some("Signed attendance list"),
            Role::Coord,
            &["Todos"],
        ),
        activity(
            "ARR-02",
            "Approved work plan",
            1,
            2,
            Some("ARR-01"),
            Some("Work plan document"),
            Role::Coord,
            &[],
        ),
        activity(
            "BAS-01",
            "Baseline survey design",
            2,
            3,
            Some("ARR-02"),
            None,
            Role::Coord,
            &["Patricio"],
        ),
        activity(
            "BAS-02",
            "Baseline field survey",
            3,
            5,
            Some("BAS-01"),
            Some("Survey dataset"),
            Role::Gobierno,
            &[],
        ),
        activity(
            "MEC-01",
            "Financing mechanism scoping note",
            6,
            8,
            Some("ARR-02"),
            Some("Scoping note"),
            Role::Finanzas,
            &[],
        ),
        activity(
            "MEC-02",
            "Mechanism design workshop",
            8,
            9,
            Some("MEC-01"),
            Some("Workshop minutes"),
            Role::Finanzas,
            &["Constanza"],
        ),
        activity(
            "LEG-01",
            "Regulatory gap analysis",
            6,
            9,
            Some("ARR-02"),
            Some("Gap analysis report"),
            Role::Legal,
            &[],
        ),
        activity(
            "LEG-02",
            "Draft regulation amendments",
            10,
            14,
            Some("LEG-01"),
            None,
            Role::Legal,
            &[],
        ),
        activity(
            "GEN-01",
            "Gender action plan",
            6,
            10,
            None,
            Some("Gender action plan"),
            Role::Coord,
            &[],
        ),
        activity(
            "IMP-01",
            "Pilot implementation",
            12,
            18,
            Some("MEC-02"),
            None,
            Role::Coord,
            &["Todos"],
        ),
        activity(
            "CIE-01",
            "Final program report",
            21,
            24,
            Some("IMP-01"),
            Some("Final report"),
            Role::Coord,
            &[],
        ),
    ]
}

pub fn demo_mechanisms() -> Vec<Mechanism> {
    vec![Mechanism::new(
        "mech-carbon-1".to_string(),
        "Carbon credit mechanism v1".to_string(),
        "Patricio".to_string(),
    )]
}

pub fn demo_config() -> Config {
    Config {
        program_name: "Water governance program".to_string(),
        project_start: NaiveDate::from_ymd_opt(2026, 3, 2),
    }
}
