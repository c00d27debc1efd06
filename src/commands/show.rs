use anyhow::Result;
use colored::Colorize;

use super::{open_data_dir, paint_status};
use crate::rules::is_blocked;
use crate::store::activities::{list_activities, load_activity};
use crate::store::evidence::list_evidence_for;
use crate::store::load_config;

/// Show one activity in detail.
pub fn execute(activity_code: String) -> Result<()> {
    let dir = open_data_dir()?;
    let config = load_config(&dir)?;
    let activity = load_activity(&dir, &activity_code)?;
    let snapshot = list_activities(&dir)?;

    println!(
        "{} {}",
        activity.activity_code.bold().cyan(),
        activity.task_name.bold()
    );
    println!("{}", "-".repeat(50));

    println!("  Status:      {}", paint_status(activity.status));
    println!("  Role:        {}", activity.primary_role);
    if !activity.co_responsibles.is_empty() {
        println!("  Also:        {}", activity.co_responsibles.join(", "));
    }

    match config.week_start_date(activity.week_start) {
        Some(date) => println!(
            "  Schedule:    weeks {}-{} (starting {})",
            activity.week_start, activity.week_end, date
        ),
        None => println!(
            "  Schedule:    weeks {}-{}",
            activity.week_start, activity.week_end
        ),
    }

    match activity.dependency() {
        Some(dep) => {
            if is_blocked(&activity, &snapshot) {
                println!("  Dependency:  {} {}", dep, "(not done, blocking)".red());
            } else {
                println!("  Dependency:  {} {}", dep, "(clear)".green());
            }
        }
        None => println!("  Dependency:  none"),
    }

    match activity.required_evidence() {
        Some(req) => println!("  Evidence:    {req}"),
        None => println!("  Evidence:    none required"),
    }

    let evidence = list_evidence_for(&dir, &activity_code)?;
    if evidence.is_empty() {
        println!("  Files:       none");
    } else {
        println!("  Files:");
        for record in evidence {
            println!(
                "    {} {} (by {}, {})",
                record.id.to_string().dimmed(),
                record.filename,
                record.uploaded_by,
                record.uploaded_at.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}
