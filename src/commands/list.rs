use anyhow::Result;
use colored::Colorize;

use super::{open_data_dir, paint_status};
use crate::models::{ActivityStatus, Role};
use crate::rules::is_blocked;
use crate::store::activities::list_activities;
use crate::store::load_config;

/// List activities, optionally filtered by role and status.
pub fn execute(role: Option<Role>, status: Option<ActivityStatus>) -> Result<()> {
    let dir = open_data_dir()?;
    let config = load_config(&dir)?;
    let snapshot = list_activities(&dir)?;

    let mut shown = 0;
    for activity in &snapshot {
        if role.is_some_and(|r| activity.primary_role != r) {
            continue;
        }
        if status.is_some_and(|s| activity.status != s) {
            continue;
        }
        shown += 1;

        let weeks = match config.week_start_date(activity.week_start) {
            Some(date) => format!(
                "w{:>2}-{:<2} (from {})",
                activity.week_start, activity.week_end, date
            ),
            None => format!("w{:>2}-{:<2}", activity.week_start, activity.week_end),
        };

        let lock = if is_blocked(activity, &snapshot) {
            " [blocked by dependency]".red().to_string()
        } else {
            String::new()
        };

        println!(
            "{:<8} {:<12} {:<10} {}  {}{}",
            activity.activity_code.cyan(),
            paint_status(activity.status),
            activity.primary_role.to_string(),
            weeks.dimmed(),
            activity.task_name,
            lock
        );
    }

    if shown == 0 {
        println!("{}", "No matching activities.".dimmed());
    }

    Ok(())
}
