use anyhow::Result;
use colored::Colorize;

use super::open_data_dir;
use crate::engine::{set_status, CallerContext};
use crate::models::{ActivityStatus, Role};

/// Change an activity's status through the transition rules.
pub fn execute(
    activity_code: String,
    target: ActivityStatus,
    role: Role,
    user: Option<String>,
) -> Result<()> {
    let dir = open_data_dir()?;
    let ctx = CallerContext::with_name(role, user);

    let updated = set_status(&dir, &activity_code, target, &ctx)?;

    println!(
        "{} {} is now {}",
        "✓".green().bold(),
        updated.activity_code.cyan(),
        updated.status
    );
    Ok(())
}
