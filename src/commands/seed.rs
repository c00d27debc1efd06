use anyhow::{bail, Result};
use colored::Colorize;

use super::open_data_dir;
use crate::seed::{demo_activities, demo_config, demo_mechanisms};
use crate::store::activities::{list_activities, save_activity};
use crate::store::mechanisms::save_mechanism;
use crate::store::{store_config, StoreLock};

/// Load the built-in demo program into the data directory.
pub fn execute(force: bool) -> Result<()> {
    let dir = open_data_dir()?;
    let _guard = StoreLock::acquire(&dir)?;

    if !force && !list_activities(&dir)?.is_empty() {
        bail!("Data directory already contains activities. Use --force to seed over them.");
    }

    let config = demo_config();
    store_config(&dir, &config)?;

    let activities = demo_activities();
    for activity in &activities {
        save_activity(&dir, activity)?;
    }

    let mechanisms = demo_mechanisms();
    for mechanism in &mechanisms {
        save_mechanism(&dir, mechanism)?;
    }

    println!(
        "{} Seeded '{}': {} activities, {} mechanism(s)",
        "✓".green().bold(),
        config.program_name,
        activities.len(),
        mechanisms.len()
    );

    Ok(())
}
