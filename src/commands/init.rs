use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;

use crate::store::{store_config, Config, DataDir};

/// Initialize the .cadence/ data directory in the current directory.
pub fn execute(program: Option<String>, start: Option<String>) -> Result<()> {
    println!("{}\n", crate::LOGO.blue());

    let cwd = std::env::current_dir()?;
    let dir = DataDir::new(&cwd);
    dir.initialize()?;

    let mut config = Config::default();
    if let Some(name) = program {
        config.program_name = name;
    }
    if let Some(date) = start {
        let parsed = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Invalid project start date (expected YYYY-MM-DD): {date}"))?;
        config.project_start = Some(parsed);
    }
    store_config(&dir, &config)?;

    println!(
        "{} Initialized {} for '{}'",
        "✓".green().bold(),
        ".cadence/".dimmed(),
        config.program_name
    );
    if config.project_start.is_none() {
        println!(
            "  {}",
            "No project start date set; week indices will display without calendar dates."
                .dimmed()
        );
    }

    Ok(())
}
