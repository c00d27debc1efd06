//! Evidence subcommands: attach, list, remove, sync.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use uuid::Uuid;

use super::open_data_dir;
use crate::engine::{attach_evidence, remove_evidence, sync_evidence_flags, CallerContext};
use crate::models::Role;
use crate::store::evidence::{list_evidence, list_evidence_for};

/// Attach an evidence file to an activity.
pub fn attach(
    activity_code: String,
    file: PathBuf,
    role: Role,
    user: Option<String>,
) -> Result<()> {
    let dir = open_data_dir()?;
    let ctx = CallerContext::with_name(role, user);

    let record = attach_evidence(&dir, &activity_code, &file, &ctx)?;

    println!(
        "{} Attached '{}' to {} (record {})",
        "✓".green().bold(),
        record.filename,
        activity_code.cyan(),
        record.id.to_string().dimmed()
    );
    Ok(())
}

/// List evidence records, for one activity or for all.
pub fn list(activity_code: Option<String>) -> Result<()> {
    let dir = open_data_dir()?;

    let records = match &activity_code {
        Some(code) => list_evidence_for(&dir, code)?,
        None => list_evidence(&dir)?,
    };

    if records.is_empty() {
        println!("{}", "No evidence recorded.".dimmed());
        return Ok(());
    }

    for record in records {
        println!(
            "{} {:<8} {} (by {}, {})",
            record.id.to_string().dimmed(),
            record.activity_code.cyan(),
            record.filename,
            record.uploaded_by,
            record.uploaded_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

/// Remove one evidence record and its stored file.
pub fn remove(id: String) -> Result<()> {
    let dir = open_data_dir()?;
    let id: Uuid = id
        .parse()
        .with_context(|| format!("Invalid evidence record id: {id}"))?;

    let record = remove_evidence(&dir, id)?;

    println!(
        "{} Removed '{}' from {}",
        "✓".green().bold(),
        record.filename,
        record.activity_code.cyan()
    );
    Ok(())
}

/// Recompute every activity's cached evidence flag from the evidence store.
pub fn sync() -> Result<()> {
    let dir = open_data_dir()?;
    let changed = sync_evidence_flags(&dir)?;

    if changed == 0 {
        println!("{} Evidence flags already in sync", "✓".green().bold());
    } else {
        println!(
            "{} Evidence flags refreshed on {} activit{}",
            "✓".green().bold(),
            changed,
            if changed == 1 { "y" } else { "ies" }
        );
    }
    Ok(())
}
