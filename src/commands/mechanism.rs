//! Mechanism subcommands: create, list, advance.

use anyhow::{bail, Result};
use colored::Colorize;

use super::open_data_dir;
use crate::engine::{advance_mechanism, CallerContext};
use crate::models::{Mechanism, PipelineStage, Role};
use crate::store::mechanisms::{list_mechanisms, load_mechanism_opt, save_mechanism};
use crate::store::StoreLock;
use crate::validation::validate_code;

/// Derive a mechanism id from its name: `mech-<slug>`.
fn generate_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("mech-{slug}")
}

/// Create a new mechanism in the Draft stage.
pub fn create(name: String, id: Option<String>, role: Role, user: Option<String>) -> Result<()> {
    let dir = open_data_dir()?;
    let _guard = StoreLock::acquire(&dir)?;

    let id = id.unwrap_or_else(|| generate_id(&name));
    validate_code(&id)?;

    if load_mechanism_opt(&dir, &id)?.is_some() {
        bail!("Mechanism already exists: {id}");
    }

    let ctx = CallerContext::with_name(role, user);
    let mechanism = Mechanism::new(id, name, ctx.attribution());
    save_mechanism(&dir, &mechanism)?;

    println!(
        "{} Created {} '{}' in stage {}",
        "✓".green().bold(),
        mechanism.id.cyan(),
        mechanism.name,
        mechanism.stage
    );
    Ok(())
}

/// List mechanisms grouped by pipeline stage.
pub fn list() -> Result<()> {
    let dir = open_data_dir()?;
    let mechanisms = list_mechanisms(&dir)?;

    if mechanisms.is_empty() {
        println!("{}", "No mechanisms yet.".dimmed());
        return Ok(());
    }

    for stage in PipelineStage::all() {
        let in_stage: Vec<_> = mechanisms.iter().filter(|m| m.stage == stage).collect();
        if in_stage.is_empty() {
            continue;
        }

        let header = match stage.advancing_role() {
            Some(role) => format!("{stage} (advanced by {role})"),
            None => format!("{stage} (final)"),
        };
        println!("{}", header.bold());

        for mechanism in in_stage {
            println!(
                "  {} {} (created by {})",
                mechanism.id.cyan(),
                mechanism.name,
                mechanism.created_by
            );
        }
    }
    Ok(())
}

/// Advance a mechanism one stage down the pipeline.
pub fn advance(id: String, role: Role, user: Option<String>) -> Result<()> {
    let dir = open_data_dir()?;
    let ctx = CallerContext::with_name(role, user);

    let updated = advance_mechanism(&dir, &id, &ctx)?;

    println!(
        "{} {} advanced to {}",
        "✓".green().bold(),
        updated.id.cyan(),
        updated.stage.to_string().bold()
    );
    Ok(())
}
