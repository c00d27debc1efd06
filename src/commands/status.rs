use anyhow::Result;
use colored::Colorize;

use super::open_data_dir;
use crate::engine::blocked_report;
use crate::metrics::{progress, progress_by_role};
use crate::models::PipelineStage;
use crate::store::activities::list_activities;
use crate::store::evidence::list_evidence;
use crate::store::load_config;
use crate::store::mechanisms::list_mechanisms;

/// Show the program status dashboard.
pub fn execute() -> Result<()> {
    let dir = open_data_dir()?;
    let config = load_config(&dir)?;

    println!("{}", config.program_name.bold().blue());
    println!("{}", "=".repeat(50));

    let activities = list_activities(&dir)?;
    let mechanisms = list_mechanisms(&dir)?;
    let evidence = list_evidence(&dir)?;

    let metrics = progress(&activities);
    println!("\n{}", "Progress".bold());
    println!(
        "  {}/{} activities done ({}%)",
        metrics.completed, metrics.total, metrics.progress_percent
    );
    println!("  Evidence files: {}", evidence.len());

    let breakdown = progress_by_role(&activities);
    if !breakdown.is_empty() {
        println!("\n{}", "By role".bold());
        for entry in breakdown {
            println!("  {:<10} {}/{}", entry.role.to_string(), entry.completed, entry.total);
        }
    }

    if !mechanisms.is_empty() {
        println!("\n{}", "Mechanism pipeline".bold());
        for stage in PipelineStage::all() {
            let in_stage: Vec<_> = mechanisms.iter().filter(|m| m.stage == stage).collect();
            if in_stage.is_empty() {
                continue;
            }
            println!("  {}:", stage);
            for mechanism in in_stage {
                println!("    {} {}", mechanism.id.cyan(), mechanism.name);
            }
        }
    }

    println!("\n{}", "Blocking alerts".bold());
    let blocked = blocked_report(&dir)?;
    if blocked.is_empty() {
        println!("  {}", "No blocked activities.".green());
    } else {
        for entry in blocked {
            println!(
                "  {} {} - {} blocked by dependency {}",
                "!".red().bold(),
                entry.activity_code.red(),
                entry.task_name,
                entry.dependency_code.bold()
            );
        }
    }

    println!();
    Ok(())
}
