//! Mechanism record I/O: `.cadence/mechanisms/{id}.json`

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::data_dir::DataDir;
use super::locking::{locked_read, locked_write};
use crate::models::{Mechanism, PipelineStage};

pub fn mechanism_path(dir: &DataDir, id: &str) -> PathBuf {
    dir.mechanisms_dir().join(format!("{id}.json"))
}

pub fn save_mechanism(dir: &DataDir, mechanism: &Mechanism) -> Result<PathBuf> {
    let path = mechanism_path(dir, &mechanism.id);
    let json = serde_json::to_string_pretty(mechanism)
        .context("Failed to serialize mechanism record")?;
    locked_write(&path, &json)?;
    Ok(path)
}

pub fn load_mechanism(dir: &DataDir, id: &str) -> Result<Mechanism> {
    let path = mechanism_path(dir, id);
    let content = locked_read(&path).with_context(|| format!("Unknown mechanism: {id}"))?;
    let mechanism: Mechanism = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mechanism record: {}", path.display()))?;
    Ok(mechanism)
}

pub fn load_mechanism_opt(dir: &DataDir, id: &str) -> Result<Option<Mechanism>> {
    if !mechanism_path(dir, id).exists() {
        return Ok(None);
    }
    load_mechanism(dir, id).map(Some)
}

/// List all mechanisms, sorted by id.
pub fn list_mechanisms(dir: &DataDir) -> Result<Vec<Mechanism>> {
    let mechanisms_dir = dir.mechanisms_dir();

    if !mechanisms_dir.exists() {
        return Ok(Vec::new());
    }

    let mut mechanisms = Vec::new();
    let entries = fs::read_dir(&mechanisms_dir).with_context(|| {
        format!(
            "Failed to read mechanisms directory: {}",
            mechanisms_dir.display()
        )
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        match locked_read(&path) {
            Ok(content) => match serde_json::from_str::<Mechanism>(&content) {
                Ok(mechanism) => mechanisms.push(mechanism),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unparseable mechanism record");
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable mechanism record");
            }
        }
    }

    mechanisms.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(mechanisms)
}

/// Persist a stage change for one mechanism.
pub fn update_stage(dir: &DataDir, id: &str, stage: PipelineStage) -> Result<Mechanism> {
    let mut mechanism = load_mechanism(dir, id)?;
    mechanism.set_stage(stage);
    save_mechanism(dir, &mechanism)?;
    Ok(mechanism)
}
