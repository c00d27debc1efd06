//! Program configuration: `.cadence/config.toml`

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;

use super::data_dir::DataDir;

fn default_program_name() -> String {
    "Untitled program".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_program_name")]
    pub program_name: String,

    /// Calendar anchor for the schedule's week indices. Week 0 starts on
    /// this date. Display-only: stored records keep raw week indices.
    #[serde(default)]
    pub project_start: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program_name: default_program_name(),
            project_start: None,
        }
    }
}

impl Config {
    /// The calendar date on which the given week index begins, if a project
    /// start date is configured.
    pub fn week_start_date(&self, week: u32) -> Option<NaiveDate> {
        self.project_start
            .map(|start| start + Duration::weeks(i64::from(week)))
    }
}

/// Load the config, falling back to defaults when no file exists.
pub fn load_config(dir: &DataDir) -> Result<Config> {
    let path = dir.config_path();
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

pub fn store_config(dir: &DataDir, config: &Config) -> Result<()> {
    let path = dir.config_path();
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
