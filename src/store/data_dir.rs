use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The `.cadence/` data directory holding all tracked records.
pub struct DataDir {
    root: PathBuf,
}

const SUBDIRS: &[&str] = &["activities", "mechanisms", "evidence", "files"];

impl DataDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let root = base_path.as_ref().join(".cadence");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Create a fresh data directory. Fails if one already exists.
    pub fn initialize(&self) -> Result<()> {
        if self.root.exists() {
            bail!(".cadence directory already exists");
        }

        fs::create_dir_all(&self.root).context("Failed to create .cadence directory")?;

        for subdir in SUBDIRS {
            let path = self.root.join(subdir);
            fs::create_dir(&path)
                .with_context(|| format!("Failed to create {subdir} directory"))?;
        }

        self.create_readme()?;

        Ok(())
    }

    /// Open an existing data directory, repairing missing subdirectories.
    pub fn load(&self) -> Result<()> {
        if !self.root.exists() {
            bail!(".cadence directory does not exist. Run 'cadence init' first.");
        }

        for subdir in SUBDIRS {
            let path = self.root.join(subdir);
            if !path.exists() {
                // Auto-create missing directories instead of failing
                fs::create_dir(&path)
                    .with_context(|| format!("Failed to create missing directory: {subdir}"))?;
            }
        }

        Ok(())
    }

    fn create_readme(&self) -> Result<()> {
        let readme_content = r#"# cadence Data Directory

This directory is managed by the cadence CLI and contains:

- `activities/` - Scheduled activities, one JSON record per activity code
- `mechanisms/` - Financing mechanisms moving through the approval pipeline
- `evidence/` - Evidence file records attached to activities
- `files/` - Stored copies of attached evidence payloads
- `config.toml` - Program name and project start date

Do not manually edit these files unless you know what you're doing.
"#;

        let readme_path = self.root.join("README.md");
        fs::write(readme_path, readme_content).context("Failed to create README.md")?;

        Ok(())
    }

    pub fn activities_dir(&self) -> PathBuf {
        self.root.join("activities")
    }

    pub fn mechanisms_dir(&self) -> PathBuf {
        self.root.join("mechanisms")
    }

    pub fn evidence_dir(&self) -> PathBuf {
        self.root.join("evidence")
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join("files")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_creates_structure() {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());

        dir.initialize().unwrap();

        assert!(dir.activities_dir().is_dir());
        assert!(dir.mechanisms_dir().is_dir());
        assert!(dir.evidence_dir().is_dir());
        assert!(dir.files_dir().is_dir());
        assert!(dir.root().join("README.md").is_file());
    }

    #[test]
    fn test_initialize_twice_fails() {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());

        dir.initialize().unwrap();
        let result = dir.initialize();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn test_load_missing_fails_with_hint() {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());

        let result = dir.load();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cadence init"));
    }

    #[test]
    fn test_load_repairs_missing_subdirectory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());

        dir.initialize().unwrap();
        fs::remove_dir(dir.evidence_dir()).unwrap();

        dir.load().unwrap();
        assert!(dir.evidence_dir().is_dir());
    }
}
