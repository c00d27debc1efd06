//! File locking utilities for safe concurrent access.
//!
//! Provides locked read/write operations using `fs2` advisory locks, plus a
//! store-level mutation guard so a whole check-then-write sequence runs
//! under one exclusive lock.
//!
//! Advisory locks are cooperative - all participants must go through these
//! helpers for the locking to be effective.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::data_dir::DataDir;

/// Read file contents with a shared (read) lock.
///
/// Allows multiple concurrent readers but blocks while an exclusive
/// (write) lock is held.
pub fn locked_read(path: &Path) -> Result<String> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(content)
}

/// Write file contents with an exclusive (write) lock.
///
/// Acquires the exclusive lock BEFORE truncating the file, preventing the
/// TOCTOU race where another process reads an empty file between truncation
/// and write completion. The sequence is: open, lock, truncate, write,
/// flush.
pub fn locked_write(path: &Path, content: &str) -> Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

/// Exclusive lock over the whole data directory for mutating operations.
///
/// The read-check-write sequence behind a status change or a pipeline
/// advance is racy on its own; holding this guard for the full sequence
/// serializes concurrent CLI invocations. The lock is released on drop.
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    pub fn acquire(dir: &DataDir) -> Result<Self> {
        let path = dir.lock_path();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire store lock: {}", path.display()))?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
