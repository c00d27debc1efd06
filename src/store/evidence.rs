//! Evidence record I/O: `.cadence/evidence/{uuid}.json`
//!
//! Evidence records reference activities by `activity_code`. Presence of at
//! least one record is the authoritative answer to "does this activity have
//! evidence" - the activity's cached flag is display-only.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

use super::data_dir::DataDir;
use super::locking::{locked_read, locked_write};
use crate::models::EvidenceFile;

pub fn evidence_path(dir: &DataDir, id: Uuid) -> PathBuf {
    dir.evidence_dir().join(format!("{id}.json"))
}

pub fn save_evidence(dir: &DataDir, evidence: &EvidenceFile) -> Result<PathBuf> {
    let path = evidence_path(dir, evidence.id);
    let json = serde_json::to_string_pretty(evidence)
        .context("Failed to serialize evidence record")?;
    locked_write(&path, &json)?;
    Ok(path)
}

pub fn load_evidence(dir: &DataDir, id: Uuid) -> Result<EvidenceFile> {
    let path = evidence_path(dir, id);
    let content = locked_read(&path).with_context(|| format!("Unknown evidence record: {id}"))?;
    let evidence: EvidenceFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse evidence record: {}", path.display()))?;
    Ok(evidence)
}

/// List all evidence records, newest first.
pub fn list_evidence(dir: &DataDir) -> Result<Vec<EvidenceFile>> {
    let evidence_dir = dir.evidence_dir();

    if !evidence_dir.exists() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    let entries = fs::read_dir(&evidence_dir).with_context(|| {
        format!(
            "Failed to read evidence directory: {}",
            evidence_dir.display()
        )
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();

        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        match locked_read(&path) {
            Ok(content) => match serde_json::from_str::<EvidenceFile>(&content) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unparseable evidence record");
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable evidence record");
            }
        }
    }

    records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
    Ok(records)
}

/// List evidence records for one activity, newest first.
pub fn list_evidence_for(dir: &DataDir, activity_code: &str) -> Result<Vec<EvidenceFile>> {
    let mut records = list_evidence(dir)?;
    records.retain(|e| e.activity_code == activity_code);
    Ok(records)
}

/// Live presence query used by the transition rules.
pub fn has_evidence(dir: &DataDir, activity_code: &str) -> Result<bool> {
    Ok(!list_evidence_for(dir, activity_code)?.is_empty())
}

/// Delete an evidence record and its stored payload file.
pub fn delete_evidence(dir: &DataDir, id: Uuid) -> Result<EvidenceFile> {
    let record = load_evidence(dir, id)?;

    if record.storage_path.exists() {
        fs::remove_file(&record.storage_path).with_context(|| {
            format!(
                "Failed to delete stored evidence file: {}",
                record.storage_path.display()
            )
        })?;
    }

    let path = evidence_path(dir, id);
    fs::remove_file(&path)
        .with_context(|| format!("Failed to delete evidence record: {}", path.display()))?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir() -> (tempfile::TempDir, DataDir) {
        let temp = tempfile::tempdir().unwrap();
        let dir = DataDir::new(temp.path());
        dir.initialize().unwrap();
        (temp, dir)
    }

    fn record(dir: &DataDir, activity_code: &str, filename: &str) -> EvidenceFile {
        let evidence = EvidenceFile::new(
            activity_code.to_string(),
            filename.to_string(),
            &dir.files_dir(),
            "COORD".to_string(),
        );
        save_evidence(dir, &evidence).unwrap();
        evidence
    }

    #[test]
    fn test_has_evidence_reflects_records() {
        let (_temp, dir) = test_dir();
        assert!(!has_evidence(&dir, "A001").unwrap());

        record(&dir, "A001", "report.pdf");
        assert!(has_evidence(&dir, "A001").unwrap());
        assert!(!has_evidence(&dir, "A002").unwrap());
    }

    #[test]
    fn test_list_for_filters_by_activity() {
        let (_temp, dir) = test_dir();
        record(&dir, "A001", "report.pdf");
        record(&dir, "A001", "minutes.pdf");
        record(&dir, "A002", "survey.xlsx");

        let for_a001 = list_evidence_for(&dir, "A001").unwrap();
        assert_eq!(for_a001.len(), 2);
        assert!(for_a001.iter().all(|e| e.activity_code == "A001"));
    }

    #[test]
    fn test_delete_removes_record_and_payload() {
        let (_temp, dir) = test_dir();
        let evidence = record(&dir, "A001", "report.pdf");
        fs::write(&evidence.storage_path, b"payload").unwrap();

        delete_evidence(&dir, evidence.id).unwrap();

        assert!(!has_evidence(&dir, "A001").unwrap());
        assert!(!evidence.storage_path.exists());
    }

    #[test]
    fn test_delete_unknown_record_fails() {
        let (_temp, dir) = test_dir();
        assert!(delete_evidence(&dir, Uuid::new_v4()).is_err());
    }
}
