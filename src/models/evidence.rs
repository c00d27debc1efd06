use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A recorded evidence file attached to an activity.
///
/// Evidence records live independently of the activity: an activity may have
/// zero or more, and records can be deleted without touching the activity.
/// The payload is copied into the store's `files/` area at attach time;
/// `storage_path` points at that copy, prefixed with the record id so
/// identically named uploads never collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceFile {
    pub id: Uuid,
    pub activity_code: String,
    pub filename: String,
    pub storage_path: PathBuf,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

impl EvidenceFile {
    pub fn new(
        activity_code: String,
        filename: String,
        files_dir: &Path,
        uploaded_by: String,
    ) -> Self {
        let id = Uuid::new_v4();
        let storage_path = files_dir.join(format!("{id}-{filename}"));
        Self {
            id,
            activity_code,
            filename,
            storage_path,
            uploaded_by,
            uploaded_at: Utc::now(),
        }
    }
}
