//! Generation history persistence.
//!
//! The generation core only talks to the [`HistoryRecorder`] trait; the
//! JSON file store below is the CLI's implementation of it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FcgError, Result};
use crate::model::HistoryRecord;

/// Collaborator that receives one record per successful generation.
pub trait HistoryRecorder: Send {
    fn record(&mut self, record: HistoryRecord) -> Result<()>;
}

/// In-memory recorder, mostly for tests and dry runs.
impl HistoryRecorder for Vec<HistoryRecord> {
    fn record(&mut self, record: HistoryRecord) -> Result<()> {
        self.insert(0, record);
        Ok(())
    }
}

/// History store backed by a JSON file in the platform data directory.
///
/// Records are kept newest-first. Every mutation rewrites the file, which
/// is fine at classroom scale (tens of records per term).
pub struct JsonHistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl JsonHistoryStore {
    /// Opens (or initializes) the store at the default data path.
    pub fn open_default() -> Result<Self> {
        let dir = crate::config::get_data_dir()
            .ok_or_else(|| FcgError::Config("Failed to determine data directory".to_string()))?;
        Self::open(dir.join("history.json"))
    }

    /// Opens (or initializes) the store at an explicit path.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let data = fs::read_to_string(&path)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Deletes one record by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Removes all records.
    pub fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl HistoryRecorder for JsonHistoryStore {
    fn record(&mut self, record: HistoryRecord) -> Result<()> {
        tracing::debug!(
            "recording history entry for {} ({} chars)",
            record.student_name,
            record.comment.chars().count()
        );
        self.records.insert(0, record);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;
    use pretty_assertions::assert_eq;

    fn sample_record(name: &str) -> HistoryRecord {
        let student = Student::new("01", name);
        HistoryRecord::for_student(&student, "評語", "溫馨", 100)
    }

    #[test]
    fn test_records_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path).unwrap();
        store.record(sample_record("王小明")).unwrap();
        store.record(sample_record("李小華")).unwrap();

        let reopened = JsonHistoryStore::open(&path).unwrap();
        assert_eq!(reopened.records().len(), 2);
        // Newest first.
        assert_eq!(reopened.records()[0].student_name, "李小華");
    }

    #[test]
    fn test_delete_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::open(dir.path().join("h.json")).unwrap();
        store.record(sample_record("甲")).unwrap();
        store.record(sample_record("乙")).unwrap();

        let id = store.records()[0].id.clone();
        assert!(store.delete(&id).unwrap());
        assert_eq!(store.records().len(), 1);
        assert!(!store.delete("no-such-id").unwrap());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::open(dir.path().join("h.json")).unwrap();
        store.record(sample_record("甲")).unwrap();
        store.clear().unwrap();
        assert!(store.records().is_empty());

        let reopened = JsonHistoryStore::open(store.path()).unwrap();
        assert!(reopened.records().is_empty());
    }

    #[test]
    fn test_vec_recorder_keeps_newest_first() {
        let mut recorder: Vec<HistoryRecord> = Vec::new();
        recorder.record(sample_record("甲")).unwrap();
        recorder.record(sample_record("乙")).unwrap();
        assert_eq!(recorder[0].student_name, "乙");
    }
}
