use super::LedgerBackend;
use crate::error::{QrError, Result};
use crate::model::HistoryRecord;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsLedger {
    path: PathBuf,
}

impl FsLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger at `history.json` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(super::LEDGER_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_err(&self, source: std::io::Error) -> QrError {
        QrError::LedgerWrite {
            path: self.path.clone(),
            source,
        }
    }

    fn write_tmp(&self, tmp: &Path, content: &str) -> std::io::Result<()> {
        let mut file = File::create(tmp)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }
}

impl LedgerBackend for FsLedger {
    fn load(&self) -> Vec<HistoryRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!(
                    "could not read history at {}: {}; treating as empty",
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<HistoryRecord>>(&content) {
            Ok(records) => records,
            Err(e) => {
                log::warn!(
                    "history at {} is corrupt ({}); treating as empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;
        }

        let content = serde_json::to_string_pretty(records).map_err(QrError::Serialization)?;

        let tmp = dir.join(format!(".history-{}.tmp", Uuid::new_v4()));
        if let Err(e) = self.write_tmp(&tmp, &content) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_err(e));
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_err(e));
        }

        log::debug!(
            "saved {} history records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentType, NewRecord, OutputFormat};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn record(index: usize) -> HistoryRecord {
        NewRecord {
            timestamp: Utc::now(),
            content_type: ContentType::Text,
            raw_command: format!("qr text hello{} --output a.png", index),
            fields: BTreeMap::from([("text".to_string(), format!("hello{}", index))]),
            output: "a.png".into(),
            format: OutputFormat::Png,
        }
        .into_record(index)
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(temp.path());
        assert!(ledger.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(temp.path());
        fs::write(ledger.path(), "{ not json").unwrap();
        assert!(ledger.load().is_empty());

        fs::write(ledger.path(), r#"{"entries": []}"#).unwrap();
        assert!(ledger.load().is_empty());
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(temp.path());
        let records = vec![record(1), record(2)];
        ledger.save(&records).unwrap();
        assert_eq!(ledger.load(), records);

        let raw = fs::read_to_string(ledger.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn save_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(&temp.path().join("nested").join("dir"));
        ledger.save(&[record(1)]).unwrap();
        assert_eq!(ledger.load().len(), 1);
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(temp.path());
        ledger.save(&[record(1)]).unwrap();
        ledger.save(&[record(1), record(2)]).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["history.json".to_string()]);
    }

    #[test]
    fn save_failure_is_reported_and_keeps_previous_content() {
        let temp = TempDir::new().unwrap();
        let ledger = FsLedger::in_dir(temp.path());
        ledger.save(&[record(1)]).unwrap();

        // A directory squatting on the target makes the rename fail.
        let blocked = FsLedger::new(temp.path().join("blocked"));
        fs::create_dir_all(temp.path().join("blocked").join("child")).unwrap();
        let err = blocked.save(&[record(1)]).unwrap_err();
        assert!(matches!(err, QrError::LedgerWrite { .. }));

        assert_eq!(ledger.load().len(), 1);
    }
}
