//! # History Ledger
//!
//! Append-only record of successful generations, layered over a
//! [`LedgerBackend`].
//!
//! - Indexes are 1-based and follow append order. After [`HistoryLedger::clear`]
//!   numbering starts again at 1.
//! - Records are never mutated once appended.
//! - [`HistoryLedger::list`] is the display path and always redacts sensitive
//!   fields. [`HistoryLedger::get`] returns the stored record unchanged so it
//!   can be replayed.

use crate::cmdline::{self, MASK};
use crate::error::Result;
use crate::model::{ContentType, HistoryRecord, NewRecord, OutputFormat};
use crate::store::LedgerBackend;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A record prepared for display, with sensitive values masked.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub content_type: ContentType,
    pub command: String,
    pub fields: BTreeMap<String, String>,
    pub output: String,
    pub format: OutputFormat,
}

impl From<&HistoryRecord> for DisplayRecord {
    fn from(record: &HistoryRecord) -> Self {
        let content_type = record.content_type;
        let fields: BTreeMap<String, String> = record
            .fields
            .iter()
            .map(|(name, value)| {
                let shown = if content_type.is_sensitive(name) {
                    MASK.to_string()
                } else {
                    value.clone()
                };
                (name.clone(), shown)
            })
            .collect();

        let command = redact_command(record);

        Self {
            index: record.index,
            timestamp: record.timestamp,
            content_type,
            command,
            fields,
            output: record.output.clone(),
            format: record.format,
        }
    }
}

/// Masks sensitive values in the stored command line.
///
/// Commands recorded by this tool start with the plain rendering of their
/// fields, so that prefix is swapped for the masked rendering and any
/// `--format` suffix is kept. Anything else gets literal replacement.
fn redact_command(record: &HistoryRecord) -> String {
    let fields = record.field_set();
    let plain = cmdline::render(&fields, &record.output, None, cmdline::Mode::Plain);

    if let Some(rest) = record.raw_command.strip_prefix(&plain) {
        let masked = cmdline::render(&fields, &record.output, None, cmdline::Mode::Masked);
        return format!("{}{}", masked, rest);
    }

    let mut command = record.raw_command.clone();
    for (name, value) in &record.fields {
        if record.content_type.is_sensitive(name) && !value.is_empty() {
            command = command.replace(value.as_str(), MASK);
        }
    }
    command
}

pub struct HistoryLedger<B: LedgerBackend> {
    backend: B,
}

impl<B: LedgerBackend> HistoryLedger<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Assigns the next index, appends, and rewrites the store.
    pub fn append(&self, new: NewRecord) -> Result<HistoryRecord> {
        let mut records = self.backend.load();
        let index = records.iter().map(|r| r.index).max().unwrap_or(0) + 1;
        let record = new.into_record(index);
        records.push(record.clone());
        self.backend.save(&records)?;
        log::debug!(
            "appended history record {} ({})",
            record.index,
            record.content_type
        );
        Ok(record)
    }

    /// The most recent `limit` records (all when `None` or `Some(0)`), oldest
    /// first, redacted.
    pub fn list(&self, limit: Option<usize>) -> Vec<DisplayRecord> {
        let mut records = self.backend.load();
        records.sort_by_key(|r| r.index);
        let skip = match limit {
            Some(limit) if limit > 0 => records.len().saturating_sub(limit),
            _ => 0,
        };
        records[skip..].iter().map(DisplayRecord::from).collect()
    }

    /// The stored record with the given index, unredacted.
    pub fn get(&self, index: usize) -> Option<HistoryRecord> {
        self.backend.load().into_iter().find(|r| r.index == index)
    }

    pub fn len(&self) -> usize {
        self.backend.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every record. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let count = self.backend.load().len();
        self.backend.save(&[])?;
        log::info!("cleared {} history records", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QrError;
    use crate::model::FieldSet;
    use crate::store::memory::MemLedger;

    fn new_record(fields: FieldSet, output: &str) -> NewRecord {
        NewRecord {
            timestamp: Utc::now(),
            content_type: fields.content_type(),
            raw_command: cmdline::render(&fields, output, None, cmdline::Mode::Plain),
            fields: fields.values().clone(),
            output: output.to_string(),
            format: OutputFormat::Png,
        }
    }

    fn text(n: usize) -> NewRecord {
        new_record(
            FieldSet::new(ContentType::Text).with("text", format!("note {}", n)),
            "t.png",
        )
    }

    fn wifi() -> NewRecord {
        new_record(
            FieldSet::new(ContentType::Wifi)
                .with("ssid", "Home")
                .with("password", "hunter2")
                .with("security", "WPA"),
            "wifi.png",
        )
    }

    #[test]
    fn append_assigns_sequential_indexes() {
        let ledger = HistoryLedger::new(MemLedger::new());
        for n in 1..=3 {
            let record = ledger.append(text(n)).unwrap();
            assert_eq!(record.index, n);
        }
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn list_returns_all_in_insertion_order() {
        let ledger = HistoryLedger::new(MemLedger::new());
        for n in 1..=5 {
            ledger.append(text(n)).unwrap();
        }
        let listed = ledger.list(None);
        assert_eq!(listed.len(), 5);
        let indexes: Vec<usize> = listed.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![1, 2, 3, 4, 5]);
        assert_eq!(listed[2].fields["text"], "note 3");
    }

    #[test]
    fn list_limit_keeps_most_recent_ascending() {
        let ledger = HistoryLedger::new(MemLedger::new());
        for n in 1..=5 {
            ledger.append(text(n)).unwrap();
        }
        let indexes: Vec<usize> = ledger.list(Some(2)).iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![4, 5]);
        assert_eq!(ledger.list(Some(10)).len(), 5);
        assert_eq!(ledger.list(Some(0)).len(), 5);
    }

    #[test]
    fn list_masks_wifi_password_but_store_keeps_it() {
        let ledger = HistoryLedger::new(MemLedger::new());
        ledger.append(wifi()).unwrap();

        let shown = &ledger.list(None)[0];
        assert_eq!(shown.fields["password"], MASK);
        assert_eq!(shown.fields["ssid"], "Home");
        assert!(shown.command.contains("--password ****"));
        assert!(!shown.command.contains("hunter2"));

        let stored = ledger.get(1).unwrap();
        assert_eq!(stored.fields["password"], "hunter2");
        assert!(stored.raw_command.contains("--password hunter2"));
    }

    #[test]
    fn redaction_keeps_format_suffix() {
        let ledger = HistoryLedger::new(MemLedger::new());
        let mut record = wifi();
        let fields = FieldSet::from_values(ContentType::Wifi, record.fields.clone());
        record.raw_command =
            cmdline::render(&fields, "wifi.png", Some(OutputFormat::Svg), cmdline::Mode::Plain);
        ledger.append(record).unwrap();

        let shown = &ledger.list(None)[0];
        assert!(shown.command.ends_with("--output wifi.png --format svg"));
        assert!(!shown.command.contains("hunter2"));
    }

    #[test]
    fn redaction_masks_foreign_commands() {
        let ledger = HistoryLedger::new(MemLedger::new());
        let mut record = wifi();
        record.raw_command = "qr wifi -s Home -p hunter2 -o wifi.png".into();
        ledger.append(record).unwrap();

        let shown = &ledger.list(None)[0];
        assert_eq!(shown.command, "qr wifi -s Home -p **** -o wifi.png");
    }

    #[test]
    fn clear_resets_numbering() {
        let ledger = HistoryLedger::new(MemLedger::new());
        ledger.append(text(1)).unwrap();
        ledger.append(text(2)).unwrap();

        assert_eq!(ledger.clear().unwrap(), 2);
        assert!(ledger.list(None).is_empty());
        assert!(ledger.is_empty());

        let record = ledger.append(text(3)).unwrap();
        assert_eq!(record.index, 1);
    }

    #[test]
    fn write_failure_is_surfaced() {
        let backend = MemLedger::new();
        backend.set_simulate_write_error(true);
        let ledger = HistoryLedger::new(backend);
        let err = ledger.append(text(1)).unwrap_err();
        assert!(matches!(err, QrError::LedgerWrite { .. }));
        assert!(ledger.is_empty());
    }

    #[test]
    fn get_unknown_index() {
        let ledger = HistoryLedger::new(MemLedger::new());
        ledger.append(text(1)).unwrap();
        assert!(ledger.get(2).is_none());
    }
}
