//! # Ledger Storage
//!
//! The history ledger is persisted through the [`LedgerBackend`] trait, which
//! only knows how to load and save the whole record sequence. Sequencing,
//! indexing and redaction live one level up in [`crate::ledger`].
//!
//! ## Implementations
//!
//! - [`fs::FsLedger`]: a single JSON array on disk, rewritten atomically
//!   (temp file + rename) on every save.
//! - [`memory::MemLedger`]: in-memory, for tests. Can simulate write failures.
//!
//! ## Read Leniency
//!
//! Loading never fails. A missing, unreadable or corrupt ledger reads as an
//! empty one. Saving is strict: every failure is returned to the caller.

use crate::error::Result;
use crate::model::HistoryRecord;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub const LEDGER_FILENAME: &str = "history.json";

pub trait LedgerBackend {
    /// Load every stored record in append order. Absent or unreadable
    /// storage yields an empty sequence.
    fn load(&self) -> Vec<HistoryRecord>;

    /// Replace the stored sequence. MUST be atomic: an interrupted save
    /// leaves the previous sequence intact.
    fn save(&self, records: &[HistoryRecord]) -> Result<()>;

    /// Where the ledger lives. Virtual for in-memory backends.
    fn location(&self) -> PathBuf;
}
