use super::LedgerBackend;
use crate::error::{QrError, Result};
use crate::model::HistoryRecord;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory ledger for tests.
///
/// Uses `RefCell` since the tool is single-threaded, which lets the
/// `LedgerBackend` methods take `&self`.
#[derive(Default)]
pub struct MemLedger {
    records: RefCell<Vec<HistoryRecord>>,
    simulate_write_error: Cell<bool>,
}

impl MemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }
}

impl LedgerBackend for MemLedger {
    fn load(&self) -> Vec<HistoryRecord> {
        self.records.borrow().clone()
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(QrError::LedgerWrite {
                path: self.location(),
                source: std::io::Error::other("simulated write error"),
            });
        }
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from(":memory:")
    }
}
