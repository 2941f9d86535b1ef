use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::ledger::HistoryLedger;
use crate::store::LedgerBackend;

pub fn list<B: LedgerBackend>(ledger: &HistoryLedger<B>, limit: Option<usize>) -> Result<CmdResult> {
    let records = ledger.list(limit);
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No history entries found."));
    }
    Ok(result.with_history(records))
}

pub fn clear<B: LedgerBackend>(ledger: &HistoryLedger<B>) -> Result<CmdResult> {
    let removed = ledger.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} history entries.",
        removed
    )));
    Ok(result)
}
