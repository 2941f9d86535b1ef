//! Regenerates a history entry from its stored fields.
//!
//! The stored fields go back through the full generation pipeline, so a
//! replay is validated again and appends a fresh record of its own.

use crate::commands::{generate, CmdResult, GenerateRequest};
use crate::error::{QrError, Result};
use crate::ledger::HistoryLedger;
use crate::model::OutputFormat;
use crate::render::Renderer;
use crate::store::LedgerBackend;
use std::path::Path;

pub fn run<B: LedgerBackend, R: Renderer>(
    ledger: &HistoryLedger<B>,
    renderer: &R,
    index: usize,
    output: Option<String>,
    format: Option<OutputFormat>,
) -> Result<CmdResult> {
    let record = ledger.get(index).ok_or(QrError::HistoryNotFound(index))?;
    log::debug!("replaying history entry {} ({})", index, record.content_type);

    let format = match (&output, format) {
        (_, Some(explicit)) => Some(explicit),
        // The original path keeps its recorded format only when that format
        // was an override of the extension.
        (None, None) => {
            let inferred = Path::new(&record.output)
                .extension()
                .and_then(|e| e.to_str())
                .and_then(OutputFormat::from_extension);
            (inferred != Some(record.format)).then_some(record.format)
        }
        (Some(_), None) => None,
    };

    let request = GenerateRequest::new(
        record.field_set(),
        output.unwrap_or_else(|| record.output.clone()),
    )
    .with_format(format);
    generate::run(ledger, renderer, &request)
}
