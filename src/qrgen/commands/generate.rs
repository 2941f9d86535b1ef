//! Generation pipeline:
//!
//! ```text
//! fields ─ validate ─┬─ (fail) ──────────────────────────────── error, nothing written
//!                    └─ build payload ─ resolve format ─ encode ─ write file ─ record history
//! ```
//!
//! Field and path validation both happen before any payload work, so a bad
//! request never touches the output directory or the ledger. An encoder or
//! write failure also leaves the ledger untouched.

use crate::cmdline;
use crate::commands::{CmdMessage, CmdResult, GenerateRequest, Generated};
use crate::error::{QrError, Result};
use crate::format;
use crate::ledger::HistoryLedger;
use crate::model::{NewRecord, OutputSpec};
use crate::payload;
use crate::render::Renderer;
use crate::store::LedgerBackend;
use crate::validate;
use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub fn run<B: LedgerBackend, R: Renderer>(
    ledger: &HistoryLedger<B>,
    renderer: &R,
    request: &GenerateRequest,
) -> Result<CmdResult> {
    let content = validate::validate_fields(&request.fields)?;
    let path = validate::validate_output_path(&request.output)?;

    let payload = payload::build(&content);
    let format = format::resolve(&path, request.format)?;
    log::debug!(
        "encoding {} payload ({} bytes) as {}",
        content.content_type(),
        payload.len(),
        format
    );

    let bytes = renderer.encode(&payload, format)?;
    write_output(&path, &bytes)?;

    let record = ledger.append(NewRecord {
        timestamp: Utc::now(),
        content_type: content.content_type(),
        raw_command: cmdline::render(
            &request.fields,
            &request.output,
            request.format,
            cmdline::Mode::Plain,
        ),
        fields: request.fields.values().clone(),
        output: request.output.clone(),
        format,
    })?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "✓ QR code saved to: {}",
        path.display()
    )));
    Ok(result.with_generated(Generated {
        output: OutputSpec { path, format },
        payload,
        history_index: record.index,
    }))
}

/// Writes through a sibling temp file so a failed write never leaves a
/// truncated image at `path`.
fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = dir.join(format!(".{}.{}.tmp", name, Uuid::new_v4()));

    let written = File::create(&tmp)
        .and_then(|mut file| file.write_all(bytes).and_then(|_| file.sync_all()))
        .and_then(|_| fs::rename(&tmp, path));

    written.map_err(|source| {
        let _ = fs::remove_file(&tmp);
        QrError::Output {
            path: path.to_path_buf(),
            source,
        }
    })
}
