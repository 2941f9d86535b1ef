//! # API Facade
//!
//! The single entry point for every qr operation. It dispatches to the
//! command layer and returns structured results; it never prints, never
//! exits, and holds no business logic of its own.
//!
//! `QrApi<B, R>` is generic over the ledger backend and the renderer:
//! - Production: `QrApi<FsLedger, QrCodeRenderer>`
//! - Testing: `QrApi<MemLedger, StubRenderer>`
//!
//! API tests check dispatch and argument plumbing only. Pipeline behaviour is
//! covered in `commands/*.rs`.

use crate::commands;
use crate::config::QrConfig;
use crate::error::Result;
use crate::ledger::HistoryLedger;
use crate::model::OutputFormat;
use crate::render::Renderer;
use crate::store::LedgerBackend;
use std::path::PathBuf;

pub use crate::commands::{CmdMessage, CmdResult, GenerateRequest, Generated, MessageLevel};

pub struct QrApi<B: LedgerBackend, R: Renderer> {
    ledger: HistoryLedger<B>,
    renderer: R,
    config: QrConfig,
}

impl<B: LedgerBackend, R: Renderer> QrApi<B, R> {
    pub fn new(backend: B, renderer: R, config: QrConfig) -> Self {
        Self {
            ledger: HistoryLedger::new(backend),
            renderer,
            config,
        }
    }

    pub fn generate(&self, request: &GenerateRequest) -> Result<CmdResult> {
        commands::generate::run(&self.ledger, &self.renderer, request)
    }

    /// Lists history. Without an explicit limit the configured default applies.
    pub fn history(&self, limit: Option<usize>) -> Result<CmdResult> {
        commands::history::list(&self.ledger, limit.or(self.config.history_limit))
    }

    pub fn clear_history(&self) -> Result<CmdResult> {
        commands::history::clear(&self.ledger)
    }

    pub fn replay(
        &self,
        index: usize,
        output: Option<String>,
        format: Option<OutputFormat>,
    ) -> Result<CmdResult> {
        commands::replay::run(&self.ledger, &self.renderer, index, output, format)
    }

    pub fn history_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn history_location(&self) -> PathBuf {
        self.ledger.backend().location()
    }
}
