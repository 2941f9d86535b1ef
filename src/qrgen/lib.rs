//! # qrgen Architecture
//!
//! qrgen turns typed parameters (a URL, free text, WiFi credentials, a contact
//! card, an email, an SMS) into a validated QR payload, writes the symbol as
//! PNG or SVG, and keeps a replayable history of every successful run. The
//! `qr` binary is one client of this library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade, generic over ledger backend and renderer    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - validate → build payload → resolve format → encode       │
//! │    → write → record                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Ledger (ledger.rs) over storage (store/)                   │
//! │  - FsLedger (production), MemLedger (testing)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation and payload construction are pure functions over
//! [`model::FieldSet`]. A payload builder only ever receives validated
//! [`model::Content`], so it cannot fail.
//!
//! ## Secrets
//!
//! The ledger stores every field as submitted, WiFi passwords included, so
//! that any entry can be regenerated exactly. Masking is applied whenever
//! records are listed and never to what is stored.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Generation, history listing and clearing, replay
//! - [`validate`]: Per-field validators with user-facing messages
//! - [`payload`]: Canonical payload strings per content type
//! - [`format`]: Output format resolution
//! - [`render`]: The encoder boundary
//! - [`ledger`]: Append-only history with redaction
//! - [`store`]: Ledger persistence
//! - [`cmdline`]: Reconstructs the `qr ...` invocation for a record
//! - [`model`]: Core data types
//! - [`config`]: Configuration and base directory
//! - [`error`]: Error types

pub mod api;
pub mod cmdline;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod ledger;
pub mod model;
pub mod payload;
pub mod render;
pub mod store;
pub mod validate;
