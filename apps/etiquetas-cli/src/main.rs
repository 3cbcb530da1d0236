//! # Etiquetas Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        etiquetas                                        │
//! │                                                                         │
//! │  main.rs ────► calls etiquetas_cli::run()                              │
//! │  lib.rs ─────► logging, config, dispatch                               │
//! │  commands/ ──► preview/download label, barcode, rating, session        │
//! │  state/ ─────► AssetState, LogState                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    etiquetas_cli::run()
}
