//! # etiquetas-store: Event Log for Etiquetas
//!
//! Append-only CSV logs of label downloads (by province) and ratings.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Etiquetas Event Flow                             │
//! │                                                                         │
//! │  download_label / submit_rating (CLI commands)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 etiquetas-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   EventLog::record ──► retry_once ──► EventLog::append          │   │
//! │  │        │                (2 s, once)      │                      │   │
//! │  │        ▼                                 ▼                      │   │
//! │  │   AppendOutcome          open(append) + lock_exclusive          │   │
//! │  │   Written | Dropped      header if empty, row, flush            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data_dir>/provincias.csv      Fecha,Hora,Provincia                   │
//! │  <data_dir>/calificaciones.csv  Fecha,Hora,Evaluación                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use etiquetas_core::LogRecord;
//! use etiquetas_store::{clock, EventLog, LogKind};
//!
//! let log = EventLog::open("data", LogKind::Provinces).unwrap();
//! let outcome = log.record(&LogRecord::new(&clock::buenos_aires_now(), "Salta"));
//! println!("{:?}", outcome);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod log;
pub mod retry;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use log::{AppendOutcome, EventLog, LogKind};
pub use retry::{retry_once, SingleRetry};

/// Default pause before the single retry of a failed append.
pub const DEFAULT_RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(2);
