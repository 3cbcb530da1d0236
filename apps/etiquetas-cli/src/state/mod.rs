//! # State Module
//!
//! Process-wide state shared by the commands.
//!
//! Commands declare exactly the state they need: label previews only need
//! assets, ratings only need the logs, downloads need both.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────────┬──────────────────────┐           │
//! │          ▼                          ▼                      │           │
//! │  ┌──────────────────┐      ┌──────────────────┐            │           │
//! │  │   AssetState     │      │    LogState      │            │           │
//! │  │                  │      │                  │            │           │
//! │  │  OnceLock<       │      │  provinces.csv   │            │           │
//! │  │   LabelAssets>   │      │  ratings.csv     │            │           │
//! │  │  (lazy, once)    │      │  (opened at      │            │           │
//! │  │                  │      │   startup)       │            │           │
//! │  └──────────────────┘      └──────────────────┘            │           │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AssetState: immutable once initialized                              │
//! │  • LogState: every append takes a file lock                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod assets;
mod logs;

pub use assets::AssetState;
pub use logs::LogState;
