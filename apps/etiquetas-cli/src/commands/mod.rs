//! # Commands Module
//!
//! Every operation the front ends (CLI subcommands and the JSON session)
//! can invoke. Each command is one synchronous request → response pass.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── label.rs     ◄─── Label preview and download
//! ├── barcode.rs   ◄─── Barcode generation
//! ├── feedback.rs  ◄─── Ratings
//! └── session.rs   ◄─── Event-driven form session
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs assets
//! fn preview_label(assets: &AssetState, form: &LabelForm)
//!
//! // Only needs logs
//! fn submit_rating(logs: &LogState, rating: Rating)
//!
//! // Needs both
//! fn download_label(assets: &AssetState, logs: &LogState, form: &LabelForm, path: &Path)
//! ```

pub mod barcode;
pub mod feedback;
pub mod label;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
