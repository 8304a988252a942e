//! Table emitter: diagnostic report, pair listing and JSON document.
//!
//! Every renderer returns a `String`; writing it out is left to the caller.

mod json;
mod listing;
mod report;


pub use json::{render_json, NoteRecord, TableDocument};
pub use listing::{render_listing, ListingFormat, ListingOptions, ENTRIES_PER_ROW};
pub use report::{render_report, render_targets, report_line};

/// Generator name written into provenance comments and JSON.
pub const GENERATOR: &str = "pwmscale";

/// Crate version written into provenance comments and JSON.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
