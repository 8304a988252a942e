//! pwmscale core - PWM register tables for equal-tempered scales
//!
//! This crate computes, for every note of a chromatic scale, the pair of PWM
//! timer registers (fractional clock divider, counter top) whose output
//! frequency is closest to the note. The result is a static table a sound
//! driver can index by note number without doing any frequency math on the
//! device.
//!
//! # Overview
//!
//! Generation runs in three steps:
//!
//! - **Targets**: [`note::build_notes`] lays out `octaves * 12` notes from a
//!   base pitch given as a semitone offset from A4 (440 Hz).
//! - **Search**: [`search::search`] enumerates every (divider, top) pair of
//!   the [`SearchSpace`] in parallel and keeps each note's global best.
//! - **Emit**: [`emit`] renders the diagnostic report, the literal pair
//!   listing consumed by the driver, and an optional JSON document.
//!
//! # Determinism
//!
//! Results do not depend on thread count or scheduling. Workers keep private
//! best tables that are reduced with a total order (error, then divider,
//! then top), so equal-error candidates always resolve to the same pair and
//! repeated runs produce the same [`NoteTable::table_hash`].
//!
//! # Example
//!
//! ```
//! use pwmscale_core::emit::{render_listing, ListingOptions};
//! use pwmscale_core::{generate_table, SearchOptions, SearchStrategy, TableConfig};
//!
//! let config = TableConfig { octaves: 1, ..TableConfig::default() };
//! let options = SearchOptions {
//!     strategy: SearchStrategy::Bracketed,
//!     ..SearchOptions::default()
//! };
//! let table = generate_table(&config, &options)?;
//! let listing = render_listing(&table, &ListingOptions::default());
//! assert!(listing.contains("pwm_cfgs = ["));
//! # Ok::<(), pwmscale_core::TableError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: Startup configuration and validation
//! - [`divider`]: Fixed-point divider register type
//! - [`note`]: Note targets and best-match records
//! - [`search`]: Parallel configuration search
//! - [`emit`]: Report, listing and JSON rendering

pub mod config;
pub mod divider;
pub mod emit;
pub mod error;
pub mod generate;
pub mod note;
pub mod search;
pub mod table;

// Re-export commonly used types at the crate root
pub use config::TableConfig;
pub use divider::{Divider, DIVIDER_MAX, DIVIDER_ONE, FRAC_BITS};
pub use error::{TableError, TableResult};
pub use generate::generate_table;
pub use note::{build_notes, Match, Note};
pub use search::{search, SearchOptions, SearchProgress, SearchSpace, SearchStrategy};
pub use table::NoteTable;
