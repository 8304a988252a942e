//! Literal `(divider, top)` listing for the sound driver.
//!
//! The listing is embedded verbatim into driver source, so the layout is
//! fixed: a provenance comment, an optional missing-notes comment, a blank
//! line, then the assignment with seven entries per row. Continuation rows
//! are indented to line up with the first entry.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{GENERATOR, GENERATOR_VERSION};
use crate::table::NoteTable;

/// Entries per row before the listing wraps.
pub const ENTRIES_PER_ROW: usize = 7;

/// Target language of the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingFormat {
    /// Python/MicroPython list of tuples.
    #[default]
    Python,
    /// Rust `const` array of tuples.
    Rust,
}

impl ListingFormat {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingFormat::Python => "python",
            ListingFormat::Rust => "rust",
        }
    }

    /// Default identifier for the listing.
    pub fn default_name(&self) -> &'static str {
        match self {
            ListingFormat::Python => "pwm_cfgs",
            ListingFormat::Rust => "PWM_CFGS",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            ListingFormat::Python => "#",
            ListingFormat::Rust => "//",
        }
    }

    fn opening(&self, name: &str, len: usize) -> String {
        match self {
            ListingFormat::Python => format!("{} = [", name),
            ListingFormat::Rust => {
                format!("pub const {}: [(u16, u16); {}] = [", name, len)
            }
        }
    }

    fn closing(&self) -> &'static str {
        match self {
            ListingFormat::Python => "]",
            ListingFormat::Rust => "];",
        }
    }
}

impl fmt::Display for ListingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(ListingFormat::Python),
            "rust" => Ok(ListingFormat::Rust),
            other => Err(format!("unknown listing format: {}", other)),
        }
    }
}

/// Listing layout options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Target language.
    pub format: ListingFormat,
    /// Identifier; `None` uses [`ListingFormat::default_name`].
    pub name: Option<String>,
}

/// Renders the pair listing.
///
/// Notes without a match are left out of the list and named in a comment
/// line instead, so the listing never carries a made-up pair.
pub fn render_listing(table: &NoteTable, options: &ListingOptions) -> String {
    let format = options.format;
    let comment = format.comment();
    let name = options
        .name
        .as_deref()
        .unwrap_or_else(|| format.default_name());
    let pairs = table.pairs();
    let missing = table.missing();

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", comment, provenance(table)));
    if !missing.is_empty() {
        let indices: Vec<String> = missing.iter().map(usize::to_string).collect();
        out.push_str(&format!(
            "{} no config for notes: {}\n",
            comment,
            indices.join(", ")
        ));
    }
    out.push('\n');

    let opening = format.opening(name, pairs.len());
    let indent = " ".repeat(opening.len());
    out.push_str(&opening);
    for (i, (divider, top)) in pairs.iter().enumerate() {
        out.push_str(&format!("(0x{:x},0x{:x})", divider, top));
        let last = i + 1 == pairs.len();
        if !last {
            out.push(',');
            if i % ENTRIES_PER_ROW == ENTRIES_PER_ROW - 1 {
                out.push('\n');
                out.push_str(&indent);
            }
        }
    }
    out.push_str(format.closing());
    out.push('\n');
    out
}

fn provenance(table: &NoteTable) -> String {
    let config = &table.config;
    format!(
        "This table is generated using {} {} (clock {} Hz, base offset {}, {} octaves, {} search)",
        GENERATOR,
        GENERATOR_VERSION,
        config.clock_hz,
        config.base_offset,
        config.octaves,
        table.strategy
    )
}
