//! Machine-readable table document.

use serde::Serialize;

use super::{GENERATOR, GENERATOR_VERSION};
use crate::config::TableConfig;
use crate::note::Note;
use crate::search::SearchStrategy;
use crate::table::NoteTable;

/// One note in the JSON document.
///
/// The register fields are absent for notes without a match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteRecord {
    /// Position in the scale, 0-based.
    pub index: usize,
    /// Scientific pitch name, e.g. `"A2"`.
    pub name: String,
    /// MIDI note number.
    pub midi: i32,
    /// Equal-tempered target frequency in Hz.
    pub target_hz: f64,
    /// Raw divider register value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider: Option<u16>,
    /// Real divisor, `divider / 16`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisor: Option<f64>,
    /// Top register value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u16>,
    /// Frequency produced by the register pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved_hz: Option<f64>,
    /// Distance from the target in Hz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_hz: Option<f64>,
}

impl From<&Note> for NoteRecord {
    fn from(note: &Note) -> Self {
        Self {
            index: note.index,
            name: note.name(),
            midi: note.midi(),
            target_hz: note.target_hz,
            divider: note.best.map(|m| m.divider.raw()),
            divisor: note.best.map(|m| m.divider.divisor()),
            top: note.best.map(|m| m.top),
            achieved_hz: note.best.map(|m| m.achieved_hz),
            error_hz: note.best.map(|m| m.error_hz),
        }
    }
}

/// Complete table document emitted by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDocument {
    /// Always `"pwmscale"`.
    pub generator: &'static str,
    /// Generator version.
    pub version: &'static str,
    /// Configuration the table was built from.
    pub config: TableConfig,
    /// Strategy used for the search.
    pub strategy: SearchStrategy,
    /// Every note in index order, matched or not.
    pub notes: Vec<NoteRecord>,
    /// `[divider, top]` pairs of matched notes, in note order.
    pub pairs: Vec<[u16; 2]>,
    /// Indices of notes without a match.
    pub missing: Vec<usize>,
    /// Largest error over matched notes; absent when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_error_hz: Option<f64>,
    /// BLAKE3 of the pair list, see [`NoteTable::table_hash`].
    pub table_hash: String,
}

impl From<&NoteTable> for TableDocument {
    fn from(table: &NoteTable) -> Self {
        Self {
            generator: GENERATOR,
            version: GENERATOR_VERSION,
            config: table.config,
            strategy: table.strategy,
            notes: table.notes.iter().map(NoteRecord::from).collect(),
            pairs: table.pairs().into_iter().map(|(d, t)| [d, t]).collect(),
            missing: table.missing(),
            max_error_hz: table.max_error_hz(),
            table_hash: table.table_hash(),
        }
    }
}

/// Pretty-printed JSON document for `table`.
pub fn render_json(table: &NoteTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TableDocument::from(table))
}
