//! The finished note table handed to the emitter.

use crate::config::TableConfig;
use crate::note::{build_notes, Note};
use crate::search::SearchStrategy;

/// Notes of one configuration together with their search results.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    /// Configuration the notes were built from.
    pub config: TableConfig,
    /// Strategy used to fill in the matches.
    pub strategy: SearchStrategy,
    /// Notes in ascending index order.
    pub notes: Vec<Note>,
}

impl NoteTable {
    /// Unsearched table for `config`; every note starts without a match.
    pub fn new(config: TableConfig, strategy: SearchStrategy) -> Self {
        Self {
            config,
            strategy,
            notes: build_notes(config.base_offset, config.octaves),
        }
    }

    /// Indices of notes that never received a candidate.
    pub fn missing(&self) -> Vec<usize> {
        self.notes
            .iter()
            .filter(|n| n.best.is_none())
            .map(|n| n.index)
            .collect()
    }

    /// Returns true if every note has a match.
    pub fn is_complete(&self) -> bool {
        self.notes.iter().all(|n| n.best.is_some())
    }

    /// `(divider, top)` register pairs in note order, skipping notes
    /// without a match.
    pub fn pairs(&self) -> Vec<(u16, u16)> {
        self.notes
            .iter()
            .filter_map(|n| n.best.map(|m| (m.divider.raw(), m.top)))
            .collect()
    }

    /// Largest error over all matched notes, in Hz.
    pub fn max_error_hz(&self) -> Option<f64> {
        self.notes
            .iter()
            .filter_map(|n| n.best.map(|m| m.error_hz))
            .reduce(f64::max)
    }

    /// BLAKE3 hash (hex) of the pair list.
    ///
    /// Each present note contributes its index, divider and top as
    /// little-endian integers, so two runs that chose the same registers
    /// hash identically.
    pub fn table_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for note in &self.notes {
            if let Some(m) = note.best {
                hasher.update(&(note.index as u32).to_le_bytes());
                hasher.update(&m.divider.raw().to_le_bytes());
                hasher.update(&m.top.to_le_bytes());
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
