//! Main entry point: build the notes, search, return the finished table.

use crate::config::TableConfig;
use crate::error::TableResult;
use crate::search::{search, SearchOptions};
use crate::table::NoteTable;

/// Generates the note table for `config`.
///
/// The configuration is validated first, so a degenerate range fails fast
/// instead of producing a table of notes without matches.
///
/// # Example
///
/// ```
/// use pwmscale_core::{generate_table, SearchOptions, SearchStrategy, TableConfig};
///
/// let config = TableConfig { octaves: 1, ..TableConfig::default() };
/// let options = SearchOptions {
///     strategy: SearchStrategy::Bracketed,
///     ..SearchOptions::default()
/// };
/// let table = generate_table(&config, &options).unwrap();
/// assert!(table.is_complete());
/// assert_eq!(table.pairs().len(), 12);
/// ```
pub fn generate_table(
    config: &TableConfig,
    options: &SearchOptions<'_>,
) -> TableResult<NoteTable> {
    config.validate()?;
    let mut table = NoteTable::new(*config, options.strategy);
    search(&mut table.notes, &config.search_space(), options)?;
    Ok(table)
}
