//! Notes command implementation
//!
//! Lists the target frequencies of a scale without running the search.

use anyhow::{Context, Result};
use pwmscale_core::emit::{render_targets, NoteRecord};
use pwmscale_core::{build_notes, TableConfig};
use std::process::ExitCode;

/// Run the notes command
///
/// # Arguments
/// * `base_offset` - Semitone offset of note 0 from A4
/// * `octaves` - Number of octaves to list
/// * `json` - Print a JSON array instead of text
pub fn run(base_offset: i32, octaves: u32, json: bool) -> Result<ExitCode> {
    let output = render(base_offset, octaves, json)?;
    print!("{}", output);
    Ok(ExitCode::SUCCESS)
}

/// Text (or JSON) listing of the scale's targets.
pub fn render(base_offset: i32, octaves: u32, json: bool) -> Result<String> {
    let config = TableConfig {
        base_offset,
        octaves,
        ..TableConfig::default()
    };
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration [{}]: {}", e.code(), e))?;

    let notes = build_notes(base_offset, octaves);
    if json {
        let records: Vec<NoteRecord> = notes.iter().map(NoteRecord::from).collect();
        let mut out =
            serde_json::to_string_pretty(&records).context("Failed to serialize notes")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render_targets(&notes))
    }
}
