//! Generate command implementation
//!
//! Runs the register search for a scale and prints the diagnostic report and
//! the pair listing (or the JSON document) on stdout.

use anyhow::{Context, Result};
use colored::Colorize;
use pwmscale_core::emit::{render_json, render_listing, render_report, ListingOptions};
use pwmscale_core::search::ProgressFn;
use pwmscale_core::{
    generate_table, NoteTable, SearchOptions, SearchProgress, SearchStrategy, TableConfig,
};
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;

use super::progress::ProgressLine;

/// Which text sections go to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sections {
    /// Report followed by listing.
    #[default]
    All,
    /// Diagnostic report only.
    ReportOnly,
    /// Pair listing only.
    ListingOnly,
}

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Scale and search-space configuration.
    pub config: TableConfig,
    /// Candidate enumeration strategy.
    pub strategy: SearchStrategy,
    /// Worker thread count (default: rayon's choice).
    pub threads: Option<usize>,
    /// Listing language and identifier.
    pub listing: ListingOptions,
    /// Text sections to print.
    pub sections: Sections,
    /// Print the JSON document instead of text.
    pub json: bool,
    /// Suppress status lines and progress on stderr.
    pub quiet: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 if any note ended without a configuration
pub fn run(options: &GenerateOptions) -> Result<ExitCode> {
    let config = &options.config;
    let status = !options.quiet && !options.json;

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration [{}]: {}", e.code(), e))?;

    if status {
        print_header(config, options.strategy);
    }

    let progress = ProgressLine::new(status);
    let observer = |p: SearchProgress| progress.observe(p);
    let observer: ProgressFn<'_> = &observer;
    let search_options = SearchOptions {
        strategy: options.strategy,
        threads: options.threads,
        progress: progress.is_enabled().then_some(observer),
    };

    let start = Instant::now();
    let table = generate_table(config, &search_options)
        .map_err(|e| anyhow::anyhow!("search failed [{}]: {}", e.code(), e))?;
    progress.finish();
    let elapsed = start.elapsed();

    let output = render_output(&table, options)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write table to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;

    let missing = table.missing();
    if status {
        if missing.is_empty() {
            eprintln!(
                "{} {} notes in {:.2}s, max error {:.4} Hz",
                "SUCCESS".green().bold(),
                table.notes.len(),
                elapsed.as_secs_f64(),
                table.max_error_hz().unwrap_or(0.0)
            );
            eprintln!("  {} {}", "table hash:".dimmed(), table.table_hash());
        } else {
            eprintln!(
                "{} no config for {} of {} notes",
                "WARNING".yellow().bold(),
                missing.len(),
                table.notes.len()
            );
        }
    }

    Ok(ExitCode::from(exit_status(&table)))
}

/// Process status for a finished table: 0 when every note has a
/// configuration, 1 otherwise.
pub fn exit_status(table: &NoteTable) -> u8 {
    if table.is_complete() {
        0
    } else {
        1
    }
}

/// Text (or JSON) written to stdout for a finished table.
pub fn render_output(table: &NoteTable, options: &GenerateOptions) -> Result<String> {
    if options.json {
        let mut json = render_json(table).context("Failed to serialize table")?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    if options.sections != Sections::ListingOnly {
        out.push_str(&render_report(table));
    }
    if options.sections != Sections::ReportOnly {
        out.push_str(&render_listing(table, &options.listing));
    }
    Ok(out)
}

fn print_header(config: &TableConfig, strategy: SearchStrategy) {
    let space = config.search_space();
    eprintln!(
        "{} {} Hz, {} notes from offset {}",
        "Scale:".blue().bold(),
        config.clock_hz,
        config.note_count(),
        config.base_offset
    );
    eprintln!(
        "{} dividers 0x{:03x}..=0x{:03x}, tops 0..=0x{:04x} ({} candidates, {})",
        "Space:".blue().bold(),
        space.div_min,
        space.div_max,
        space.top_max,
        space.candidate_count(),
        strategy
    );
}
