//! pwmscale CLI - PWM divider/top table generator
//!
//! This binary searches the PWM divider and wrap registers for every note of a
//! chromatic scale and prints the resulting tuning table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use pwmscale_core::config::{
    DEFAULT_BASE_OFFSET, DEFAULT_CLOCK_HZ, DEFAULT_OCTAVES, DEFAULT_TOP_BITS,
};
use pwmscale_core::emit::{ListingFormat, ListingOptions};
use pwmscale_core::{SearchStrategy, TableConfig, DIVIDER_MAX, DIVIDER_ONE};
use std::process::ExitCode;

use pwmscale_cli::commands;
use pwmscale_cli::commands::generate::{GenerateOptions, Sections};

/// pwmscale - PWM note-table generator
#[derive(Parser)]
#[command(name = "pwmscale")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search register pairs for every note and print the table
    Generate {
        /// System clock feeding the PWM slices, in Hz
        #[arg(long, default_value_t = DEFAULT_CLOCK_HZ)]
        clock_hz: u32,

        /// Semitone offset of note 0 from A4 (440 Hz)
        #[arg(long, default_value_t = DEFAULT_BASE_OFFSET, allow_negative_numbers = true)]
        base_offset: i32,

        /// Number of octaves in the scale
        #[arg(long, default_value_t = DEFAULT_OCTAVES)]
        octaves: u32,

        /// Smallest raw divider register value (decimal or 0x hex)
        #[arg(long, default_value_t = DIVIDER_ONE, value_parser = commands::parse_register)]
        div_min: u16,

        /// Largest raw divider register value (decimal or 0x hex)
        #[arg(long, default_value_t = DIVIDER_MAX, value_parser = commands::parse_register)]
        div_max: u16,

        /// Width of the top (wrap) register in bits
        #[arg(long, default_value_t = DEFAULT_TOP_BITS)]
        top_bits: u8,

        /// Worker threads (default: one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Candidate enumeration strategy
        #[arg(long, default_value = "exhaustive", value_parser = ["exhaustive", "bracketed"])]
        strategy: String,

        /// Listing language
        #[arg(long, default_value = "python", value_parser = ["python", "rust"])]
        format: String,

        /// Identifier of the generated table
        #[arg(long)]
        name: Option<String>,

        /// Print only the diagnostic report
        #[arg(long, conflicts_with = "listing_only")]
        report_only: bool,

        /// Print only the pair listing
        #[arg(long)]
        listing_only: bool,

        /// Print the table as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Suppress status and progress output on stderr
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the target frequencies of a scale without searching
    Notes {
        /// Semitone offset of note 0 from A4 (440 Hz)
        #[arg(long, default_value_t = DEFAULT_BASE_OFFSET, allow_negative_numbers = true)]
        base_offset: i32,

        /// Number of octaves in the scale
        #[arg(long, default_value_t = DEFAULT_OCTAVES)]
        octaves: u32,

        /// Print a JSON array instead of text
        #[arg(long)]
        json: bool,
    },
}

fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Generate {
            clock_hz,
            base_offset,
            octaves,
            div_min,
            div_max,
            top_bits,
            threads,
            strategy,
            format,
            name,
            report_only,
            listing_only,
            json,
            quiet,
        } => {
            let strategy = strategy
                .parse::<SearchStrategy>()
                .map_err(anyhow::Error::msg)?;
            let format = format
                .parse::<ListingFormat>()
                .map_err(anyhow::Error::msg)?;
            let sections = match (report_only, listing_only) {
                (true, _) => Sections::ReportOnly,
                (_, true) => Sections::ListingOnly,
                _ => Sections::All,
            };
            commands::generate::run(&GenerateOptions {
                config: TableConfig {
                    clock_hz,
                    base_offset,
                    octaves,
                    div_min,
                    div_max,
                    top_bits,
                },
                strategy,
                threads,
                listing: ListingOptions { format, name },
                sections,
                json,
                quiet,
            })
        }
        Commands::Notes {
            base_offset,
            octaves,
            json,
        } => commands::notes::run(base_offset, octaves, json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_defaults() {
        let cli = Cli::try_parse_from(["pwmscale", "generate"]).unwrap();
        match cli.command {
            Commands::Generate {
                clock_hz,
                base_offset,
                octaves,
                div_min,
                div_max,
                top_bits,
                threads,
                strategy,
                format,
                name,
                report_only,
                listing_only,
                json,
                quiet,
            } => {
                assert_eq!(clock_hz, 280_000_000);
                assert_eq!(base_offset, -24);
                assert_eq!(octaves, 5);
                assert_eq!(div_min, 16);
                assert_eq!(div_max, 4095);
                assert_eq!(top_bits, 16);
                assert_eq!(threads, None);
                assert_eq!(strategy, "exhaustive");
                assert_eq!(format, "python");
                assert_eq!(name, None);
                assert!(!report_only && !listing_only && !json && !quiet);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_overrides() {
        let cli = Cli::try_parse_from([
            "pwmscale",
            "generate",
            "--base-offset",
            "-48",
            "--div-min",
            "0x20",
            "--div-max",
            "0x100",
            "-j",
            "4",
            "--strategy",
            "bracketed",
            "--format",
            "rust",
            "--name",
            "NOTES",
            "--listing-only",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                base_offset,
                div_min,
                div_max,
                threads,
                strategy,
                format,
                name,
                listing_only,
                ..
            } => {
                assert_eq!(base_offset, -48);
                assert_eq!(div_min, 0x20);
                assert_eq!(div_max, 0x100);
                assert_eq!(threads, Some(4));
                assert_eq!(strategy, "bracketed");
                assert_eq!(format, "rust");
                assert_eq!(name.as_deref(), Some("NOTES"));
                assert!(listing_only);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_sections() {
        let result = Cli::try_parse_from([
            "pwmscale",
            "generate",
            "--report-only",
            "--listing-only",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_strategy() {
        let result = Cli::try_parse_from(["pwmscale", "generate", "--strategy", "random"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_register() {
        let result = Cli::try_parse_from(["pwmscale", "generate", "--div-max", "0x10000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_notes() {
        let cli =
            Cli::try_parse_from(["pwmscale", "notes", "--octaves", "2", "--json"]).unwrap();
        match cli.command {
            Commands::Notes {
                base_offset,
                octaves,
                json,
            } => {
                assert_eq!(base_offset, -24);
                assert_eq!(octaves, 2);
                assert!(json);
            }
            _ => panic!("expected notes command"),
        }
    }
}
