//! CLI command implementations

pub mod generate;
pub mod notes;

mod progress;

/// Parses a register value given in decimal or `0x`-prefixed hex.
pub fn parse_register(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid register value '{}': {}", s, e))
}
