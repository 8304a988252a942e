//! Table configuration and validation.

use serde::Serialize;

use crate::divider::{DIVIDER_MAX, DIVIDER_ONE};
use crate::error::{TableError, TableResult};
use crate::note::{target_frequency, CONCERT_A_MIDI, SEMITONES_PER_OCTAVE};
use crate::search::SearchSpace;

/// Default system clock of the target (overclocked RP2040).
pub const DEFAULT_CLOCK_HZ: u32 = 280_000_000;

/// Default distance in semitones from A4 to the first note (A2).
pub const DEFAULT_BASE_OFFSET: i32 = -24;

/// Default number of octaves in the table.
pub const DEFAULT_OCTAVES: u32 = 5;

/// Default top register width.
pub const DEFAULT_TOP_BITS: u8 = 16;

/// Startup configuration for one table generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableConfig {
    /// System clock feeding the PWM slice, in Hz.
    pub clock_hz: u32,
    /// Semitones from concert A (A4, 440 Hz) to note index 0.
    pub base_offset: i32,
    /// Number of octaves; the table holds `octaves * 12` notes.
    pub octaves: u32,
    /// Smallest raw divider register value searched.
    pub div_min: u16,
    /// Largest raw divider register value searched.
    pub div_max: u16,
    /// Width of the top register; tops range over `0..2^top_bits`.
    pub top_bits: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            base_offset: DEFAULT_BASE_OFFSET,
            octaves: DEFAULT_OCTAVES,
            div_min: DIVIDER_ONE,
            div_max: DIVIDER_MAX,
            top_bits: DEFAULT_TOP_BITS,
        }
    }
}

impl TableConfig {
    /// Number of notes the table will contain.
    pub fn note_count(&self) -> usize {
        self.octaves as usize * 12
    }

    /// Largest top register value for the configured width.
    pub fn top_max(&self) -> u16 {
        let bits = u32::from(self.top_bits.clamp(1, 16));
        ((1u32 << bits) - 1) as u16
    }

    /// Checks the configuration, failing fast on degenerate ranges.
    pub fn validate(&self) -> TableResult<()> {
        if self.clock_hz == 0 {
            return Err(TableError::InvalidClock { hz: self.clock_hz });
        }
        if self.octaves == 0 {
            return Err(TableError::InvalidOctaves {
                octaves: self.octaves,
            });
        }
        self.check_scale()?;
        if self.top_bits == 0 || self.top_bits > 16 {
            return Err(TableError::InvalidTopBits {
                bits: self.top_bits,
            });
        }
        if self.div_min == 0 {
            return Err(TableError::DividerBelowMinimum { min: self.div_min });
        }
        if self.div_max > DIVIDER_MAX {
            return Err(TableError::DividerAboveMaximum {
                max: self.div_max,
                limit: DIVIDER_MAX,
            });
        }
        self.search_space().validate()
    }

    /// Every note's MIDI number must fit in `i32` and every target must be
    /// a finite positive frequency. Targets grow with the semitone, so only
    /// the lowest and highest notes are checked.
    fn check_scale(&self) -> TableResult<()> {
        let out_of_range = TableError::ScaleOutOfRange {
            base_offset: self.base_offset,
            octaves: self.octaves,
        };
        let span = i64::from(self.octaves) * SEMITONES_PER_OCTAVE as i64 - 1;
        let lowest = i64::from(self.base_offset);
        let highest = lowest + span;
        let midi = |semitones: i64| i64::from(CONCERT_A_MIDI) + semitones;
        let (Ok(lowest), Ok(highest), Ok(_), Ok(_)) = (
            i32::try_from(lowest),
            i32::try_from(highest),
            i32::try_from(midi(lowest)),
            i32::try_from(midi(highest)),
        ) else {
            return Err(out_of_range);
        };

        let low_hz = target_frequency(lowest);
        let high_hz = target_frequency(highest);
        if !(low_hz > 0.0 && high_hz.is_finite()) {
            return Err(out_of_range);
        }
        Ok(())
    }

    /// Search space described by this configuration.
    pub fn search_space(&self) -> SearchSpace {
        SearchSpace {
            clock_hz: f64::from(self.clock_hz),
            div_min: self.div_min,
            div_max: self.div_max,
            top_min: 0,
            top_max: self.top_max(),
        }
    }
}
