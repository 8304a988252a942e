//! Error types for table configuration and search setup.

use thiserror::Error;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur before or while setting up a search.
///
/// The search itself cannot fail; a note that never received a candidate is
/// reported by the emitter instead (see [`crate::NoteTable::missing`]).
#[derive(Debug, Error)]
pub enum TableError {
    /// Divider range contains no values.
    #[error("empty divider range: {min:#x}..={max:#x}")]
    EmptyDividerRange {
        /// Lower bound (raw register value).
        min: u16,
        /// Upper bound (raw register value).
        max: u16,
    },

    /// Top range contains no values.
    #[error("empty top range: {min:#x}..={max:#x}")]
    EmptyTopRange {
        /// Lower bound.
        min: u16,
        /// Upper bound.
        max: u16,
    },

    /// Divider of zero would divide the clock by zero.
    #[error("divider range must start at 1 or above, got {min:#x}")]
    DividerBelowMinimum {
        /// The offending lower bound.
        min: u16,
    },

    /// Divider exceeds the 8.4 register width.
    #[error("divider {max:#x} exceeds the register maximum {limit:#x}")]
    DividerAboveMaximum {
        /// The offending upper bound.
        max: u16,
        /// Largest encodable raw divider.
        limit: u16,
    },

    /// Top register width out of range.
    #[error("top register width must be 1..=16 bits, got {bits}")]
    InvalidTopBits {
        /// The requested width.
        bits: u8,
    },

    /// System clock must be a positive frequency.
    #[error("invalid system clock: {hz} Hz")]
    InvalidClock {
        /// The requested clock.
        hz: u32,
    },

    /// Scale must contain at least one octave.
    #[error("invalid octave count: {octaves}")]
    InvalidOctaves {
        /// The requested octave count.
        octaves: u32,
    },

    /// Scale reaches MIDI numbers outside `i32`, or targets that are not
    /// finite positive frequencies.
    #[error("scale out of range: base offset {base_offset}, {octaves} octaves")]
    ScaleOutOfRange {
        /// Semitone offset of note 0 from A4.
        base_offset: i32,
        /// Requested octave count.
        octaves: u32,
    },

    /// Worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl TableError {
    /// Stable error code for programmatic handling (e.g. "PWM_001").
    pub fn code(&self) -> &'static str {
        match self {
            TableError::EmptyDividerRange { .. } => "PWM_001",
            TableError::EmptyTopRange { .. } => "PWM_002",
            TableError::DividerBelowMinimum { .. } => "PWM_003",
            TableError::DividerAboveMaximum { .. } => "PWM_004",
            TableError::InvalidTopBits { .. } => "PWM_005",
            TableError::InvalidClock { .. } => "PWM_006",
            TableError::InvalidOctaves { .. } => "PWM_007",
            TableError::ThreadPool(_) => "PWM_008",
            TableError::ScaleOutOfRange { .. } => "PWM_009",
        }
    }
}
