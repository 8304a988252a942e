//! Note targets and per-note best-match records.
//!
//! Notes are laid out chromatically from a configurable base pitch. The base
//! pitch is given as a semitone offset from concert A (A4, MIDI 69, 440 Hz),
//! so the default offset of -24 starts the scale at A2 (110 Hz).

mod naming;


use serde::Serialize;

use crate::divider::Divider;

pub use naming::{midi_note_name, SEMITONES_PER_OCTAVE};

/// Reference pitch (A4) in Hz.
pub const CONCERT_A_HZ: f64 = 440.0;

/// MIDI note number of the reference pitch.
pub const CONCERT_A_MIDI: i32 = 69;

/// The register pair that achieves a note's best approximation.
///
/// A `Match` is always replaced as a whole, so its error can never be paired
/// with a divider/top that did not produce it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match {
    /// Winning divider register value.
    pub divider: Divider,
    /// Winning top register value.
    pub top: u16,
    /// Frequency produced by `(divider, top)`.
    pub achieved_hz: f64,
    /// `|target_hz - achieved_hz|`.
    pub error_hz: f64,
}

impl Match {
    /// Returns true if `self` should replace `current`.
    ///
    /// Smaller error wins; equal errors go to the smaller `(divider, top)`
    /// pair, which is the pair a sequential ascending scan would keep. A
    /// non-finite error never wins, not even against an empty slot.
    pub fn beats(&self, current: Option<&Match>) -> bool {
        if !self.error_hz.is_finite() {
            return false;
        }
        match current {
            None => true,
            Some(cur) => {
                self.error_hz < cur.error_hz
                    || (self.error_hz == cur.error_hz
                        && (self.divider, self.top) < (cur.divider, cur.top))
            }
        }
    }
}

/// One semitone of the scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Position in the scale, 0-based.
    pub index: usize,
    /// Semitones from A4.
    pub offset: i32,
    /// Equal-tempered target frequency in Hz.
    pub target_hz: f64,
    /// Best register pair found so far; `None` until a candidate is seen.
    pub best: Option<Match>,
}

impl Note {
    /// Creates a note at `index` for a scale starting `base_offset` semitones
    /// from A4.
    pub fn new(index: usize, base_offset: i32) -> Self {
        // Saturates instead of wrapping; `TableConfig::validate` rejects
        // scales that get this far.
        let offset = i32::try_from(index)
            .unwrap_or(i32::MAX)
            .saturating_add(base_offset);
        Self {
            index,
            offset,
            target_hz: target_frequency(offset),
            best: None,
        }
    }

    /// MIDI note number of this note.
    pub fn midi(&self) -> i32 {
        CONCERT_A_MIDI.saturating_add(self.offset)
    }

    /// Scientific pitch name, e.g. `"A2"` or `"C#3"`.
    pub fn name(&self) -> String {
        midi_note_name(self.midi())
    }
}

/// Equal-tempered frequency `semitones` away from A4.
///
/// # Examples
/// ```
/// use pwmscale_core::note::target_frequency;
///
/// assert_eq!(target_frequency(0), 440.0);
/// assert_eq!(target_frequency(-24), 110.0);
/// assert!((target_frequency(3) - 523.251).abs() < 0.001);
/// ```
pub fn target_frequency(semitones: i32) -> f64 {
    CONCERT_A_HZ * 2.0_f64.powf(f64::from(semitones) / 12.0)
}

/// Builds the chromatic note sequence, `octaves * 12` notes long.
pub fn build_notes(base_offset: i32, octaves: u32) -> Vec<Note> {
    let count = octaves as usize * SEMITONES_PER_OCTAVE;
    (0..count).map(|i| Note::new(i, base_offset)).collect()
}
