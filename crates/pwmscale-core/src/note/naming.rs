//! Pitch names for MIDI note numbers.

/// Semitones in one octave.
pub const SEMITONES_PER_OCTAVE: usize = 12;

const NAMES: [&str; SEMITONES_PER_OCTAVE] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scientific pitch name of a MIDI note number (MIDI 60 = C4).
///
/// Works for notes below MIDI 0 as well, yielding negative octaves.
///
/// # Examples
/// ```
/// use pwmscale_core::note::midi_note_name;
///
/// assert_eq!(midi_note_name(69), "A4");
/// assert_eq!(midi_note_name(45), "A2");
/// assert_eq!(midi_note_name(61), "C#4");
/// ```
pub fn midi_note_name(midi: i32) -> String {
    let octave = midi.div_euclid(12) - 1;
    let pitch = midi.rem_euclid(12) as usize;
    format!("{}{}", NAMES[pitch], octave)
}
