//! Human-readable diagnostic report.

use crate::note::Note;
use crate::table::NoteTable;

/// One report line for `note`.
///
/// Matched notes show target, achieved frequency, error, the divider as raw
/// register value and as real divisor, and the top register. Notes without
/// a match print `"<index>: no config"`.
pub fn report_line(note: &Note) -> String {
    match note.best {
        Some(m) => format!(
            "{:2}: {:7.2} -> {:7.2} (err={:4.2}) : 0x{:04x} ({:6.2}) , 0x{:04x}",
            note.index,
            note.target_hz,
            m.achieved_hz,
            m.error_hz,
            m.divider.raw(),
            m.divider.divisor(),
            m.top
        ),
        None => format!("{}: no config", note.index),
    }
}

/// Diagnostic report, one line per note in index order.
pub fn render_report(table: &NoteTable) -> String {
    let mut out = String::new();
    for note in &table.notes {
        out.push_str(&report_line(note));
        out.push('\n');
    }
    out
}

/// Target frequencies and pitch names without search results.
pub fn render_targets(notes: &[Note]) -> String {
    let mut out = String::new();
    for note in notes {
        out.push_str(&format!(
            "{:2}: {:<4} (midi {:3}) {:8.2} Hz\n",
            note.index,
            note.name(),
            note.midi(),
            note.target_hz
        ));
    }
    out
}
