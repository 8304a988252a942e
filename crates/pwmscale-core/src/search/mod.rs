//! Configuration search engine.
//!
//! Enumerates (divider, top) register pairs and keeps, for every note, the
//! pair whose output frequency is closest to the note's target. The divider
//! range is split across rayon workers; each worker fills a private
//! [`BestTable`] and the tables are reduced per note at the end, so the
//! inner loops never synchronize.
//!
//! The result is the global minimum over the enumerated space. Ties between
//! equal-error pairs resolve to the smallest `(divider, top)`, which makes
//! the output independent of scheduling.

mod best;

#[cfg(test)]
mod tests;

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::divider::Divider;
use crate::error::{TableError, TableResult};
use crate::note::Note;

pub use best::BestTable;

/// The enumerated (divider, top) space for one clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchSpace {
    /// System clock in Hz.
    pub clock_hz: f64,
    /// Smallest raw divider (inclusive).
    pub div_min: u16,
    /// Largest raw divider (inclusive).
    pub div_max: u16,
    /// Smallest top value (inclusive).
    pub top_min: u16,
    /// Largest top value (inclusive).
    pub top_max: u16,
}

impl SearchSpace {
    /// Raw divider values, ascending.
    pub fn dividers(&self) -> RangeInclusive<u16> {
        self.div_min..=self.div_max
    }

    /// Top values, ascending.
    pub fn tops(&self) -> RangeInclusive<u16> {
        self.top_min..=self.top_max
    }

    /// Number of divider values.
    pub fn divider_count(&self) -> u32 {
        (u32::from(self.div_max) + 1).saturating_sub(u32::from(self.div_min))
    }

    /// Number of top values.
    pub fn top_count(&self) -> u32 {
        (u32::from(self.top_max) + 1).saturating_sub(u32::from(self.top_min))
    }

    /// Total number of (divider, top) pairs.
    pub fn candidate_count(&self) -> u64 {
        u64::from(self.divider_count()) * u64::from(self.top_count())
    }

    /// Returns true if no pair can be enumerated.
    pub fn is_empty(&self) -> bool {
        self.candidate_count() == 0
    }

    /// Fails if either range is empty.
    pub fn validate(&self) -> TableResult<()> {
        if self.divider_count() == 0 {
            return Err(TableError::EmptyDividerRange {
                min: self.div_min,
                max: self.div_max,
            });
        }
        if self.top_count() == 0 {
            return Err(TableError::EmptyTopRange {
                min: self.top_min,
                max: self.top_max,
            });
        }
        Ok(())
    }

    /// Frequency at the divider output, before the counter.
    pub fn divided_frequency(&self, divider: Divider) -> f64 {
        self.clock_hz / divider.divisor()
    }
}

/// Output frequency of the counter for a given top value.
#[inline]
pub fn output_frequency(divided_hz: f64, top: u16) -> f64 {
    divided_hz / (f64::from(top) + 1.0)
}

/// How candidates are enumerated within each divider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Every top value is evaluated against every note.
    #[default]
    Exhaustive,
    /// Only the tops adjacent to each note's real-valued optimum are
    /// evaluated. Output frequency is strictly decreasing in top, so this
    /// finds the same minimum as [`SearchStrategy::Exhaustive`].
    Bracketed,
}

impl SearchStrategy {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Exhaustive => "exhaustive",
            SearchStrategy::Bracketed => "bracketed",
        }
    }
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exhaustive" => Ok(SearchStrategy::Exhaustive),
            "bracketed" => Ok(SearchStrategy::Bracketed),
            other => Err(format!("unknown search strategy: {}", other)),
        }
    }
}

/// Progress snapshot, reported once per finished divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// Dividers finished so far (in any order).
    pub completed: u32,
    /// Dividers in the space.
    pub total: u32,
}

impl SearchProgress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            f64::from(self.completed) / f64::from(self.total)
        }
    }
}

/// Progress observer; called from worker threads.
pub type ProgressFn<'a> = &'a (dyn Fn(SearchProgress) + Sync);

/// Options controlling how a search runs.
#[derive(Clone, Copy, Default)]
pub struct SearchOptions<'a> {
    /// Candidate enumeration strategy.
    pub strategy: SearchStrategy,
    /// Worker count; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Optional progress observer.
    pub progress: Option<ProgressFn<'a>>,
}

impl fmt::Debug for SearchOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchOptions")
            .field("strategy", &self.strategy)
            .field("threads", &self.threads)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Searches `space` and records each note's best register pair.
///
/// Existing matches on `notes` are kept unless the search finds a better
/// one. An empty space leaves every note untouched.
pub fn search(
    notes: &mut [Note],
    space: &SearchSpace,
    options: &SearchOptions<'_>,
) -> TableResult<()> {
    let targets: Vec<f64> = notes.iter().map(|n| n.target_hz).collect();

    let table = match options.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(|| scan(&targets, space, options)),
        None => scan(&targets, space, options),
    };

    for (note, found) in notes.iter_mut().zip(table.into_slots()) {
        if let Some(candidate) = found {
            if candidate.beats(note.best.as_ref()) {
                note.best = Some(candidate);
            }
        }
    }
    Ok(())
}

/// Parallel fold/reduce over the divider range.
fn scan(targets: &[f64], space: &SearchSpace, options: &SearchOptions<'_>) -> BestTable {
    let total = space.divider_count();
    let completed = AtomicU32::new(0);

    space
        .dividers()
        .into_par_iter()
        .fold(
            || BestTable::new(targets.len()),
            |mut table, raw| {
                let divider = Divider::from_raw(raw);
                match options.strategy {
                    SearchStrategy::Exhaustive => {
                        scan_all_tops(&mut table, targets, space, divider)
                    }
                    SearchStrategy::Bracketed => {
                        scan_bracketed(&mut table, targets, space, divider)
                    }
                }
                if let Some(progress) = options.progress {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    progress(SearchProgress {
                        completed: done,
                        total,
                    });
                }
                table
            },
        )
        .reduce(|| BestTable::new(targets.len()), BestTable::merge)
}

fn scan_all_tops(table: &mut BestTable, targets: &[f64], space: &SearchSpace, divider: Divider) {
    let divided = space.divided_frequency(divider);
    for top in space.tops() {
        let out = output_frequency(divided, top);
        for (index, &target) in targets.iter().enumerate() {
            let err = (target - out).abs();
            table.offer(index, divider, top, out, err);
        }
    }
}

fn scan_bracketed(table: &mut BestTable, targets: &[f64], space: &SearchSpace, divider: Divider) {
    if space.top_count() == 0 {
        return;
    }
    let divided = space.divided_frequency(divider);
    let lo = i64::from(space.top_min);
    let hi = i64::from(space.top_max);

    for (index, &target) in targets.iter().enumerate() {
        // out(t) = divided / (t + 1) crosses the target at t* = divided / target - 1.
        let ideal = divided / target - 1.0;
        let base = if ideal.is_finite() {
            ideal.floor().clamp(-2.0, f64::from(u16::MAX) + 2.0) as i64
        } else {
            hi
        };

        let mut last = None;
        for step in -1..=2 {
            let top = (base + step).clamp(lo, hi) as u16;
            if last == Some(top) {
                continue;
            }
            last = Some(top);
            let out = output_frequency(divided, top);
            table.offer(index, divider, top, out, (target - out).abs());
        }
    }
}
