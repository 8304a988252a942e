//! Search progress line on stderr.

use colored::Colorize;
use pwmscale_core::SearchProgress;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicU32, Ordering};

/// Percent counter redrawn in place with `\r`.
///
/// Only whole-percent changes are drawn, so the observer stays cheap when
/// called once per divider from many workers.
pub(crate) struct ProgressLine {
    enabled: bool,
    last_percent: AtomicU32,
}

impl ProgressLine {
    /// Progress line that draws only when stderr is a terminal.
    pub(crate) fn new(wanted: bool) -> Self {
        Self {
            enabled: wanted && io::stderr().is_terminal(),
            last_percent: AtomicU32::new(u32::MAX),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn observe(&self, progress: SearchProgress) {
        let percent = (progress.fraction() * 100.0) as u32;
        if self.last_percent.swap(percent, Ordering::Relaxed) == percent {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{} {:3}%", "Searching:".cyan().bold(), percent);
        let _ = stderr.flush();
    }

    /// Clears the line once the search is done.
    pub(crate) fn finish(&self) {
        if self.enabled {
            let mut stderr = io::stderr().lock();
            let _ = write!(stderr, "\r{:20}\r", "");
            let _ = stderr.flush();
        }
    }
}
