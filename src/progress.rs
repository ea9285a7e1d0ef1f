//! Progress reporting for long-running transforms.
//!
//! The pipeline reports through the `ProgressObserver` trait; the terminal
//! renderer and a no-op implementation live here. Updates are advisory and
//! may arrive far more often than an observer visibly repaints.

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Receives advisory progress updates from the pipeline.
pub trait ProgressObserver {
    /// Report the number of points processed so far.
    fn set_processed(&mut self, processed: u64);

    /// Called once when the run completes.
    fn finish(&mut self);
}

/// Observer that ignores all updates.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn set_processed(&mut self, _processed: u64) {}

    fn finish(&mut self) {}
}

/// Minimum pause between repaints.
const REDRAW_INTERVAL: Duration = Duration::from_millis(500);

/// Carriage-return progress bar rendered to stderr.
///
/// Format: `HH:MM:SS - [#####     ] ( 42.00 % )`, where the elapsed prefix
/// counts from construction. Repaints are debounced to `REDRAW_INTERVAL`;
/// `finish` forces a final repaint and moves to a fresh line.
pub struct TerminalProgressBar {
    total: u64,
    width: usize,
    current: u64,
    started: Instant,
    last_draw: Option<Instant>,
}

impl TerminalProgressBar {
    /// Create a bar expecting `total` units, `width` characters wide.
    pub fn new(total: u64, width: usize) -> Self {
        Self {
            total,
            width,
            current: 0,
            started: Instant::now(),
            last_draw: None,
        }
    }

    fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.current as f64 / self.total as f64
    }

    fn draw(&mut self) {
        self.last_draw = Some(Instant::now());

        let fraction = self.fraction();
        let filled = ((fraction * self.width as f64).round() as usize).min(self.width);
        let elapsed = self.started.elapsed().as_secs();

        let mut err = io::stderr();
        let _ = write!(
            err,
            "\r{:02}:{:02}:{:02} - [{}{}] ( {:.2} % )",
            elapsed / 3600,
            (elapsed % 3600) / 60,
            elapsed % 60,
            "#".repeat(filled),
            " ".repeat(self.width - filled),
            fraction * 100.0
        );
        let _ = err.flush();
    }
}

impl ProgressObserver for TerminalProgressBar {
    fn set_processed(&mut self, processed: u64) {
        self.current = processed;
        let due = self
            .last_draw
            .map_or(true, |at| at.elapsed() >= REDRAW_INTERVAL);
        if due {
            self.draw();
        }
    }

    fn finish(&mut self) {
        self.draw();
        let _ = writeln!(io::stderr());
    }
}
