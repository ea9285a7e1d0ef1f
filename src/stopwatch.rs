//! Elapsed-time instrumentation.

use std::time::{Duration, Instant};

/// Wall-clock stopwatch.
///
/// Purely observational; never affects control flow or output.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// Create a stopped stopwatch with no accumulated time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) timing. Starting while running is a no-op.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Stop timing, folding the running interval into the total.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    /// Total measured time in seconds, including a still-running interval.
    pub fn elapsed(&self) -> f64 {
        let running = self.started_at.map_or(Duration::ZERO, |s| s.elapsed());
        (self.accumulated + running).as_secs_f64()
    }

    /// Whether the stopwatch is currently running.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}
