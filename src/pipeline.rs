//! Two-stage read/process pipeline.
//!
//! For each input group, reading of the next group overlaps segmentation and
//! writing of the current one: a dedicated reader task feeds groups through a
//! single-slot bounded channel while the main task drains it. The reader
//! cursor is touched by exactly one task and the writer by exactly one task,
//! so no locks are needed; output ids stay monotonic in input-group order
//! because the handoff is FIFO with a single consumer.

use std::io;
use std::thread;

use crossbeam_channel::bounded;

use crate::progress::{NoopProgress, ProgressObserver};
use crate::stopwatch::Stopwatch;
use crate::{segmentation, Result, TraceFixError, Trajectory, TrajectoryReader, TrajectoryWriter};

/// Timing and progress state for one run.
///
/// Lifecycle: initialized when the run starts, reported to after each group,
/// finalized when the stream drains.
pub struct PipelineContext {
    progress: Box<dyn ProgressObserver>,
    stopwatch: Stopwatch,
}

impl PipelineContext {
    /// Create a context reporting to the given observer.
    pub fn new(progress: Box<dyn ProgressObserver>) -> Self {
        Self {
            progress,
            stopwatch: Stopwatch::new(),
        }
    }

    /// Context that reports nowhere, for quiet runs and tests.
    pub fn noop() -> Self {
        Self::new(Box::new(NoopProgress))
    }

    fn init(&mut self) {
        self.stopwatch.start();
    }

    fn report(&mut self, points_processed: u64) {
        self.progress.set_processed(points_processed);
    }

    fn finalize(&mut self) {
        self.stopwatch.stop();
        self.progress.finish();
    }

    /// Seconds measured so far.
    pub fn elapsed_seconds(&self) -> f64 {
        self.stopwatch.elapsed()
    }
}

/// Counters for one completed run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineSummary {
    /// Input groups read.
    pub trajectories_in: u64,
    /// Segments emitted and assigned ids.
    pub segments_out: u64,
    /// Points read and fed to segmentation.
    pub points_processed: u64,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
}

/// Drives reader, segmentation engine and writer over a whole input stream.
pub struct Pipeline<R: io::Read, W: io::Write> {
    reader: TrajectoryReader<R>,
    writer: TrajectoryWriter<W>,
    context: PipelineContext,
}

impl<R, W> Pipeline<R, W>
where
    R: io::Read + Send,
    W: io::Write,
{
    /// Assemble a pipeline from its three stages.
    pub fn new(
        reader: TrajectoryReader<R>,
        writer: TrajectoryWriter<W>,
        context: PipelineContext,
    ) -> Self {
        Self {
            reader,
            writer,
            context,
        }
    }

    /// Run to stream exhaustion.
    ///
    /// While group `k` is being segmented and written, the read of group
    /// `k + 1` is already in flight; segmentation of `k + 1` never starts
    /// before `k` is fully written. Blocks until both stages drain. A failed
    /// write aborts the run.
    pub fn run(self) -> Result<PipelineSummary> {
        let Pipeline {
            mut reader,
            mut writer,
            mut context,
        } = self;

        context.init();

        let (handoff_tx, handoff_rx) = bounded::<Trajectory>(1);
        let mut summary = PipelineSummary::default();
        let mut failure: Option<TraceFixError> = None;

        thread::scope(|scope| {
            scope.spawn(move || {
                while let Some(trajectory) = reader.read_next() {
                    // The consumer is gone after a write failure; stop reading.
                    if handoff_tx.send(trajectory).is_err() {
                        break;
                    }
                }
            });

            for trajectory in handoff_rx {
                summary.trajectories_in += 1;
                summary.points_processed += trajectory.len() as u64;

                segmentation::segment_with(trajectory, &mut |segment| {
                    if failure.is_some() {
                        return;
                    }
                    match writer.write(segment) {
                        Ok(()) => summary.segments_out += 1,
                        Err(e) => failure = Some(e),
                    }
                });

                if failure.is_some() {
                    break;
                }
                context.report(summary.points_processed);
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        writer.flush()?;

        context.finalize();
        summary.elapsed_seconds = context.elapsed_seconds();
        Ok(summary)
    }
}
