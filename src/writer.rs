//! Output serialization for cleaned segments.

use std::io::{self, Write};

use crate::{Result, Trajectory};

/// Serializes cleaned segments, assigning each a fresh sequential output id.
///
/// Quirk preserved from the original tool: the first point of a segment is
/// never serialized, and a point is written only when its timestamp differs
/// from the immediately preceding point's. A one-point segment therefore
/// consumes an id but produces zero rows.
pub struct TrajectoryWriter<W: io::Write> {
    output: W,
    next_id: u64,
}

impl<W: io::Write> TrajectoryWriter<W> {
    /// Create a writer and emit the header line.
    pub fn new(mut output: W) -> Result<Self> {
        writeln!(output, "driver_id;id;lat;lng;timestamp")?;
        Ok(Self { output, next_id: 0 })
    }

    /// Serialize one segment under the next sequential id.
    ///
    /// The id advances once per call regardless of how many rows come out.
    /// Points are written in stored order with 8-decimal coordinates.
    pub fn write(&mut self, mut segment: Trajectory) -> Result<()> {
        segment.id = self.next_id as i64;
        for pair in segment.points().windows(2) {
            let (prev, p) = (&pair[0], &pair[1]);
            if p.t != prev.t {
                writeln!(
                    self.output,
                    "{};{};{:.8};{:.8};{}",
                    p.vehicle_id, segment.id, p.lat, p.lng, p.t
                )?;
            }
        }
        self.next_id += 1;
        Ok(())
    }

    /// Number of segments written so far; also the next id to be assigned.
    pub fn segments_written(&self) -> u64 {
        self.next_id
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Consume the writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.output
    }
}
