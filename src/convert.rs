//! Pass-through polyline converter for cleaned files.
//!
//! Regroups an already cleaned file (`driver_id;id;lat;lng;timestamp`) by its
//! assigned trajectory id and writes one polyline row per trajectory:
//! `id;lat;lng;lat;lng;...` with 8-decimal coordinates and no header line.
//! No sorting, segmentation or validation happens; this is a format change
//! only.

use std::io::{self, Write};

use crate::reader::RecordLayout;
use crate::{Result, TrajectoryReader};

/// Convert a cleaned file into polyline rows.
///
/// Returns the number of rows written.
pub fn convert<R, W>(input: R, mut output: W) -> Result<u64>
where
    R: io::Read,
    W: io::Write,
{
    let mut reader = TrajectoryReader::with_layout(input, RecordLayout::cleaned());
    let mut rows = 0u64;

    while let Some(trajectory) = reader.read_next() {
        // Under the cleaned layout the grouping id is the trajectory id.
        write!(output, "{}", trajectory.vehicle_id().unwrap_or_default())?;
        for p in trajectory.points() {
            write!(output, ";{:.8};{:.8}", p.lat, p.lng)?;
        }
        writeln!(output)?;
        rows += 1;
    }

    output.flush()?;
    Ok(rows)
}
