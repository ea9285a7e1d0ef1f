//! Input parsing and per-vehicle grouping.
//!
//! This module provides the input side of the pipeline:
//! - `PointSource` - sequential record-to-point parser
//! - `RecordLayout` - column mapping for the supported file layouts
//! - `TrajectoryReader` - grouping cursor over contiguous vehicle-id runs

use std::io;
use std::str::FromStr;

use log::warn;

use crate::{Point, Trajectory};

/// Column indices locating the point fields inside one record.
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    pub vehicle_id: usize,
    pub lat: usize,
    pub lng: usize,
    pub timestamp: usize,
}

impl RecordLayout {
    /// Raw log layout: `vehicle_id;lat;lng;timestamp`.
    pub fn raw() -> Self {
        Self {
            vehicle_id: 0,
            lat: 1,
            lng: 2,
            timestamp: 3,
        }
    }

    /// Cleaned-output layout: `driver_id;id;lat;lng;timestamp`.
    ///
    /// The grouping column is the assigned trajectory id, not the driver.
    pub fn cleaned() -> Self {
        Self {
            vehicle_id: 1,
            lat: 2,
            lng: 3,
            timestamp: 4,
        }
    }
}

/// Sequential parser turning one input record into a `Point` per call.
///
/// The header line is consumed up front and ignored. Numeric fields that fail
/// to parse become the zero value for that field; a malformed record yields a
/// garbage point, never an error. A record that cannot be read at all (e.g.
/// invalid encoding) ends the stream.
pub struct PointSource<R: io::Read> {
    records: csv::StringRecordsIntoIter<R>,
    layout: RecordLayout,
}

impl<R: io::Read> PointSource<R> {
    /// Create a source over the raw log layout.
    pub fn new(reader: R) -> Self {
        Self::with_layout(reader, RecordLayout::raw())
    }

    /// Create a source with an explicit column layout.
    pub fn with_layout(reader: R, layout: RecordLayout) -> Self {
        let records = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { records, layout }
    }

    /// Parse the next record, advancing the input by exactly one record.
    ///
    /// Returns `None` at end of stream.
    pub fn next_point(&mut self) -> Option<Point> {
        match self.records.next()? {
            Ok(record) => Some(Point::new(
                parse_field(&record, self.layout.vehicle_id),
                parse_field(&record, self.layout.lat),
                parse_field(&record, self.layout.lng),
                parse_field(&record, self.layout.timestamp),
            )),
            Err(e) => {
                warn!("unreadable record, treating as end of stream: {}", e);
                None
            }
        }
    }
}

/// Extract and parse one field, falling back to the type's zero value.
fn parse_field<T: FromStr + Default>(record: &csv::StringRecord, index: usize) -> T {
    record
        .get(index)
        .and_then(|field| field.trim().parse().ok())
        .unwrap_or_default()
}

/// Grouping cursor over a `PointSource`.
///
/// Groups consecutive records sharing a vehicle id into one `Trajectory`,
/// relying on records for a vehicle being contiguous in the input (locally
/// grouped, not globally sorted). At most one point is buffered across calls:
/// the first point read past the end of a group, which seeds the next group.
///
/// This is a pure grouping operation; it does not sort or validate.
pub struct TrajectoryReader<R: io::Read> {
    source: PointSource<R>,
    lookahead: Option<Point>,
}

impl<R: io::Read> TrajectoryReader<R> {
    /// Create a reader over the raw log layout.
    pub fn new(reader: R) -> Self {
        Self::from_source(PointSource::new(reader))
    }

    /// Create a reader with an explicit column layout.
    pub fn with_layout(reader: R, layout: RecordLayout) -> Self {
        Self::from_source(PointSource::with_layout(reader, layout))
    }

    /// Wrap an existing source.
    pub fn from_source(source: PointSource<R>) -> Self {
        Self {
            source,
            lookahead: None,
        }
    }

    /// Read the next group of same-vehicle points.
    ///
    /// Returns `None` once the underlying stream is exhausted. A clean end of
    /// stream and a failed first read are indistinguishable here.
    pub fn read_next(&mut self) -> Option<Trajectory> {
        let seed = self
            .lookahead
            .take()
            .or_else(|| self.source.next_point())?;
        let vehicle_id = seed.vehicle_id;

        let mut trajectory = Trajectory::new();
        trajectory.push(seed);

        loop {
            match self.source.next_point() {
                Some(p) if p.vehicle_id == vehicle_id => trajectory.push(p),
                // First point of the next group, or end of stream.
                other => {
                    self.lookahead = other;
                    break;
                }
            }
        }

        Some(trajectory)
    }
}
