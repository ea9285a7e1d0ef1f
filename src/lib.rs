//! # tracefix
//!
//! GPS trajectory cleaning and segmentation for taxi fleet telemetry.
//!
//! This library provides:
//! - Streaming grouping of raw GPS logs into per-vehicle trajectories
//! - Trajectory segmentation with plausibility filtering (speed and
//!   bounding-box thresholds over a sliding time window)
//! - A two-stage pipeline overlapping input grouping with
//!   segmentation and output
//! - A pass-through converter turning cleaned files into polyline rows
//!
//! ## Quick Start
//!
//! ```rust
//! use tracefix::{Point, Trajectory, segmentation};
//!
//! // Four samples of one vehicle moving at a plausible speed.
//! let mut trajectory = Trajectory::new();
//! for (i, t) in [0i64, 10_000, 20_000, 30_000].iter().enumerate() {
//!     trajectory.push(Point::new(7, 39.9 + i as f64 * 0.002, 116.4, *t));
//! }
//!
//! let segments = segmentation::segment(trajectory);
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].len(), 4);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TraceFixError};

// Input parsing and per-vehicle grouping
pub mod reader;
pub use reader::{PointSource, RecordLayout, TrajectoryReader};

// Trajectory segmentation engine
pub mod segmentation;

// Output serialization
pub mod writer;
pub use writer::TrajectoryWriter;

// Two-stage read/process pipeline
pub mod pipeline;
pub use pipeline::{Pipeline, PipelineContext, PipelineSummary};

// Progress reporting and elapsed-time instrumentation
pub mod progress;
pub use progress::{NoopProgress, ProgressObserver, TerminalProgressBar};
pub mod stopwatch;
pub use stopwatch::Stopwatch;

// Pass-through polyline converter for cleaned files
pub mod convert;

// Synthetic trace generation for tests
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A single GPS sample: vehicle id, position and epoch-millisecond timestamp.
///
/// Immutable once constructed; a point has no identity beyond its fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub vehicle_id: u64,
    pub lat: f64,
    pub lng: f64,
    /// Milliseconds since the Unix epoch.
    pub t: i64,
}

impl Point {
    /// Create a new point.
    pub fn new(vehicle_id: u64, lat: f64, lng: f64, t: i64) -> Self {
        Self {
            vehicle_id,
            lat,
            lng,
            t,
        }
    }

    /// Planar Euclidean distance to another point, in degrees.
    ///
    /// Degrees are a flat proxy for distance here, not a geodesic measure.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// Bounding box over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Bounds covering a single point.
    pub fn from_point(p: &Point) -> Self {
        Self {
            min_lat: p.lat,
            max_lat: p.lat,
            min_lng: p.lng,
            max_lng: p.lng,
        }
    }

    /// Bounds covering a slice of points, or `None` if the slice is empty.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut iter = points.iter();
        let mut bounds = Self::from_point(iter.next()?);
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grow the bounds to cover `p`.
    pub fn expand(&mut self, p: &Point) {
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lat = self.max_lat.max(p.lat);
        self.min_lng = self.min_lng.min(p.lng);
        self.max_lng = self.max_lng.max(p.lng);
    }

    /// Latitude extent in degrees.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Longitude extent in degrees.
    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// The larger of the latitude and longitude extents.
    pub fn max_span(&self) -> f64 {
        self.lat_span().max(self.lng_span())
    }
}

/// An ordered sequence of points for one vehicle, with its bounding box
/// maintained incrementally on every append.
///
/// A trajectory owns its points exclusively until handed to the writer and is
/// dropped once written or discarded. `id` stays at `-1` until the writer
/// assigns an output id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    pub id: i64,
    points: Vec<Point>,
    bounds: Option<Bounds>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Trajectory {
    /// Create an empty trajectory with no assigned id.
    pub fn new() -> Self {
        Self {
            id: -1,
            points: Vec::new(),
            bounds: None,
        }
    }

    /// Build a trajectory from an existing point vector.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: -1,
            bounds: Bounds::from_points(&points),
            points,
        }
    }

    /// Append a point, growing the bounding box to cover it.
    pub fn push(&mut self, p: Point) {
        match self.bounds.as_mut() {
            Some(bounds) => bounds.expand(&p),
            None => self.bounds = Some(Bounds::from_point(&p)),
        }
        self.points.push(p);
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trajectory holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points in stored order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume the trajectory, returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// The bounding box, or `None` while empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Vehicle id of the first point, or `None` while empty.
    pub fn vehicle_id(&self) -> Option<u64> {
        self.points.first().map(|p| p.vehicle_id)
    }

    /// The larger of the bounding box's latitude and longitude extents.
    /// Zero while empty.
    pub fn max_span(&self) -> f64 {
        self.bounds.map_or(0.0, |b| b.max_span())
    }

    /// Sort points ascending by timestamp.
    ///
    /// The sort is not stable: input order between equal timestamps does not
    /// survive.
    pub fn sort_by_time(&mut self) {
        self.points.sort_unstable_by_key(|p| p.t);
    }
}
