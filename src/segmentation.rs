//! Trajectory segmentation engine.
//!
//! Takes one vehicle's point set, orders it in time and partitions it into
//! maximal runs of points that are mutually consistent with a maximum
//! plausible ground speed and a bounded look-ahead window:
//!
//! 1. Traces whose whole bounding box stays within `MIN_BOUNDARY` are
//!    stationary and produce nothing.
//! 2. Points are sorted ascending by timestamp (unstable on ties).
//! 3. From the current frontier point, a window of successors within
//!    `TIME_LIMIT_MS` is scanned for the spatially nearest candidate,
//!    ignoring duplicate samples that share the frontier's timestamp.
//! 4. A missing candidate, or a candidate that would require moving faster
//!    than `MAX_ANGULAR_SPEED`, cuts the current segment; segments whose
//!    bounding box never exceeds `MIN_BOUNDARY` are dropped.
//! 5. The scan resumes from the candidate.
//!
//! Pure computation over an in-memory trajectory; there are no error states.

use crate::Trajectory;

/// Maximum temporal look-ahead when searching for a successor point, in
/// milliseconds.
pub const TIME_LIMIT_MS: i64 = 30_000;

/// Minimum bounding-box span, in degrees, for a segment to count as movement.
pub const MIN_BOUNDARY: f64 = 0.005;

/// Maximum plausible ground speed for a vehicle, in km/h.
const MAX_GROUND_SPEED_KMH: f64 = 100.0;

/// Kilometres per degree of latitude or longitude (flat approximation).
const KM_PER_DEGREE: f64 = 111.0;

/// Maximum plausible angular speed, in degrees per second.
pub const MAX_ANGULAR_SPEED: f64 = MAX_GROUND_SPEED_KMH / KM_PER_DEGREE / 3600.0;

/// Split one vehicle's trajectory into plausible segments, feeding each
/// surviving segment to `sink` as it is produced.
///
/// The input's point order is irrelevant; points are re-sorted by timestamp.
/// Segments are emitted in time order. Near-stationary segments (bounding box
/// span at most `MIN_BOUNDARY` in both axes) are dropped silently, including
/// every single-point segment.
pub fn segment_with<F>(mut trajectory: Trajectory, sink: &mut F)
where
    F: FnMut(Trajectory),
{
    // Stationary pre-filter: the vehicle never moved meaningfully.
    if trajectory.max_span() <= MIN_BOUNDARY {
        return;
    }

    trajectory.sort_by_time();
    let points = trajectory.into_points();
    let n = points.len();

    let mut current = Trajectory::new();
    let mut start = 0;
    let mut window_end = 1;

    while start < n {
        let p = points[start];
        current.push(p);

        // Points are time-sorted, so the window bound only ever grows.
        while window_end < n && points[window_end].t < p.t + TIME_LIMIT_MS {
            window_end += 1;
        }

        // Nearest neighbour among the windowed successors. Points sharing
        // p's timestamp are duplicate samples, not candidates. The sentinel
        // value `n` marks "no candidate".
        let mut closest = n;
        let mut closest_distance = f64::INFINITY;
        for i in start + 1..window_end {
            if points[i].t == p.t {
                continue;
            }
            let d = p.distance_to(&points[i]);
            if d < closest_distance {
                closest_distance = d;
                closest = i;
            }
        }

        let cut = match points.get(closest) {
            None => true,
            Some(candidate) => {
                let elapsed_seconds = (candidate.t - p.t) as f64 / 1000.0;
                closest_distance / elapsed_seconds > MAX_ANGULAR_SPEED
            }
        };

        if cut {
            let finished = std::mem::replace(&mut current, Trajectory::new());
            if finished.max_span() > MIN_BOUNDARY {
                sink(finished);
            }
        }

        // The sentinel terminates the loop; otherwise the candidate becomes
        // the next frontier (and seeds the fresh segment after a cut).
        start = closest;
    }
}

/// Split one vehicle's trajectory, collecting the surviving segments.
pub fn segment(trajectory: Trajectory) -> Vec<Trajectory> {
    let mut segments = Vec::new();
    segment_with(trajectory, &mut |s| segments.push(s));
    segments
}
