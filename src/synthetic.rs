//! Synthetic GPS trace generation for tests.
//!
//! Generates seeded random-walk traces with plausible step speeds and
//! optionally injected implausible jumps, giving tests known ground truth
//! without fixture files.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::segmentation::MAX_ANGULAR_SPEED;
use crate::Point;

/// Configuration for one generated trace.
#[derive(Debug, Clone)]
pub struct SyntheticTrace {
    pub vehicle_id: u64,
    /// Starting latitude and longitude in degrees.
    pub origin: (f64, f64),
    pub point_count: usize,
    /// Time between samples in milliseconds.
    pub sample_interval_ms: i64,
    /// Insert an implausible jump before every n-th point.
    pub jump_every: Option<usize>,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl SyntheticTrace {
    /// A continuously moving vehicle sampled every 10 s.
    pub fn driving(vehicle_id: u64, point_count: usize, seed: u64) -> Self {
        Self {
            vehicle_id,
            origin: (39.9, 116.4),
            point_count,
            sample_interval_ms: 10_000,
            jump_every: None,
            seed,
        }
    }

    /// A moving vehicle that teleports before every `every`-th point.
    pub fn with_jumps(vehicle_id: u64, point_count: usize, every: usize, seed: u64) -> Self {
        Self {
            jump_every: Some(every),
            ..Self::driving(vehicle_id, point_count, seed)
        }
    }

    /// Generate the points in time order.
    pub fn generate(&self) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (mut lat, mut lng) = self.origin;

        // Each step stays well under the plausible speed so the walk itself
        // never triggers a cut.
        let step = MAX_ANGULAR_SPEED * (self.sample_interval_ms as f64 / 1000.0) * 0.8;
        let mut heading: f64 = rng.gen_range(0.0..TAU);

        let mut points = Vec::with_capacity(self.point_count);
        for i in 0..self.point_count {
            if let Some(every) = self.jump_every {
                if i > 0 && i % every == 0 {
                    // A whole degree in one interval, far beyond any vehicle.
                    lat += 1.0;
                    lng += 1.0;
                }
            }
            points.push(Point::new(
                self.vehicle_id,
                lat,
                lng,
                i as i64 * self.sample_interval_ms,
            ));
            heading += rng.gen_range(-0.2..0.2);
            lat += step * heading.sin();
            lng += step * heading.cos();
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let config = SyntheticTrace::driving(1, 50, 42);
        assert_eq!(config.generate(), config.generate());
    }

    #[test]
    fn steps_stay_under_speed_limit() {
        let points = SyntheticTrace::driving(1, 100, 7).generate();
        for pair in points.windows(2) {
            let elapsed = (pair[1].t - pair[0].t) as f64 / 1000.0;
            assert!(pair[0].distance_to(&pair[1]) / elapsed < MAX_ANGULAR_SPEED);
        }
    }

    #[test]
    fn jumps_exceed_speed_limit() {
        let points = SyntheticTrace::with_jumps(1, 30, 10, 7).generate();
        let jump = points[9].distance_to(&points[10]);
        assert!(jump / 10.0 > MAX_ANGULAR_SPEED);
    }
}
