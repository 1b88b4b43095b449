//! Initial placement of new tokens.
//!
//! `LabSession` asks a [`SpawnStrategy`] where each new token goes. The
//! default draws uniformly from the spawn region; tests and replays inject a
//! [`SequenceSpawn`] to get exact coordinates.

#[cfg(test)]
#[path = "spawn_test.rs"]
mod spawn_test;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::consts::{SPAWN_X_MAX, SPAWN_X_MIN, SPAWN_Y_MAX, SPAWN_Y_MIN};
use crate::geom::Point;

/// Half-open rectangle `[x_min, x_max) × [y_min, y_max)` new tokens appear in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRegion {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self { x_min: SPAWN_X_MIN, x_max: SPAWN_X_MAX, y_min: SPAWN_Y_MIN, y_max: SPAWN_Y_MAX }
    }
}

impl SpawnRegion {
    /// Whether `p` lies inside the region. A zero-width axis admits its
    /// single coordinate.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        axis_contains(self.x_min, self.x_max, p.x) && axis_contains(self.y_min, self.y_max, p.y)
    }
}

fn axis_contains(min: f64, max: f64, v: f64) -> bool {
    if max > min { v >= min && v < max } else { (v - min).abs() < f64::EPSILON }
}

/// Chooses where a newly placed token appears.
pub trait SpawnStrategy {
    /// Top-left corner for the next token.
    fn next_position(&mut self, region: &SpawnRegion) -> Point;
}

/// Uniform random placement inside the region.
pub struct RandomSpawn {
    rng: StdRng,
}

impl RandomSpawn {
    /// Seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Reproducible sequence for a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Uniform in `[min, max)`. Float rounding in `random_range` can land on
    /// `max`, so the result is clamped below it.
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if max > min { self.rng.random_range(min..max).min(max.next_down()) } else { min }
    }
}

impl Default for RandomSpawn {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnStrategy for RandomSpawn {
    fn next_position(&mut self, region: &SpawnRegion) -> Point {
        let x = self.sample(region.x_min, region.x_max);
        let y = self.sample(region.y_min, region.y_max);
        Point::new(x, y)
    }
}

/// Hands out a fixed list of positions in order, wrapping around at the end.
///
/// The region is ignored; scripted positions may lie anywhere.
#[derive(Debug, Clone, Default)]
pub struct SequenceSpawn {
    points: Vec<Point>,
    next: usize,
}

impl SequenceSpawn {
    #[must_use]
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self { points: points.into_iter().collect(), next: 0 }
    }
}

impl SpawnStrategy for SequenceSpawn {
    fn next_position(&mut self, region: &SpawnRegion) -> Point {
        let Some(p) = self.points.get(self.next).copied() else {
            return Point::new(region.x_min, region.y_min);
        };
        self.next = (self.next + 1) % self.points.len();
        p
    }
}
