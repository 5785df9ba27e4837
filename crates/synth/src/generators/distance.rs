//! Cumulative distance with jittered increments.

use rand::Rng;

use super::{FieldGenerator, symmetric_jitter};

/// Generates cumulative distance in whole meters.
///
/// Each sample adds the distance run in one interval at the target pace, scaled by a
/// uniform relative jitter and truncated to whole meters. Increments are at least one
/// meter, so the series is strictly increasing.
#[derive(Debug, Clone)]
pub struct DistanceGenerator {
    meters_per_interval: f64,
    jitter: f64,
    current_m: u32,
}

impl DistanceGenerator {
    pub fn new(meters_per_interval: f64, jitter: f64) -> Self {
        Self {
            meters_per_interval,
            jitter,
            current_m: 0,
        }
    }

    pub fn current_m(&self) -> u32 {
        self.current_m
    }
}

impl FieldGenerator for DistanceGenerator {
    type Item = u32;

    fn next_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let increment = self.meters_per_interval * (1.0 + symmetric_jitter(rng, self.jitter));
        self.current_m = self
            .current_m
            .saturating_add((increment.max(0.0) as u32).max(1));
        self.current_m
    }

    fn reset(&mut self) {
        self.current_m = 0;
    }
}
