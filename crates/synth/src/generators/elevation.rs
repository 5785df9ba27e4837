//! Reflecting random-walk elevation.

use rand::Rng;

use super::{FieldGenerator, random_sign, round2};
use crate::config::AltitudeBand;

/// Largest single-step change, as a fraction of the band width.
const MAX_STEP_FRACTION: f64 = 0.1;

/// Generates altitude samples by a random walk confined to an [`AltitudeBand`].
///
/// Each step draws a delta of at most 10% of the band. If moving up by the delta
/// would leave the band the walk moves down, if moving down would leave it the walk
/// moves up, otherwise the direction is a coin flip.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    band: AltitudeBand,
    current: f64,
}

impl ElevationGenerator {
    /// Starts a walk at the middle of the band.
    pub fn new(band: AltitudeBand) -> Self {
        Self {
            band,
            current: band.center(),
        }
    }

    pub fn band(&self) -> AltitudeBand {
        self.band
    }
}

impl FieldGenerator for ElevationGenerator {
    type Item = f64;

    fn next_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let delta = rng.r#gen::<f64>() * self.band.range() * MAX_STEP_FRACTION;

        if self.current + delta > self.band.max {
            self.current -= delta;
        } else if self.current - delta < self.band.min {
            self.current += delta;
        } else {
            self.current += random_sign(rng) * delta;
        }

        round2(self.current).clamp(self.band.min, self.band.max)
    }

    fn reset(&mut self) {
        self.current = self.band.center();
    }
}
