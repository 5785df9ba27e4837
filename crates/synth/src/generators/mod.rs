//! Stochastic field generators.
//!
//! Each generator produces an unbounded sequence where every value derives from the
//! previous state plus fresh randomness:
//! - [`ElevationGenerator`]: reflecting random walk inside an altitude band
//! - [`PositionGenerator`]: jittered copies of loop-track points, lap after lap
//! - [`CadenceGenerator`]: (steps, seconds) points repeated for short runs
//! - [`DistanceGenerator`]: cumulative distance with jittered positive increments
//!
//! Generators never own randomness. The caller passes the source on every draw, so one
//! seeded rng can drive all four fields in lockstep.

pub mod cadence;
pub mod distance;
pub mod elevation;
pub mod position;

pub use cadence::CadenceGenerator;
pub use distance::DistanceGenerator;
pub use elevation::ElevationGenerator;
pub use position::{LapCursor, PositionGenerator};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// A restartable, infinite source of field values.
pub trait FieldGenerator {
    type Item;

    /// Advances the generator and returns the next value.
    fn next_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Self::Item;

    /// Returns the generator to its initial state.
    fn reset(&mut self);

    /// Adapts the generator into an iterator bound to `rng`.
    fn samples<R: Rng + ?Sized>(self, rng: &mut R) -> Samples<'_, Self, R>
    where
        Self: Sized,
    {
        Samples {
            generator: self,
            rng,
        }
    }
}

/// Iterator over a [`FieldGenerator`]. Never ends.
pub struct Samples<'r, G, R: ?Sized> {
    generator: G,
    rng: &'r mut R,
}

impl<G: FieldGenerator, R: Rng + ?Sized> Iterator for Samples<'_, G, R> {
    type Item = G::Item;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generator.next_value(self.rng))
    }
}

/// Draws a uniform offset in `[-magnitude, magnitude)`.
pub(crate) fn symmetric_jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: f64) -> f64 {
    if magnitude > 0.0 {
        Uniform::new(-magnitude, magnitude).sample(rng)
    } else {
        0.0
    }
}

/// Draws `-1.0` or `1.0` with equal probability.
pub(crate) fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.gen_bool(0.5) { 1.0 } else { -1.0 }
}

/// Rounds to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_symmetric_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let j = symmetric_jitter(&mut rng, 0.15);
            assert!((-0.15..0.15).contains(&j));
        }
        assert_eq!(symmetric_jitter(&mut rng, 0.0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(42.996), 43.0);
        assert_eq!(round2(3.5349), 3.53);
    }
}
