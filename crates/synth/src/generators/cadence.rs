//! Step cadence points with short repeated runs.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use super::{FieldGenerator, round2, symmetric_jitter};
use crate::errors::SynthError;
use crate::models::CadencePoint;

/// Generates `(steps, seconds)` cadence points.
///
/// A drawn point is repeated for a run of 1..=N samples, where the run length follows
/// the configured weights (short runs are the most likely by default). Steps are
/// uniform in the step range; seconds follow from the stride frequency with a small
/// relative jitter.
#[derive(Debug, Clone)]
pub struct CadenceGenerator {
    stride_freq: u32,
    step_range: (u32, u32),
    time_jitter: f64,
    run_lengths: WeightedIndex<u32>,
    /// Point being repeated and how many more samples it covers.
    current: Option<(CadencePoint, usize)>,
}

impl CadenceGenerator {
    pub fn new(
        stride_freq: u32,
        step_range: (u32, u32),
        run_length_weights: &[u32],
        time_jitter: f64,
    ) -> Result<Self, SynthError> {
        if stride_freq == 0 {
            return Err(SynthError::InvalidParams(
                "stride frequency must be positive".into(),
            ));
        }
        if step_range.0 == 0 || step_range.0 > step_range.1 {
            return Err(SynthError::InvalidParams(format!(
                "step range {}..={} is empty or starts at zero",
                step_range.0, step_range.1
            )));
        }
        let run_lengths = WeightedIndex::new(run_length_weights).map_err(|e| {
            SynthError::InvalidParams(format!("cadence run-length weights: {e}"))
        })?;

        Ok(Self {
            stride_freq,
            step_range,
            time_jitter,
            run_lengths,
            current: None,
        })
    }

    fn draw_point<R: Rng + ?Sized>(&self, rng: &mut R) -> CadencePoint {
        let steps = rng.gen_range(self.step_range.0..=self.step_range.1);
        let seconds = f64::from(steps) / f64::from(self.stride_freq) * 60.0;
        let seconds = seconds * (1.0 + symmetric_jitter(rng, self.time_jitter));
        CadencePoint {
            steps,
            elapsed_s: round2(seconds),
        }
    }
}

impl FieldGenerator for CadenceGenerator {
    type Item = CadencePoint;

    fn next_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CadencePoint {
        let (point, remaining) = match self.current.take() {
            Some((point, remaining)) if remaining > 0 => (point, remaining),
            _ => {
                let run = self.run_lengths.sample(rng) + 1;
                (self.draw_point(rng), run)
            }
        };
        self.current = Some((point, remaining - 1));
        point
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn generator() -> CadenceGenerator {
        CadenceGenerator::new(170, (8, 13), &[5, 4, 3, 2, 1], 0.05).unwrap()
    }

    #[test]
    fn test_points_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for point in generator().samples(&mut rng).take(2_000) {
            assert!((8..=13).contains(&point.steps));
            let nominal = f64::from(point.steps) / 170.0 * 60.0;
            assert!((point.elapsed_s - nominal).abs() <= nominal * 0.05 + 0.005);
        }
    }

    #[test]
    fn test_runs_are_between_one_and_five() {
        let mut rng = StdRng::seed_from_u64(17);
        let points: Vec<CadencePoint> = generator().samples(&mut rng).take(5_000).collect();

        let mut run = 1;
        let mut longest = 1;
        for pair in points.windows(2) {
            if pair[0] == pair[1] {
                run += 1;
            } else {
                run = 1;
            }
            longest = longest.max(run);
        }
        // Back-to-back identical draws can merge runs, so only the typical bound is checked
        assert!(longest >= 2);
        assert!(longest <= 10);
    }

    #[test]
    fn test_short_runs_are_favoured() {
        let mut rng = StdRng::seed_from_u64(5);
        let cadence = generator();
        let mut counts = [0usize; 5];
        for _ in 0..10_000 {
            counts[cadence.run_lengths.sample(&mut rng)] += 1;
        }
        assert!(counts[0] > counts[2]);
        assert!(counts[2] > counts[4]);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(CadenceGenerator::new(0, (8, 13), &[1], 0.05).is_err());
        assert!(CadenceGenerator::new(170, (13, 8), &[1], 0.05).is_err());
        assert!(CadenceGenerator::new(170, (8, 13), &[], 0.05).is_err());
        assert!(CadenceGenerator::new(170, (8, 13), &[0, 0], 0.05).is_err());
    }

    #[test]
    fn test_reset_draws_fresh_run() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cadence = generator();
        cadence.next_value(&mut rng);
        cadence.reset();
        assert!(cadence.current.is_none());
    }
}
