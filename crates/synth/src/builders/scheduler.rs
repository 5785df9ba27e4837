//! Lockstep sampling of the field generators and split-node detection.

use rand::Rng;
use tracing::debug;

use super::assembler::{RecordAssembler, Tick};
use crate::generators::{
    CadenceGenerator, DistanceGenerator, ElevationGenerator, FieldGenerator, PositionGenerator,
};
use crate::models::SplitNode;

/// Number of samples covering `duration_s`, counting a final partial interval.
///
/// Never less than one, so even a run shorter than one interval has a sample.
pub fn sample_count(duration_s: u32, sample_interval_s: u32) -> usize {
    let interval = sample_interval_s.max(1);
    (duration_s.div_ceil(interval) as usize).max(1)
}

/// The four field generators of a sampled record.
#[derive(Debug, Clone)]
pub struct FieldSet<'t> {
    pub elevation: ElevationGenerator,
    pub position: PositionGenerator<'t>,
    pub cadence: CadenceGenerator,
    pub distance: DistanceGenerator,
}

impl FieldSet<'_> {
    /// Draws one value from every generator: elevation, position, cadence, distance.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Tick {
        let elevation = self.elevation.next_value(rng);
        let position = self.position.next_value(rng);
        let cadence = self.cadence.next_value(rng);
        let distance_m = self.distance.next_value(rng);
        Tick {
            elevation,
            position,
            cadence,
            distance_m,
        }
    }

    pub fn reset(&mut self) {
        self.elevation.reset();
        self.position.reset();
        self.cadence.reset();
        self.distance.reset();
    }
}

/// Milestones at every whole split unit and the times reported for them.
#[derive(Debug, Clone)]
pub struct SplitPlan {
    unit_m: u32,
    target_distance_m: f64,
    duration_s: u32,
    time_jitter_s: u32,
    next_threshold_m: u32,
}

impl SplitPlan {
    pub fn new(unit_m: u32, target_distance_m: f64, duration_s: u32, time_jitter_s: u32) -> Self {
        Self {
            unit_m,
            target_distance_m,
            duration_s,
            time_jitter_s,
            next_threshold_m: unit_m,
        }
    }

    /// Returns the next milestone reached by `distance_m`, advancing past it.
    pub fn crossed(&mut self, distance_m: u32) -> Option<u32> {
        if self.unit_m == 0 || distance_m < self.next_threshold_m {
            return None;
        }
        let threshold = self.next_threshold_m;
        self.next_threshold_m = self.next_threshold_m.saturating_add(self.unit_m);
        Some(threshold)
    }

    /// Time reported for a milestone.
    ///
    /// The milestone's share of the target distance is applied to the duration, capped
    /// at the duration. A random offset of up to the jitter is then added in a random
    /// direction, unless it would land before the start or after the end.
    pub fn elapsed_at<R: Rng + ?Sized>(&self, threshold_m: u32, rng: &mut R) -> u32 {
        let share = f64::from(threshold_m) / self.target_distance_m;
        let base = (f64::from(self.duration_s) * share).floor();
        let base = if base.is_finite() {
            (base.max(0.0) as u32).min(self.duration_s)
        } else {
            self.duration_s
        };

        let offset = i64::from(rng.gen_range(0..=self.time_jitter_s));
        let offset = if rng.gen_bool(0.5) { offset } else { -offset };
        let candidate = i64::from(base) + offset;

        if (0..=i64::from(self.duration_s)).contains(&candidate) {
            candidate as u32
        } else {
            base
        }
    }
}

/// Drives the field generators for a fixed number of ticks.
#[derive(Debug, Clone)]
pub struct SampleScheduler {
    sample_count: usize,
    splits: SplitPlan,
}

impl SampleScheduler {
    pub fn new(duration_s: u32, sample_interval_s: u32, splits: SplitPlan) -> Self {
        Self {
            sample_count: sample_count(duration_s, sample_interval_s),
            splits,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Runs every tick, feeding samples and split nodes to a fresh assembler.
    pub fn run<R: Rng + ?Sized>(mut self, fields: &mut FieldSet<'_>, rng: &mut R) -> RecordAssembler {
        let mut assembler = RecordAssembler::with_capacity(self.sample_count);

        for _ in 0..self.sample_count {
            let tick = fields.tick(rng);
            assembler.push(tick);

            // One increment can span several split units; each gets its own node.
            while let Some(threshold_m) = self.splits.crossed(tick.distance_m) {
                let node = SplitNode {
                    threshold_m,
                    elapsed_s: self.splits.elapsed_at(threshold_m, rng),
                    position: tick.position,
                    sample_count: assembler.samples_within(threshold_m),
                };
                debug!(
                    threshold_m,
                    elapsed_s = node.elapsed_s,
                    samples = node.sample_count,
                    "Split node reached"
                );
                assembler.push_node(node);
            }
        }

        assembler
    }
}
