//! Cyclic position trace over a loop track.

use rand::Rng;

use super::{FieldGenerator, symmetric_jitter};
use crate::errors::SynthError;
use crate::models::Coordinate;
use crate::sources::LoopTrack;

/// Where the trace currently is: which lap, and which step within it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LapCursor {
    pub lap_index: usize,
    pub position_in_lap: usize,
}

/// Walks a [`LoopTrack`] lap after lap, yielding jittered copies of its points.
///
/// A lap is split into as many steps as samples are taken while running one lap at
/// the target pace. Step `i` of `n` visits loop point `i * len / n`.
#[derive(Debug, Clone)]
pub struct PositionGenerator<'t> {
    track: &'t LoopTrack,
    pace_min_per_km: f64,
    lap_length_km: f64,
    sample_interval_s: u32,
    jitter_deg: f64,
    /// Maximum per-lap pace offset; zero keeps every lap at the nominal step count.
    lap_pace_jitter: f64,
    cursor: LapCursor,
    /// Step count of the lap in progress, drawn when the lap starts.
    steps_in_lap: Option<usize>,
}

impl<'t> PositionGenerator<'t> {
    /// Creates a generator, failing fast when one lap at `pace_min_per_km` needs more
    /// samples than the loop track has points.
    pub fn new(
        track: &'t LoopTrack,
        pace_min_per_km: f64,
        lap_length_km: f64,
        sample_interval_s: u32,
        jitter_deg: f64,
    ) -> Result<Self, SynthError> {
        if !(lap_length_km.is_finite() && lap_length_km > 0.0) {
            return Err(SynthError::InvalidParams(format!(
                "lap length must be positive, got {lap_length_km} km"
            )));
        }

        let required = steps_per_lap(pace_min_per_km, lap_length_km, sample_interval_s);
        if required > track.len() {
            return Err(SynthError::LoopTrackTooCoarse {
                pace: pace_min_per_km,
                required,
                available: track.len(),
            });
        }

        Ok(Self {
            track,
            pace_min_per_km,
            lap_length_km,
            sample_interval_s,
            jitter_deg,
            lap_pace_jitter: 0.0,
            cursor: LapCursor::default(),
            steps_in_lap: None,
        })
    }

    /// Re-draws the pace of every lap within `max_offset` min/km of the target.
    pub fn with_lap_pace_jitter(mut self, max_offset: f64) -> Self {
        self.lap_pace_jitter = max_offset;
        self
    }

    /// Steps per lap at the nominal pace.
    pub fn nominal_steps_per_lap(&self) -> usize {
        steps_per_lap(
            self.pace_min_per_km,
            self.lap_length_km,
            self.sample_interval_s,
        )
    }

    pub fn cursor(&self) -> LapCursor {
        self.cursor
    }

    /// Fractional number of laps covered by the points yielded so far.
    pub fn laps_completed(&self) -> f64 {
        match self.steps_in_lap {
            Some(steps) => {
                self.cursor.lap_index as f64 + self.cursor.position_in_lap as f64 / steps as f64
            }
            None => self.cursor.lap_index as f64,
        }
    }

    fn start_lap<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let pace = self.pace_min_per_km + symmetric_jitter(rng, self.lap_pace_jitter);
        steps_per_lap(pace, self.lap_length_km, self.sample_interval_s)
    }
}

impl FieldGenerator for PositionGenerator<'_> {
    type Item = Coordinate;

    fn next_value<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Coordinate {
        let steps = match self.steps_in_lap {
            Some(steps) => steps,
            None => {
                let steps = self.start_lap(rng);
                self.steps_in_lap = Some(steps);
                steps
            }
        };

        let base = self.track.point_at_step(self.cursor.position_in_lap, steps);
        let point = base.offset(
            symmetric_jitter(rng, self.jitter_deg),
            symmetric_jitter(rng, self.jitter_deg),
        );

        self.cursor.position_in_lap += 1;
        if self.cursor.position_in_lap >= steps {
            self.cursor.lap_index += 1;
            self.cursor.position_in_lap = 0;
            self.steps_in_lap = None;
        }

        point
    }

    fn reset(&mut self) {
        self.cursor = LapCursor::default();
        self.steps_in_lap = None;
    }
}

/// Samples taken while running one lap, never fewer than one.
fn steps_per_lap(pace_min_per_km: f64, lap_length_km: f64, sample_interval_s: u32) -> usize {
    let steps = pace_min_per_km * lap_length_km * 60.0 / f64::from(sample_interval_s.max(1));
    (steps.max(0.0) as usize).max(1)
}
