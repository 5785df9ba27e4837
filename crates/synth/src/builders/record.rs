//! Fluent entry point for record synthesis.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use uuid::Builder;

use super::assembler::RecordTiming;
use super::scheduler::{FieldSet, SampleScheduler, SplitPlan};
use super::trace::synthesize_trace;
use crate::config::{Destination, GenerationParams, SynthesisConfig};
use crate::errors::SynthError;
use crate::generators::{
    CadenceGenerator, DistanceGenerator, ElevationGenerator, PositionGenerator, symmetric_jitter,
};
use crate::models::{RunningRecord, TrackRecord};
use crate::sources::LoopTrack;

/// Builder for synthesizing records.
///
/// # Example
///
/// ```rust,ignore
/// let track = LoopTrack::builtin("joyrun")?;
/// let builder = RecordBuilder::for_destination(Destination::Joyrun, 3.0, 6.0, 170)
///     .with_seed(12345);
/// let record = builder.build_record(&track, &mut builder.rng())?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    params: GenerationParams,
    config: SynthesisConfig,
    uploaded_at: Option<OffsetDateTime>,
    seed: Option<u64>,
}

impl RecordBuilder {
    /// Creates a builder with the default (5 s sampled) tuning.
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            config: SynthesisConfig::default(),
            uploaded_at: None,
            seed: None,
        }
    }

    /// Creates a builder using the sampling interval and tuning of a destination.
    pub fn for_destination(
        destination: Destination,
        distance_km: f64,
        pace_min_per_km: f64,
        stride_freq_steps_per_min: u32,
    ) -> Self {
        let params = GenerationParams::new(distance_km, pace_min_per_km, stride_freq_steps_per_min)
            .with_sample_interval(destination.sample_interval_s());
        Self::new(params).with_config(destination.config())
    }

    pub fn with_config(mut self, config: SynthesisConfig) -> Self {
        self.config = config;
        self
    }

    /// Fixes the upload instant instead of reading the clock at build time.
    pub fn uploaded_at(mut self, at: OffsetDateTime) -> Self {
        self.uploaded_at = Some(at);
        self
    }

    /// Seeds the rng returned by [`RecordBuilder::rng`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// A fresh rng: seeded when a seed was set, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Synthesizes a sampled record with elevation, cadence, distance and split nodes.
    pub fn build_record<R: Rng + ?Sized>(
        &self,
        track: &LoopTrack,
        rng: &mut R,
    ) -> Result<RunningRecord, SynthError> {
        synthesize_record(track, &self.params, &self.config, self.upload_instant(), rng)
    }

    /// Synthesizes a 1 Hz position trace with scalar totals.
    pub fn build_trace<R: Rng + ?Sized>(
        &self,
        track: &LoopTrack,
        rng: &mut R,
    ) -> Result<TrackRecord, SynthError> {
        synthesize_trace(track, &self.params, &self.config, self.upload_instant(), rng)
    }

    fn upload_instant(&self) -> OffsetDateTime {
        let at = self.uploaded_at.unwrap_or_else(OffsetDateTime::now_utc);
        at - Duration::nanoseconds(i64::from(at.nanosecond()))
    }
}

/// Synthesizes a sampled record.
///
/// A pure function of its inputs: the loop track is only read, and all randomness
/// comes from `rng`. Every configuration error is raised before the first sample.
pub fn synthesize_record<R: Rng + ?Sized>(
    track: &LoopTrack,
    params: &GenerationParams,
    config: &SynthesisConfig,
    uploaded_at: OffsetDateTime,
    rng: &mut R,
) -> Result<RunningRecord, SynthError> {
    params.validate()?;
    config.validate()?;

    let position = PositionGenerator::new(
        track,
        params.pace_min_per_km,
        config.lap_length_km,
        params.sample_interval_s,
        config.coordinate_jitter_deg,
    )?;
    let cadence = CadenceGenerator::new(
        params.stride_freq_steps_per_min,
        config.step_range,
        &config.run_length_weights,
        config.cadence_time_jitter,
    )?;
    let mut fields = FieldSet {
        elevation: ElevationGenerator::new(config.altitude),
        position,
        cadence,
        distance: DistanceGenerator::new(params.meters_per_interval(), config.increment_jitter),
    };

    let distance_km =
        params.distance_km + symmetric_jitter(rng, params.distance_km * config.distance_jitter);
    let duration_s = ((distance_km * params.pace_min_per_km * 60.0).max(0.0) as u32).max(1);

    let upload_delay_s = rng.gen_range(config.upload_delay_s.0..=config.upload_delay_s.1);
    let ended_at = uploaded_at - Duration::seconds(i64::from(upload_delay_s));
    let timing = RecordTiming {
        run_id: Builder::from_random_bytes(rng.r#gen()).into_uuid(),
        duration_s,
        sample_interval_s: params.sample_interval_s,
        started_at: ended_at - Duration::seconds(i64::from(duration_s)),
        ended_at,
        uploaded_at,
    };

    let splits = SplitPlan::new(
        config.split_unit_m,
        params.distance_km * 1000.0,
        duration_s,
        config.node_time_jitter_s,
    );
    let scheduler = SampleScheduler::new(duration_s, params.sample_interval_s, splits);
    debug!(
        run_id = %timing.run_id,
        duration_s,
        samples = scheduler.sample_count(),
        steps_per_lap = fields.position.nominal_steps_per_lap(),
        "Sampling record"
    );

    let record = scheduler.run(&mut fields, rng).finish(timing);
    info!(
        run_id = %record.run_id,
        total_distance_m = record.total_distance_m,
        total_steps = record.total_steps,
        split_nodes = record.nodes().len(),
        "Record synthesized"
    );

    Ok(record)
}
