//! 1 Hz position traces that end after a whole number of loop fractions.

use rand::Rng;
use time::OffsetDateTime;
use tracing::info;

use crate::config::{Destination, GenerationParams, SynthesisConfig};
use crate::errors::SynthError;
use crate::generators::{FieldGenerator, PositionGenerator, symmetric_jitter};
use crate::models::TrackRecord;
use crate::sources::LoopTrack;

/// Synthesizes a position trace with scalar duration and step totals.
///
/// Laps are walked with a pace re-drawn per lap until the covered laps reach the
/// target distance. The reported duration uses the longer lap length a jittered trace
/// measures as, so the uploaded pace matches the target.
pub fn synthesize_trace<R: Rng + ?Sized>(
    track: &LoopTrack,
    params: &GenerationParams,
    config: &SynthesisConfig,
    finished_at: OffsetDateTime,
    rng: &mut R,
) -> Result<TrackRecord, SynthError> {
    params.validate()?;
    config.validate()?;
    let interval_s = Destination::PkuRunner.sample_interval_s();
    if params.sample_interval_s != interval_s {
        return Err(SynthError::InvalidParams(format!(
            "trace needs a {interval_s} s sample interval, got {} s",
            params.sample_interval_s
        )));
    }

    let mut positions = PositionGenerator::new(
        track,
        params.pace_min_per_km,
        config.lap_length_km,
        params.sample_interval_s,
        config.coordinate_jitter_deg,
    )?
    .with_lap_pace_jitter(config.pace_jitter_min_per_km);

    let pace = params.pace_min_per_km + symmetric_jitter(rng, config.pace_jitter_min_per_km);
    let reported_km = params.distance_km * config.reported_lap_km / config.lap_length_km;
    let duration_s = ((reported_km * pace * 60.0).max(0.0) as u32).max(1);

    // Truncates toward zero, so the offset is an integer in -(jitter-1)..=jitter-1
    let stride_offset = symmetric_jitter(rng, f64::from(config.stride_jitter)) as i64;
    let stride = (i64::from(params.stride_freq_steps_per_min) + stride_offset).max(0);
    let steps = (stride as f64 * f64::from(duration_s) / 60.0) as u32;

    let total_laps = params.distance_km / config.lap_length_km;
    let mut detail = Vec::with_capacity(
        (total_laps * positions.nominal_steps_per_lap() as f64).ceil() as usize + 1,
    );
    loop {
        detail.push(positions.next_value(rng));
        if positions.laps_completed() >= total_laps {
            break;
        }
    }

    info!(
        duration_s,
        steps,
        points = detail.len(),
        laps = total_laps,
        "Trace synthesized"
    );

    Ok(TrackRecord {
        duration_s,
        steps,
        finished_at,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn finished_at() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_538_035_490).unwrap()
    }

    fn params() -> GenerationParams {
        GenerationParams::new(2.0, 6.0, 170).with_sample_interval(1)
    }

    #[test]
    fn test_trace_covers_target_laps() {
        let track = LoopTrack::builtin("pkurunner").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let trace = synthesize_trace(
            &track,
            &params(),
            &SynthesisConfig::pkurunner(),
            finished_at(),
            &mut rng,
        )
        .unwrap();

        // 5 laps of 141..=146 points each
        assert!((705..=730).contains(&trace.detail.len()), "{}", trace.detail.len());
        // 2 km * 0.45 / 0.4 at 6:00/km +- 0.1
        assert!((796..=824).contains(&trace.duration_s), "{}", trace.duration_s);
        let stride = f64::from(trace.steps) / f64::from(trace.duration_s) * 60.0;
        assert!((154.0..=185.0).contains(&stride), "{stride}");
    }

    #[test]
    fn test_partial_lap_stops_early() {
        let track = LoopTrack::builtin("pkurunner").unwrap();
        let config = SynthesisConfig {
            pace_jitter_min_per_km: 0.0,
            ..SynthesisConfig::pkurunner()
        };
        let params = GenerationParams::new(0.1, 6.0, 170).with_sample_interval(1);
        let mut rng = StdRng::seed_from_u64(1);
        let trace = synthesize_trace(&track, &params, &config, finished_at(), &mut rng).unwrap();

        // A quarter of a 144-point lap
        assert_eq!(trace.detail.len(), 36);
        assert_eq!(trace.duration_s, 40);
    }

    #[test]
    fn test_five_second_interval_rejected() {
        let track = LoopTrack::builtin("pkurunner").unwrap();
        let params = GenerationParams::new(2.0, 6.0, 170);
        let mut rng = StdRng::seed_from_u64(1);
        let err = synthesize_trace(
            &track,
            &params,
            &SynthesisConfig::pkurunner(),
            finished_at(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, SynthError::InvalidParams(_)));
    }

    #[test]
    fn test_slow_pace_rejected() {
        let track = LoopTrack::builtin("pkurunner").unwrap();
        let params = GenerationParams::new(2.0, 12.0, 170).with_sample_interval(1);
        let mut rng = StdRng::seed_from_u64(1);
        let err = synthesize_trace(
            &track,
            &params,
            &SynthesisConfig::pkurunner(),
            finished_at(),
            &mut rng,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}
