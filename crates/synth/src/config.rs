//! Configuration types for record synthesis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SynthError;

/// Closed altitude interval the elevation walk is confined to, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AltitudeBand {
    /// Lowest reachable altitude.
    pub min: f64,
    /// Highest reachable altitude.
    pub max: f64,
}

impl AltitudeBand {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the band.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the band, where every walk starts.
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, altitude: f64) -> bool {
        altitude >= self.min && altitude <= self.max
    }

    /// Sports field next to the reference loop (42.2 m .. 43.8 m).
    pub const CAMPUS_FIELD: AltitudeBand = AltitudeBand::new(42.20, 43.80);
}

/// Destination service a record is synthesized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    /// 5 s sampled record with elevation, cadence, distance and split nodes.
    Joyrun,
    /// 1 Hz position trace with scalar totals.
    PkuRunner,
}

impl Destination {
    /// Name of the built-in loop track for this destination.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Destination::Joyrun => "joyrun",
            Destination::PkuRunner => "pkurunner",
        }
    }

    /// Fixed sampling interval of the destination's record format.
    pub fn sample_interval_s(&self) -> u32 {
        match self {
            Destination::Joyrun => 5,
            Destination::PkuRunner => 1,
        }
    }

    /// Default synthesis tuning for the destination.
    pub fn config(&self) -> SynthesisConfig {
        match self {
            Destination::Joyrun => SynthesisConfig::joyrun(),
            Destination::PkuRunner => SynthesisConfig::pkurunner(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}

impl FromStr for Destination {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "joyrun" => Ok(Destination::Joyrun),
            "pkurunner" => Ok(Destination::PkuRunner),
            other => Err(SynthError::InvalidParams(format!(
                "unknown destination '{other}'"
            ))),
        }
    }
}

/// The three high-level targets of a run plus the sampling cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Target distance in kilometers.
    pub distance_km: f64,
    /// Target pace in minutes per kilometer.
    pub pace_min_per_km: f64,
    /// Target stride frequency in steps per minute.
    pub stride_freq_steps_per_min: u32,
    /// Time between consecutive samples in seconds.
    pub sample_interval_s: u32,
}

impl GenerationParams {
    /// Creates parameters with the default 5 s sampling interval.
    pub fn new(distance_km: f64, pace_min_per_km: f64, stride_freq_steps_per_min: u32) -> Self {
        Self {
            distance_km,
            pace_min_per_km,
            stride_freq_steps_per_min,
            sample_interval_s: 5,
        }
    }

    /// Sets the sampling interval.
    pub fn with_sample_interval(mut self, seconds: u32) -> Self {
        self.sample_interval_s = seconds;
        self
    }

    /// Rejects non-positive or non-finite targets.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !(self.distance_km.is_finite() && self.distance_km > 0.0) {
            return Err(SynthError::InvalidParams(format!(
                "distance must be positive, got {} km",
                self.distance_km
            )));
        }
        if !(self.pace_min_per_km.is_finite() && self.pace_min_per_km > 0.0) {
            return Err(SynthError::InvalidParams(format!(
                "pace must be positive, got {} min/km",
                self.pace_min_per_km
            )));
        }
        if self.stride_freq_steps_per_min == 0 {
            return Err(SynthError::InvalidParams(
                "stride frequency must be positive".into(),
            ));
        }
        if self.sample_interval_s == 0 {
            return Err(SynthError::InvalidParams(
                "sample interval must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Unjittered run duration in seconds.
    pub fn nominal_duration_s(&self) -> f64 {
        self.distance_km * self.pace_min_per_km * 60.0
    }

    /// Meters covered in one sampling interval at the target pace.
    pub fn meters_per_interval(&self) -> f64 {
        1000.0 / self.pace_min_per_km / 60.0 * f64::from(self.sample_interval_s)
    }
}

/// Tuning of the random processes behind a record.
///
/// Jitter values are relative fractions unless the field name carries a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Band the elevation walk stays in.
    pub altitude: AltitudeBand,
    /// Relative jitter on the distance used to derive the run duration.
    pub distance_jitter: f64,
    /// Relative jitter on each per-interval distance increment.
    pub increment_jitter: f64,
    /// Relative jitter on the elapsed time of a cadence point.
    pub cadence_time_jitter: f64,
    /// Inclusive range of steps in one cadence point.
    pub step_range: (u32, u32),
    /// Weights for cadence run lengths 1, 2, 3, ...
    pub run_length_weights: Vec<u32>,
    /// Maximum jitter added to each coordinate, in degrees.
    pub coordinate_jitter_deg: f64,
    /// Distance between split nodes in meters.
    pub split_unit_m: u32,
    /// Maximum offset applied to a split node's time, in seconds.
    pub node_time_jitter_s: u32,
    /// Inclusive range of seconds between run end and upload.
    pub upload_delay_s: (u32, u32),
    /// Length of one lap of the loop track in kilometers.
    pub lap_length_km: f64,
    /// Lap length the destination actually measures once coordinates are jittered.
    pub reported_lap_km: f64,
    /// Maximum pace offset drawn per lap or per run, in min/km.
    pub pace_jitter_min_per_km: f64,
    /// Maximum stride frequency offset in steps per minute.
    pub stride_jitter: i32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            altitude: AltitudeBand::CAMPUS_FIELD,
            distance_jitter: 0.05,
            increment_jitter: 0.15,
            cadence_time_jitter: 0.05,
            step_range: (8, 13),
            run_length_weights: vec![5, 4, 3, 2, 1],
            coordinate_jitter_deg: 0.000025,
            split_unit_m: 1000,
            node_time_jitter_s: 10,
            upload_delay_s: (10, 20),
            lap_length_km: 0.4,
            reported_lap_km: 0.45,
            pace_jitter_min_per_km: 0.1,
            stride_jitter: 15,
        }
    }
}

impl SynthesisConfig {
    /// Tuning for the 5 s sampled record.
    pub fn joyrun() -> Self {
        Self::default()
    }

    /// Tuning for the 1 Hz trace, which uses tighter coordinate jitter.
    pub fn pkurunner() -> Self {
        Self {
            coordinate_jitter_deg: 0.000015,
            ..Self::default()
        }
    }

    /// Rejects tuning that cannot drive the generators.
    pub fn validate(&self) -> Result<(), SynthError> {
        let fractions = [
            ("distance_jitter", self.distance_jitter),
            ("increment_jitter", self.increment_jitter),
            ("cadence_time_jitter", self.cadence_time_jitter),
        ];
        for (name, value) in fractions {
            if !(0.0..1.0).contains(&value) {
                return Err(SynthError::InvalidParams(format!(
                    "{name} must be in [0, 1), got {value}"
                )));
            }
        }
        if !(self.altitude.min.is_finite()
            && self.altitude.max.is_finite()
            && self.altitude.min <= self.altitude.max)
        {
            return Err(SynthError::InvalidParams(format!(
                "altitude band {:?} is empty",
                self.altitude
            )));
        }
        if self.split_unit_m == 0 {
            return Err(SynthError::InvalidParams(
                "split unit must be positive".into(),
            ));
        }
        if self.upload_delay_s.0 > self.upload_delay_s.1 {
            return Err(SynthError::InvalidParams(format!(
                "upload delay range {}..={} is empty",
                self.upload_delay_s.0, self.upload_delay_s.1
            )));
        }
        for (name, value) in [
            ("coordinate_jitter_deg", self.coordinate_jitter_deg),
            ("pace_jitter_min_per_km", self.pace_jitter_min_per_km),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SynthError::InvalidParams(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        if !(self.reported_lap_km.is_finite() && self.reported_lap_km > 0.0) {
            return Err(SynthError::InvalidParams(
                "reported lap length must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Removes every source of jitter that affects record length and totals.
    ///
    /// Useful when a caller needs the exact nominal duration.
    pub fn without_duration_jitter(mut self) -> Self {
        self.distance_jitter = 0.0;
        self.pace_jitter_min_per_km = 0.0;
        self
    }
}
