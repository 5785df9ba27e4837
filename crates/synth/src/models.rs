//! Record types produced by synthesis.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// A WGS84 position in decimal degrees.
///
/// Every sample owns its coordinate; jittering one never touches another sample
/// or the loop track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns a copy shifted by the given offsets in degrees.
    pub fn offset(self, d_lat: f64, d_lon: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lon: self.lon + d_lon,
        }
    }

    /// Latitude and longitude as integer micro-degrees.
    pub fn to_micro_degrees(self) -> [i64; 2] {
        [
            (self.lat * 1_000_000.0).round() as i64,
            (self.lon * 1_000_000.0).round() as i64,
        ]
    }

    pub fn from_micro_degrees([lat, lon]: [i64; 2]) -> Self {
        Self {
            lat: lat as f64 / 1_000_000.0,
            lon: lon as f64 / 1_000_000.0,
        }
    }
}

/// Steps taken over a short elapsed time. Consecutive samples may repeat a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CadencePoint {
    pub steps: u32,
    /// Seconds spent on `steps`, rounded to 2 decimals.
    pub elapsed_s: f64,
}

/// Time and place at which a whole split unit of distance was first reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitNode {
    /// Distance milestone in meters (a multiple of the split unit).
    pub threshold_m: u32,
    /// Seconds from start at which the milestone is reported.
    pub elapsed_s: u32,
    /// Position of the sample that crossed the milestone.
    pub position: Coordinate,
    /// Number of samples whose cumulative distance is at most `threshold_m`.
    pub sample_count: usize,
}

/// A point of a synthesized trace with optional elevation and timestamp, used for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub position: Coordinate,
    pub elevation: Option<f64>,
    pub timestamp: Option<OffsetDateTime>,
}

/// A fully assembled sampled running record.
///
/// All four series have one entry per sample, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningRecord {
    pub run_id: Uuid,
    /// Elevation per sample in meters, 2 decimals.
    pub elevation: Vec<f64>,
    /// Position per sample.
    pub positions: Vec<Coordinate>,
    /// Cadence point per sample.
    pub cadence: Vec<CadencePoint>,
    /// Cumulative distance per sample in meters.
    pub distance_m: Vec<u32>,
    /// Split nodes in crossing order, `None` when no milestone was reached.
    pub split_nodes: Option<Vec<SplitNode>>,
    /// Equal to the last entry of `distance_m`.
    pub total_distance_m: u32,
    /// Sum of `steps` over every sample, repeats included.
    pub total_steps: u32,
    pub duration_s: u32,
    pub sample_interval_s: u32,
    pub started_at: OffsetDateTime,
    pub ended_at: OffsetDateTime,
    pub uploaded_at: OffsetDateTime,
}

impl RunningRecord {
    pub fn sample_count(&self) -> usize {
        self.distance_m.len()
    }

    /// Split nodes as a slice, empty when none were reached.
    pub fn nodes(&self) -> &[SplitNode] {
        self.split_nodes.as_deref().unwrap_or_default()
    }

    /// Average stride frequency implied by the cadence series, in steps per minute.
    pub fn average_stride_frequency(&self) -> f64 {
        let seconds: f64 = self.cadence.iter().map(|c| c.elapsed_s).sum();
        if seconds > 0.0 {
            f64::from(self.total_steps) / seconds * 60.0
        } else {
            0.0
        }
    }

    /// Samples as timestamped trace points, one per sampling interval from the start.
    pub fn trace_points(&self) -> Vec<TracePoint> {
        let interval = i64::from(self.sample_interval_s);
        self.positions
            .iter()
            .zip(&self.elevation)
            .enumerate()
            .map(|(i, (position, elevation))| {
                let at = self.started_at + Duration::seconds(interval * i as i64);
                TracePoint {
                    position: *position,
                    elevation: Some(*elevation),
                    timestamp: Some(at.min(self.ended_at)),
                }
            })
            .collect()
    }
}

/// A 1 Hz position trace with scalar totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub duration_s: u32,
    pub steps: u32,
    pub finished_at: OffsetDateTime,
    /// One position per second of running.
    pub detail: Vec<Coordinate>,
}

impl TrackRecord {
    /// Positions as trace points, spaced one second apart and ending at `finished_at`.
    pub fn trace_points(&self) -> Vec<TracePoint> {
        let start = self.finished_at - Duration::seconds(self.detail.len() as i64);
        self.detail
            .iter()
            .enumerate()
            .map(|(i, position)| TracePoint {
                position: *position,
                elevation: None,
                timestamp: Some(start + Duration::seconds(i as i64 + 1)),
            })
            .collect()
    }
}
