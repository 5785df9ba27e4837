//! Accumulation of sampled series into a record.

use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{CadencePoint, Coordinate, RunningRecord, SplitNode};

/// One value from each field generator, drawn in the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub elevation: f64,
    pub position: Coordinate,
    pub cadence: CadencePoint,
    pub distance_m: u32,
}

/// Identity and timing of a record, fixed before sampling starts.
#[derive(Debug, Clone, Copy)]
pub struct RecordTiming {
    pub run_id: Uuid,
    pub duration_s: u32,
    pub sample_interval_s: u32,
    pub started_at: OffsetDateTime,
    pub ended_at: OffsetDateTime,
    pub uploaded_at: OffsetDateTime,
}

/// Collects ticks and split nodes in chronological order.
#[derive(Debug, Default)]
pub struct RecordAssembler {
    elevation: Vec<f64>,
    positions: Vec<Coordinate>,
    cadence: Vec<CadencePoint>,
    distance_m: Vec<u32>,
    nodes: Vec<SplitNode>,
}

impl RecordAssembler {
    pub fn with_capacity(samples: usize) -> Self {
        Self {
            elevation: Vec::with_capacity(samples),
            positions: Vec::with_capacity(samples),
            cadence: Vec::with_capacity(samples),
            distance_m: Vec::with_capacity(samples),
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, tick: Tick) {
        self.elevation.push(tick.elevation);
        self.positions.push(tick.position);
        self.cadence.push(tick.cadence);
        self.distance_m.push(tick.distance_m);
    }

    pub fn push_node(&mut self, node: SplitNode) {
        self.nodes.push(node);
    }

    /// Number of samples so far whose cumulative distance is at most `threshold_m`.
    ///
    /// The distance series is non-decreasing, so this is a binary search over the
    /// whole history.
    pub fn samples_within(&self, threshold_m: u32) -> usize {
        self.distance_m.partition_point(|&d| d <= threshold_m)
    }

    pub fn len(&self) -> usize {
        self.distance_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance_m.is_empty()
    }

    /// Computes totals and produces the record.
    pub fn finish(self, timing: RecordTiming) -> RunningRecord {
        let total_distance_m = self.distance_m.last().copied().unwrap_or(0);
        let total_steps = self.cadence.iter().map(|c| c.steps).sum();
        let split_nodes = (!self.nodes.is_empty()).then_some(self.nodes);

        RunningRecord {
            run_id: timing.run_id,
            elevation: self.elevation,
            positions: self.positions,
            cadence: self.cadence,
            distance_m: self.distance_m,
            split_nodes,
            total_distance_m,
            total_steps,
            duration_s: timing.duration_s,
            sample_interval_s: timing.sample_interval_s,
            started_at: timing.started_at,
            ended_at: timing.ended_at,
            uploaded_at: timing.uploaded_at,
        }
    }
}
