//! Upload fields of the 5 s sampled record.

use serde::{Deserialize, Serialize};

use crate::encoding::{from_dash_joined, to_compact, to_dash_joined};
use crate::models::{CadencePoint, Coordinate, RunningRecord, SplitNode};

/// Encoded record fields, named as the destination expects them.
///
/// List-valued fields are strings: positions and split nodes are dash-joined compact
/// arrays, the other series are single compact arrays. Coordinates are integer
/// micro-degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoyrunPayload {
    pub altitude: String,
    pub content: String,
    pub stepcontent: String,
    /// Anomalous-step markers. The structure is unknown upstream, so it is always empty.
    pub stepremark: String,
    #[serde(rename = "timeDistance")]
    pub time_distance: String,
    /// Empty string when no split node was reached.
    pub nodetime: String,
    pub meter: u32,
    pub second: u32,
    pub totalsteps: u32,
    pub runid: String,
    pub sampleinterval: u32,
    pub starttime: i64,
    pub lasttime: i64,
    pub dateline: i64,
}

impl JoyrunPayload {
    pub fn from_record(record: &RunningRecord) -> Result<Self, serde_json::Error> {
        Ok(Self {
            altitude: encode_altitude(&record.elevation)?,
            content: encode_content(&record.positions)?,
            stepcontent: encode_stepcontent(&record.cadence)?,
            stepremark: String::new(),
            time_distance: encode_time_distance(&record.distance_m)?,
            nodetime: encode_nodetime(record.split_nodes.as_deref())?,
            meter: record.total_distance_m,
            second: record.duration_s,
            totalsteps: record.total_steps,
            runid: record.run_id.simple().to_string(),
            sampleinterval: record.sample_interval_s,
            starttime: record.started_at.unix_timestamp(),
            lasttime: record.ended_at.unix_timestamp(),
            dateline: record.uploaded_at.unix_timestamp(),
        })
    }

    pub fn decode_altitude(&self) -> Result<Vec<f64>, serde_json::Error> {
        serde_json::from_str(&self.altitude)
    }

    pub fn decode_content(&self) -> Result<Vec<Coordinate>, serde_json::Error> {
        let pairs: Vec<[i64; 2]> = from_dash_joined(&self.content)?;
        Ok(pairs.into_iter().map(Coordinate::from_micro_degrees).collect())
    }

    pub fn decode_stepcontent(&self) -> Result<Vec<CadencePoint>, serde_json::Error> {
        let pairs: Vec<(u32, f64)> = serde_json::from_str(&self.stepcontent)?;
        Ok(pairs
            .into_iter()
            .map(|(steps, elapsed_s)| CadencePoint { steps, elapsed_s })
            .collect())
    }

    pub fn decode_time_distance(&self) -> Result<Vec<u32>, serde_json::Error> {
        serde_json::from_str(&self.time_distance)
    }

    /// Split nodes, `None` for the empty marker.
    pub fn decode_nodetime(&self) -> Result<Option<Vec<SplitNode>>, serde_json::Error> {
        if self.nodetime.is_empty() {
            return Ok(None);
        }
        let rows: Vec<(u32, u32, i64, i64, usize)> = from_dash_joined(&self.nodetime)?;
        Ok(Some(
            rows.into_iter()
                .map(|(threshold_m, elapsed_s, lat, lon, sample_count)| SplitNode {
                    threshold_m,
                    elapsed_s,
                    position: Coordinate::from_micro_degrees([lat, lon]),
                    sample_count,
                })
                .collect(),
        ))
    }
}

/// `[43.0,42.87,...]`
pub fn encode_altitude(elevation: &[f64]) -> Result<String, serde_json::Error> {
    to_compact(elevation)
}

/// `[lat_e6,lon_e6]-[lat_e6,lon_e6]-...`
pub fn encode_content(positions: &[Coordinate]) -> Result<String, serde_json::Error> {
    let pairs: Vec<[i64; 2]> = positions.iter().map(|p| p.to_micro_degrees()).collect();
    to_dash_joined(&pairs)
}

/// `[[steps,seconds],...]`
pub fn encode_stepcontent(cadence: &[CadencePoint]) -> Result<String, serde_json::Error> {
    let pairs: Vec<(u32, f64)> = cadence.iter().map(|c| (c.steps, c.elapsed_s)).collect();
    to_compact(&pairs)
}

/// `[14,27,41,...]`
pub fn encode_time_distance(distance_m: &[u32]) -> Result<String, serde_json::Error> {
    to_compact(distance_m)
}

/// `[meter,second,lat_e6,lon_e6,samples]-...`, or `""` when there are no nodes.
pub fn encode_nodetime(nodes: Option<&[SplitNode]>) -> Result<String, serde_json::Error> {
    match nodes {
        None => Ok(String::new()),
        Some(nodes) => {
            let rows: Vec<(u32, u32, i64, i64, usize)> = nodes
                .iter()
                .map(|n| {
                    let [lat, lon] = n.position.to_micro_degrees();
                    (n.threshold_m, n.elapsed_s, lat, lon, n.sample_count)
                })
                .collect();
            to_dash_joined(&rows)
        }
    }
}
