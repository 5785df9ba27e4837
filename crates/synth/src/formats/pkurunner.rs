//! Upload fields of the 1 Hz trace.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::encoding::to_spaced;
use crate::errors::SynthError;
use crate::models::{Coordinate, TrackRecord};

/// Encoded trace fields. Scalars travel as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PkuRunnerPayload {
    pub duration: String,
    /// Finish time in UTC, `YYYY-MM-DDTHH:MM:SS.000Z`.
    pub date: String,
    /// `[[lat, lon], [lat, lon], ...]` with a space after each comma.
    pub detail: String,
    pub step: String,
}

impl PkuRunnerPayload {
    pub fn from_trace(trace: &TrackRecord) -> Result<Self, SynthError> {
        Ok(Self {
            duration: trace.duration_s.to_string(),
            date: format_date(trace.finished_at)?,
            detail: encode_detail(&trace.detail)?,
            step: trace.steps.to_string(),
        })
    }

    pub fn decode_detail(&self) -> Result<Vec<Coordinate>, serde_json::Error> {
        let pairs: Vec<[f64; 2]> = serde_json::from_str(&self.detail)?;
        Ok(pairs
            .into_iter()
            .map(|[lat, lon]| Coordinate::new(lat, lon))
            .collect())
    }
}

pub fn encode_detail(detail: &[Coordinate]) -> Result<String, serde_json::Error> {
    let pairs: Vec<[f64; 2]> = detail.iter().map(|p| [p.lat, p.lon]).collect();
    to_spaced(&pairs)
}

/// Formats an instant as UTC with a literal zero millisecond part.
pub fn format_date(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].000Z"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let at = OffsetDateTime::from_unix_timestamp(1_538_035_490).unwrap();
        assert_eq!(format_date(at).unwrap(), "2018-09-27T08:04:50.000Z");

        let shifted = at.to_offset(UtcOffset::from_hms(8, 0, 0).unwrap());
        assert_eq!(format_date(shifted).unwrap(), "2018-09-27T08:04:50.000Z");

        // Sub-second parts are dropped, single digit fields are padded
        let early = OffsetDateTime::from_unix_timestamp(1_000_000_000).unwrap()
            + time::Duration::milliseconds(999);
        assert_eq!(format_date(early).unwrap(), "2001-09-09T01:46:40.000Z");
    }

    #[test]
    fn test_detail_decodes_to_identical_floats() {
        let detail = vec![
            Coordinate::new(39.987195333515594, 116.31366973591832),
            Coordinate::new(39.98628650000001, 116.30714099999999),
            Coordinate::new(0.1 + 0.2, 116.31366973591831),
        ];
        let payload = PkuRunnerPayload {
            duration: "1".into(),
            date: String::new(),
            detail: encode_detail(&detail).unwrap(),
            step: "0".into(),
        };
        let decoded = payload.decode_detail().unwrap();
        for (a, b) in decoded.iter().zip(&detail) {
            assert_eq!(a.lat.to_bits(), b.lat.to_bits());
            assert_eq!(a.lon.to_bits(), b.lon.to_bits());
        }
    }

    #[test]
    fn test_detail_round_trip() {
        let detail = vec![
            Coordinate::new(39.988306377, 116.313742768),
            Coordinate::new(39.986839843, 116.312747404),
        ];
        let encoded = encode_detail(&detail).unwrap();
        assert_eq!(
            encoded,
            "[[39.988306377, 116.313742768], [39.986839843, 116.312747404]]"
        );

        let payload = PkuRunnerPayload {
            duration: "810".into(),
            date: "2018-09-27T08:04:50.000Z".into(),
            detail: encoded,
            step: "2295".into(),
        };
        assert_eq!(payload.decode_detail().unwrap(), detail);
    }
}
