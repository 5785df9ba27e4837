//! GPX import of loop tracks and export of synthesized traces.

use std::path::Path;

use gpx::{Gpx, read};

use super::LoopTrack;
use crate::errors::AssetError;
use crate::models::{Coordinate, TracePoint};

/// Reads loop tracks from GPX files and writes synthesized traces back out.
pub struct GpxLoader;

impl GpxLoader {
    /// Loads a loop track from a GPX file.
    ///
    /// All points of all tracks and segments are flattened, in file order, into one lap.
    pub fn load_file(path: impl AsRef<Path>) -> Result<LoopTrack, AssetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let gpx: Gpx = read(reader)?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::extract_track(name, &gpx)
    }

    /// Loads a loop track from GPX data in memory.
    pub fn load_bytes(name: impl Into<String>, data: &[u8]) -> Result<LoopTrack, AssetError> {
        let reader = std::io::Cursor::new(data);
        let gpx: Gpx = read(reader)?;

        Self::extract_track(name.into(), &gpx)
    }

    fn extract_track(name: String, gpx: &Gpx) -> Result<LoopTrack, AssetError> {
        if gpx.tracks.is_empty() {
            return Err(AssetError::Malformed(format!(
                "GPX file '{name}' has no tracks"
            )));
        }

        let points: Vec<Coordinate> = gpx
            .tracks
            .iter()
            .flat_map(|track| &track.segments)
            .flat_map(|segment| &segment.points)
            .map(|waypoint| {
                let point = waypoint.point();
                Coordinate::new(point.y(), point.x())
            })
            .collect();

        LoopTrack::from_points(name, points)
    }

    /// Writes trace points to a GPX 1.1 file for viewing in other tools.
    pub fn write_file(
        path: impl AsRef<Path>,
        points: &[TracePoint],
        name: Option<&str>,
    ) -> Result<(), AssetError> {
        use geo::Point;
        use gpx::{GpxVersion, Track, TrackSegment, Waypoint};

        let waypoints: Vec<Waypoint> = points
            .iter()
            .map(|p| {
                let mut wp = Waypoint::new(Point::new(p.position.lon, p.position.lat));
                wp.elevation = p.elevation;
                wp.time = p.timestamp.map(gpx::Time::from);
                wp
            })
            .collect();

        let segment = TrackSegment { points: waypoints };
        let mut track = Track::new();
        track.name = name.map(String::from);
        track.segments = vec![segment];

        let gpx = Gpx {
            version: GpxVersion::Gpx11,
            tracks: vec![track],
            ..Default::default()
        };

        let file = std::fs::File::create(path)?;
        gpx::write(&gpx, file)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn test_round_trip() {
        let now = OffsetDateTime::from_unix_timestamp(1_538_035_490).unwrap();
        let points = vec![
            TracePoint {
                position: Coordinate::new(39.9862, 116.3071),
                elevation: Some(43.0),
                timestamp: Some(now),
            },
            TracePoint {
                position: Coordinate::new(39.9866, 116.3072),
                elevation: Some(42.8),
                timestamp: Some(now + time::Duration::seconds(5)),
            },
            TracePoint {
                position: Coordinate::new(39.9869, 116.3069),
                elevation: None,
                timestamp: None,
            },
        ];

        let temp_path = std::env::temp_dir().join("pace_synth_round_trip.gpx");
        GpxLoader::write_file(&temp_path, &points, Some("Loop")).unwrap();

        let loaded = GpxLoader::load_file(&temp_path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.name(), "pace_synth_round_trip");
        assert!((loaded.points()[1].lat - 39.9866).abs() < 1e-9);
        assert!((loaded.points()[1].lon - 116.3072).abs() < 1e-9);

        std::fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_single_point_gpx_is_malformed() {
        let data = br#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg><trkpt lat="39.98" lon="116.30"></trkpt></trkseg></trk>
</gpx>"#;
        let err = GpxLoader::load_bytes("one", data).unwrap_err();
        assert!(matches!(err, AssetError::Malformed(_)));
    }
}
