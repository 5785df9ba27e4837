//! Reference loop geometry.

use std::path::Path;

use crate::errors::AssetError;
use crate::models::Coordinate;

const JOYRUN_LOOP: &str = include_str!("../../data/joyrun.json");
const PKURUNNER_LOOP: &str = include_str!("../../data/pkurunner.json");

/// One lap of a reference loop as an ordered, read-only list of coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTrack {
    name: String,
    points: Vec<Coordinate>,
}

impl LoopTrack {
    /// Loads a built-in loop track by name (`joyrun` or `pkurunner`).
    pub fn builtin(name: &str) -> Result<Self, AssetError> {
        let data = match name {
            "joyrun" => JOYRUN_LOOP,
            "pkurunner" => PKURUNNER_LOOP,
            other => return Err(AssetError::UnknownAsset(other.to_string())),
        };
        Self::from_json_str(name, data)
    }

    /// Parses a JSON array of `[lat, lon]` pairs.
    pub fn from_json_str(name: impl Into<String>, data: &str) -> Result<Self, AssetError> {
        let pairs: Vec<[f64; 2]> = serde_json::from_str(data)?;
        let points = pairs
            .into_iter()
            .map(|[lat, lon]| Coordinate::new(lat, lon))
            .collect();
        Self::from_points(name, points)
    }

    /// Loads a JSON loop track from disk. The file stem becomes the track name.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_json_str(name, &data)
    }

    /// Builds a loop track from coordinates, rejecting degenerate geometry.
    pub fn from_points(
        name: impl Into<String>,
        points: Vec<Coordinate>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if points.len() < 2 {
            return Err(AssetError::Malformed(format!(
                "loop track '{name}' needs at least 2 points, found {}",
                points.len()
            )));
        }
        if let Some(bad) = points
            .iter()
            .position(|p| !(p.lat.is_finite() && p.lon.is_finite()))
        {
            return Err(AssetError::Malformed(format!(
                "loop track '{name}' has a non-finite coordinate at index {bad}"
            )));
        }
        if let Some(bad) = points
            .iter()
            .position(|p| p.lat.abs() > 90.0 || p.lon.abs() > 180.0)
        {
            return Err(AssetError::Malformed(format!(
                "loop track '{name}' has an out-of-range coordinate at index {bad}"
            )));
        }
        Ok(Self { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point visited at step `i` of a lap split into `steps` evenly spaced steps.
    ///
    /// `i` must be below `steps`.
    pub fn point_at_step(&self, i: usize, steps: usize) -> Coordinate {
        let idx = i * self.points.len() / steps.max(1);
        self.points[idx.min(self.points.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tracks_load() {
        for name in ["joyrun", "pkurunner"] {
            let track = LoopTrack::builtin(name).unwrap();
            assert_eq!(track.len(), 250);
            assert_eq!(track.name(), name);
        }
    }

    #[test]
    fn test_unknown_builtin() {
        let err = LoopTrack::builtin("strava").unwrap_err();
        assert!(matches!(err, AssetError::UnknownAsset(name) if name == "strava"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LoopTrack::from_json_str("bad", "[[39.9, 116.3], [39.9]]"),
            Err(AssetError::Json(_))
        ));
        assert!(matches!(
            LoopTrack::from_json_str("short", "[[39.9, 116.3]]"),
            Err(AssetError::Malformed(_))
        ));
        assert!(matches!(
            LoopTrack::from_json_str("range", "[[39.9, 116.3], [139.9, 116.3]]"),
            Err(AssetError::Malformed(_))
        ));
    }

    #[test]
    fn test_point_at_step_covers_lap() {
        let track = LoopTrack::builtin("joyrun").unwrap();
        // Fewer steps than points: steps skip ahead through the loop
        assert_eq!(track.point_at_step(0, 72), track.points()[0]);
        assert_eq!(track.point_at_step(71, 72), track.points()[71 * 250 / 72]);
        // More steps than points: points repeat
        assert_eq!(track.point_at_step(1, 500), track.points()[0]);
    }

    #[test]
    fn test_missing_file() {
        let err = LoopTrack::from_json_file("/nonexistent/loop.json").unwrap_err();
        assert!(matches!(err, AssetError::Io(_)));
    }
}
