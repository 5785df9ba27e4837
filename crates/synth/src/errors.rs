//! Error types for record synthesis.

use thiserror::Error;

/// Failure to obtain a loop track.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("No built-in loop track named '{0}'")]
    UnknownAsset(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Loop track JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GPX parse error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("Malformed loop track: {0}")]
    Malformed(String),
}

/// Errors raised while synthesizing a record.
///
/// Generation is all-or-nothing: every variant is raised before the first sample
/// is produced, so a caller never sees a partially built record.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Invalid generation parameter: {0}")]
    InvalidParams(String),

    #[error(
        "Pace {pace:.2} min/km needs {required} loop points per lap but the loop track has only {available}"
    )]
    LoopTrackTooCoarse {
        pace: f64,
        required: usize,
        available: usize,
    },

    #[error("Loop track error: {0}")]
    Asset(#[from] AssetError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Date formatting error: {0}")]
    DateFormat(#[from] time::error::Format),
}

impl SynthError {
    /// True for parameter combinations that can never produce a record.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SynthError::InvalidParams(_) | SynthError::LoopTrackTooCoarse { .. }
        )
    }
}
