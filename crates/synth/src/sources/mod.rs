//! Loop-track sources.
//!
//! A [`LoopTrack`] is the fixed geometry every synthesized position is drawn from:
//! - built-in assets keyed by destination name ([`LoopTrack::builtin`])
//! - JSON files holding `[lat, lon]` pairs ([`LoopTrack::from_json_file`])
//! - GPX files ([`GpxLoader`]), which can also receive synthesized traces for inspection

mod gpx_files;
mod loop_track;

pub use gpx_files::GpxLoader;
pub use loop_track::LoopTrack;
