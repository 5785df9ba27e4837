//! Synthesis of GPS-tracked running records.
//!
//! From three targets (distance, pace and stride frequency) this crate builds a
//! complete running record: a position trace over a reference loop, an elevation
//! series, step cadence, cumulative distance and split nodes, all sampled in lockstep.
//! Records are then encoded in the exact text format of a destination service.
//! Uploading is left to the caller.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pace_synth::prelude::*;
//!
//! let track = LoopTrack::builtin("joyrun")?;
//! let builder = RecordBuilder::for_destination(Destination::Joyrun, 3.0, 6.0, 170)
//!     .with_seed(12345);
//! let record = builder.build_record(&track, &mut builder.rng())?;
//! let payload = JoyrunPayload::from_record(&record)?;
//! ```

pub mod builders;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod formats;
pub mod generators;
pub mod models;
pub mod sources;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{RecordBuilder, synthesize_record, synthesize_trace};
    pub use crate::config::{AltitudeBand, Destination, GenerationParams, SynthesisConfig};
    pub use crate::errors::{AssetError, SynthError};
    pub use crate::formats::{JoyrunPayload, PkuRunnerPayload};
    pub use crate::generators::{
        CadenceGenerator, DistanceGenerator, ElevationGenerator, FieldGenerator,
        PositionGenerator,
    };
    pub use crate::models::{
        CadencePoint, Coordinate, RunningRecord, SplitNode, TracePoint, TrackRecord,
    };
    pub use crate::sources::{GpxLoader, LoopTrack};
}
