//! Record assembly.
//!
//! - [`SampleScheduler`]: drives the field generators in lockstep and detects split nodes
//! - [`RecordAssembler`]: accumulates the series and computes totals
//! - [`RecordBuilder`]: fluent entry point for both record shapes

mod assembler;
mod record;
mod scheduler;
mod trace;

pub use assembler::{RecordAssembler, RecordTiming, Tick};
pub use record::{RecordBuilder, synthesize_record};
pub use scheduler::{FieldSet, SampleScheduler, SplitPlan, sample_count};
pub use trace::synthesize_trace;
