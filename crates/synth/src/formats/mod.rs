//! Destination-specific serialization of synthesized records.
//!
//! Pure formatting: no randomness and no business logic. Field names and encodings
//! follow what each destination parses.

pub mod joyrun;
pub mod pkurunner;

pub use joyrun::JoyrunPayload;
pub use pkurunner::PkuRunnerPayload;
