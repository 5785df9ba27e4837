//! Synthesizes one running record and prints its encoded upload fields.
//!
//! Run with:
//! ```
//! cargo run -p pace-synth --bin synth -- --distance 3.0 --pace 6.0 --stride 170
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use pace_synth::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "synth", about = "Synthesize a GPS-tracked running record")]
struct Args {
    /// Destination format: joyrun or pkurunner.
    #[arg(long, default_value = "joyrun")]
    destination: String,

    /// Target distance in kilometers.
    #[arg(long)]
    distance: f64,

    /// Target pace in minutes per kilometer.
    #[arg(long)]
    pace: f64,

    /// Target stride frequency in steps per minute.
    #[arg(long)]
    stride: u32,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the destination's synthesis tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Loop track to use instead of the built-in one (.json or .gpx).
    #[arg(long)]
    track: Option<PathBuf>,

    /// Also write the synthesized trace to this GPX file.
    #[arg(long)]
    gpx: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let destination: Destination = args.destination.parse()?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => destination.config(),
    };
    let track = match &args.track {
        Some(path) => load_track(path)?,
        None => LoopTrack::builtin(destination.asset_name())?,
    };
    tracing::info!(
        destination = %destination,
        track = track.name(),
        points = track.len(),
        "Loop track loaded"
    );

    let mut builder = RecordBuilder::for_destination(destination, args.distance, args.pace, args.stride)
        .with_config(config);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let mut rng = builder.rng();

    let (payload, trace) = match destination {
        Destination::Joyrun => {
            let record = builder.build_record(&track, &mut rng)?;
            let payload = serde_json::to_value(JoyrunPayload::from_record(&record)?)?;
            (payload, record.trace_points())
        }
        Destination::PkuRunner => {
            let trace = builder.build_trace(&track, &mut rng)?;
            let payload = serde_json::to_value(PkuRunnerPayload::from_trace(&trace)?)?;
            (payload, trace.trace_points())
        }
    };

    if let Some(path) = &args.gpx {
        GpxLoader::write_file(path, &trace, Some(track.name()))
            .with_context(|| format!("writing GPX to {}", path.display()))?;
        tracing::info!(path = %path.display(), points = trace.len(), "GPX written");
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<SynthesisConfig> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing config {}", path.display()))
}

fn load_track(path: &Path) -> anyhow::Result<LoopTrack> {
    let is_gpx = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"));
    let track = if is_gpx {
        GpxLoader::load_file(path)
    } else {
        LoopTrack::from_json_file(path)
    };
    track.with_context(|| format!("loading loop track {}", path.display()))
}
