//=========================================================================
// rhythm-platformer
//
// Loads a level and plays it in a window.
//
//=========================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use rhythm_platformer::prelude::*;

/// Level bundled into the binary, used when `--level` is not given.
const DEFAULT_LEVEL: &str = include_str!("../levels/default.json");

#[derive(Parser, Debug)]
#[command(author, version, about = "Beat-synchronized 3D platformer")]
struct Args {
    /// Level description (JSON). Defaults to the bundled level.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Logic ticks per second.
    #[arg(long, default_value_t = 60.0)]
    tps: f64,

    /// Sample rate of the music clock, in Hz.
    #[arg(long, default_value_t = 48_000)]
    sample_rate: u32,

    /// Length of the looping track, in seconds.
    #[arg(long, default_value_t = 64.0)]
    track_seconds: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    anyhow::ensure!(args.tps > 0.0, "--tps must be positive");
    anyhow::ensure!(
        args.track_seconds.is_finite() && args.track_seconds >= 0.0,
        "--track-seconds must be a non-negative number"
    );

    let level = match &args.level {
        Some(path) => LevelDescription::from_path(path)
            .with_context(|| format!("loading level {}", path.display()))?,
        None => LevelDescription::from_json(DEFAULT_LEVEL).context("parsing bundled level")?,
    };

    let collaborators = Collaborators::new(
        ClockedLoop::start(args.sample_rate, Duration::from_secs_f64(args.track_seconds)),
        SilentListener::default(),
    );
    let mode = PlayMode::new(&level, collaborators).context("binding level")?;
    info!("Level ready, starting engine");

    EngineBuilder::new().with_tps(args.tps).build(mode).run()?;
    Ok(())
}
