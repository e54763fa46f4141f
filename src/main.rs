//! Pong Defense headless driver
//!
//! Runs the simulation at a fixed frame step and reports round results. A
//! windowed host feeds the same `Session` with real input events instead.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;

use pong_defense::sim::Side;
use pong_defense::settings::TrailQuality;
use pong_defense::{Session, Settings};

#[derive(Parser, Debug)]
#[command(about = "Run Pong Defense headless and report round results", version)]
struct Args {
    /// Settings file (JSON); missing files fall back to defaults
    #[arg(long, default_value = "pong-defense.json")]
    settings: PathBuf,
    /// Frames to simulate (overrides settings)
    #[arg(long)]
    frames: Option<u32>,
    /// RNG seed (overrides settings)
    #[arg(long)]
    seed: Option<u64>,
    /// Seconds per frame (overrides settings)
    #[arg(long)]
    dt: Option<f32>,
    /// Trail quality: low, medium or high (overrides settings)
    #[arg(long)]
    trail_quality: Option<String>,
    /// Let the AI play the left side too
    #[arg(long)]
    autopilot: bool,
    /// Print the final render snapshot as JSON
    #[arg(long)]
    dump_snapshot: bool,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(&args.settings);
    if let Some(frames) = args.frames {
        settings.frames = frames;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(dt) = args.dt {
        settings.frame_dt = dt;
    }
    if let Some(quality) = &args.trail_quality {
        settings.trail_quality =
            TrailQuality::parse(quality).ok_or_else(|| anyhow!("unknown trail quality '{quality}'"))?;
    }
    settings.left_autopilot |= args.autopilot;
    ensure!(
        settings.frame_dt.is_finite() && settings.frame_dt > 0.0,
        "frame step must be a positive finite number, got {}",
        settings.frame_dt
    );

    if args.save_settings {
        settings
            .save(&args.settings)
            .with_context(|| format!("writing {}", args.settings.display()))?;
    }

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let frames = settings.frames;
    let dt = settings.frame_dt;
    log::info!(
        "Pong Defense (headless) starting: {frames} frames at {dt}s, seed {seed}, trail quality {}",
        settings.trail_quality.as_str()
    );

    let mut session = Session::new(settings, seed);
    for _ in 0..frames {
        session.frame(dt);
    }

    let left_losses = session.results.iter().filter(|(s, _)| *s == Side::Left).count();
    let right_losses = session.results.len() - left_losses;
    log::info!(
        "Finished {} frames ({:.1}s): {} rounds, left lost {left_losses}, right lost {right_losses}",
        session.frame,
        session.frame as f32 * dt,
        session.results.len(),
    );
    let state = &session.state;
    log::info!(
        "Current round: left {}hp ${}, right {}hp ${}, {} buildings, {} bullets",
        state.left.health,
        state.left.money,
        state.right.health,
        state.right.money,
        state.buildings.len(),
        state.bullets.len(),
    );

    if args.dump_snapshot {
        let json = serde_json::to_string_pretty(&session.snapshot()).context("serializing snapshot")?;
        println!("{json}");
    }

    Ok(())
}
