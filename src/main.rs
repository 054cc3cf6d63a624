//! Star Strike headless runner
//!
//! Plays a seeded game with the autopilot through the fixed-step clock and
//! reports the result. Rendering and audio front ends drive the same `tick`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use star_strike::highscores::HighScoreEntry;
use star_strike::sim::{SimClock, WorldState, tick};
use star_strike::{Autopilot, HighScores, Tuning};

#[derive(Parser, Debug)]
#[command(name = "star-strike")]
#[command(about = "Run a seeded Star Strike game headless with the autopilot")]
struct Cli {
    /// RNG seed for the run
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many simulated seconds (if still alive)
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,
    /// Simulated frame rate (at least the tuning's deceleration, 20 by default)
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON leaderboard to record the final score in
    #[arg(long)]
    highscores: Option<PathBuf>,
    /// Print the final world snapshot as JSON
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !(cli.seconds.is_finite() && cli.seconds > 0.0) {
        return Err(anyhow!("--seconds must be > 0"));
    }

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };

    let min_fps = tuning.min_stable_fps();
    if cli.fps < min_fps {
        return Err(anyhow!("--fps must be at least {min_fps} for this tuning"));
    }

    log::info!("Star Strike (headless) starting, seed {}", cli.seed);
    let mut world = WorldState::with_tuning(cli.seed, tuning).context("invalid tuning")?;
    world.start_game();

    let pilot = Autopilot::default();
    let mut clock = SimClock::new(1.0 / cli.fps as f32);
    let mut sounds: BTreeMap<&'static str, u32> = BTreeMap::new();

    while world.is_running() && clock.elapsed() < cli.seconds {
        let input = pilot.input(&world);
        for event in tick(&mut world, &input, clock.tick()) {
            *sounds.entry(event.as_str()).or_default() += 1;
        }
    }

    let survived = clock.elapsed();
    let score = world.score.floor() as u64;
    log::info!(
        "Run finished after {survived:.1}s: score {score}, lives {}, phase {:?}",
        world.lives,
        world.phase()
    );
    println!("seed:     {}", cli.seed);
    println!("survived: {survived:.1}s");
    println!("score:    {score}");
    println!("lives:    {}", world.lives);
    for (name, count) in &sounds {
        println!("{name:<9} {count}");
    }

    if let Some(path) = &cli.highscores {
        let mut board = HighScores::load_or_default(path);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        match board.potential_rank(score) {
            Some(rank) => {
                println!("new high score! rank #{rank}");
                board.add(HighScoreEntry {
                    score,
                    survived,
                    seed: cli.seed,
                    timestamp,
                });
                board
                    .save(path)
                    .with_context(|| format!("failed to save high scores to {}", path.display()))?;
            }
            None => println!("no high score this time"),
        }
    }

    if cli.snapshot {
        let json = serde_json::to_string_pretty(&world).context("failed to serialize snapshot")?;
        println!("{json}");
    }

    Ok(())
}
