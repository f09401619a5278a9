//! Headless entry point: plays one round on a level and logs the outcome.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use cookie_runner::{
    init_logging, spawn_level, LevelLayout, Runner, RunnerIntent, RunnerPlugin, RunnerTuning,
    ScoreBoard,
};
use log::info;

/// A side-scrolling runner simulated headlessly
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding the runner tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON level file; the built-in course is used when omitted
    #[arg(long)]
    level: Option<PathBuf>,
    /// Number of fixed steps to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Press jump every N steps
    #[arg(long)]
    jump_every: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.tuning {
        Some(path) => RunnerTuning::load(path).context("loading runner tuning")?,
        None => RunnerTuning::default(),
    };
    let layout = match &args.level {
        Some(path) => LevelLayout::load(path).context("loading level")?,
        None => LevelLayout::demo(),
    };

    let step = Duration::from_secs_f64(f64::from(tuning.fixed_timestep));
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(tuning.clone())
        .add_plugins(RunnerPlugin);
    let runner = spawn_level(app.world_mut(), &layout, &tuning);
    app.finish();
    app.cleanup();

    for tick in 1..=args.ticks {
        if args
            .jump_every
            .is_some_and(|every| every > 0 && tick % every == 0)
        {
            app.world_mut().write_message(RunnerIntent::JumpPressed);
        }
        app.update();

        let dead = app
            .world()
            .get::<Runner>(runner)
            .is_some_and(|r| r.state().is_dead());
        if dead {
            info!("round over after {tick} steps");
            break;
        }
    }

    let world = app.world();
    let score = world.resource::<ScoreBoard>().score();
    let position = world
        .get::<Transform>(runner)
        .map(|t| t.translation.truncate());
    let runner = world
        .get::<Runner>(runner)
        .context("runner entity disappeared")?;
    info!(
        "final state {:?}, health {}/{}, score {score}, position {position:?}",
        runner.state(),
        runner.health(),
        runner.max_health()
    );
    Ok(())
}
