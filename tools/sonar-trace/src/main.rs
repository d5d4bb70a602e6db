//! sonar-trace: headless sonar runner and synthetic level generator.
//!
//! Usage:
//!   sonar-trace run --ticks 120 --active --output view.json
//!   sonar-trace run --config sonar.toml --level level.json --sensor 0,0
//!   sonar-trace cave --seed 9 --output cave.json

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use glam::Vec2;

use sonar_core::commands::SonarCommand;
use sonar_core::config::SonarConfig;
use sonar_core::events::SonarEvent;
use sonar_core::types::{SensorContext, VesselId};
use sonar_geometry::{CaveParams, LevelGeometry, TerrainMap};
use sonar_sim::scenario;
use sonar_sim::{SensorStepper, SonarWorld};

#[derive(Parser)]
#[command(name = "sonar-trace", about = "Sonar ping simulation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Step a sensor for a number of ticks and write the final render view
    Run(RunArgs),
    /// Generate a synthetic cave level as JSON
    Cave(CaveArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Sensor config (TOML). Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level geometry (JSON). The built-in synthetic scenario is used when omitted.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Override the config's RNG seed
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 120)]
    ticks: u32,
    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 30.0)]
    dt: f32,
    /// Switch active sonar on before the first tick
    #[arg(long)]
    active: bool,
    /// Sensor position as `x,y` (only with --level)
    #[arg(long, value_parser = parse_vec2)]
    sensor: Option<Vec2>,
    /// Vessel carrying the sensor (only with --level)
    #[arg(long)]
    vessel: Option<u32>,
    /// Write the render view here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct CaveArgs {
    #[arg(long, default_value_t = 7)]
    seed: u64,
    #[arg(long, default_value_t = 48)]
    cols: u32,
    #[arg(long, default_value_t = 48)]
    rows: u32,
    #[arg(long, default_value_t = 500.0)]
    cell_size: f32,
    /// Initial rock probability
    #[arg(long, default_value_t = 0.45)]
    fill: f64,
    /// Level boundary height, if any
    #[arg(long)]
    boundary_y: Option<f32>,
    #[arg(long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    match Cli::parse().command {
        Command::Run(args) => cmd_run(args),
        Command::Cave(args) => cmd_cave(args),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SonarConfig::load(path)?,
        None => SonarConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if !(args.dt.is_finite() && args.dt >= 0.0) {
        bail!("--dt must be a non-negative number, got {}", args.dt);
    }

    let (world, sensor) = match &args.level {
        Some(path) => {
            let level = LevelGeometry::load(path)
                .with_context(|| format!("loading level {}", path.display()))?;
            let position = args.sensor.unwrap_or(Vec2::ZERO);
            let sensor = match args.vessel {
                Some(id) => SensorContext::aboard(position, VesselId(id)),
                None => SensorContext::at(position),
            };
            (SonarWorld::new(level), sensor)
        }
        None => {
            if args.sensor.is_some() || args.vessel.is_some() {
                log::warn!("--sensor and --vessel are ignored without --level");
            }
            let scenario = scenario::build_synthetic(config.seed)
                .context("building synthetic scenario")?;
            (scenario.world, scenario.sensor)
        }
    };

    let mut stepper = SensorStepper::new(config);
    if args.active {
        stepper.queue_command(SonarCommand::SetActive { active: true });
    }

    let mut inserted = 0;
    let mut expired = 0;
    for _ in 0..args.ticks {
        let report = stepper.tick(&sensor, &world, args.dt);
        inserted += report.inserted;
        expired += report.expired;
        for event in &report.events {
            if *event == SonarEvent::SweepRestarted {
                log::debug!("sweep restarted at t={:.2}s", stepper.time().elapsed_secs);
            }
        }
    }
    log::info!(
        "{} ticks: {inserted} blips inserted, {expired} expired, {} live",
        args.ticks,
        stepper.blips().len()
    );

    let json = serde_json::to_string_pretty(&stepper.render_view())?;
    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote render view to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_cave(args: CaveArgs) -> Result<()> {
    let params = CaveParams {
        seed: args.seed,
        cols: args.cols,
        rows: args.rows,
        cell_size: args.cell_size,
        fill: args.fill,
        ..CaveParams::default()
    };
    let terrain = TerrainMap::synthetic_cave(&params)?;
    let level = LevelGeometry {
        terrain: Some(terrain),
        boundary_y: args.boundary_y,
        ..LevelGeometry::default()
    };
    let json = serde_json::to_string(&level)?;
    fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("Wrote cave level to {}", args.output.display());
    Ok(())
}

fn parse_vec2(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Vec2::new(x, y))
}
