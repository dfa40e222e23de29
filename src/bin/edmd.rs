//! Command-line runner for the hard-disk simulation.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use edmd::config::{ScenarioConfig, SimulationConfig};
use edmd::core::{NullSink, ObstacleKind, SnapshotSink, Tee};
use edmd::output::{write_pressure_series, ObstacleTracker, SnapshotWriter};
use edmd::placement::build_simulation;
use env_logger::Env;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "edmd")]
#[command(about = "Event-driven hard-disk simulation in a circular arena")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and write its outputs
    Run(RunArgs),

    /// Print the default scenario as JSON
    Config,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Scenario file (JSON); flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of particles
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Particle radius
    #[arg(long)]
    radius: Option<f64>,

    /// Initial particle speed
    #[arg(long)]
    speed: Option<f64>,

    /// Obstacle behaviour
    #[arg(long, value_enum)]
    obstacle: Option<ObstacleArg>,

    /// Obstacle radius
    #[arg(long)]
    obstacle_radius: Option<f64>,

    /// Obstacle mass (movable obstacle only)
    #[arg(long)]
    obstacle_mass: Option<f64>,

    /// Arena diameter
    #[arg(short, long)]
    diameter: Option<f64>,

    /// Simulated time limit
    #[arg(short, long)]
    time: Option<f64>,

    /// RNG seed for the initial placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Trajectory output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pressure series output file
    #[arg(long)]
    pressure: Option<PathBuf>,

    /// Obstacle squared-displacement output file
    #[arg(long)]
    msd: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ObstacleArg {
    Static,
    Movable,
}

impl From<ObstacleArg> for ObstacleKind {
    fn from(arg: ObstacleArg) -> Self {
        match arg {
            ObstacleArg::Static => ObstacleKind::Static,
            ObstacleArg::Movable => ObstacleKind::Movable,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&ScenarioConfig::default())?);
            Ok(())
        }
    }
}

fn scenario_from_args(args: &RunArgs) -> anyhow::Result<ScenarioConfig> {
    let mut cfg = match &args.config {
        Some(path) => ScenarioConfig::from_json_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => ScenarioConfig::default(),
    };

    let mut sim: SimulationConfig = cfg.simulation.clone();
    if let Some(d) = args.diameter {
        sim = sim.with_arena_diameter(d);
    }
    if let Some(t) = args.time {
        sim = sim.with_time_limit(t);
    }
    cfg.simulation = sim;

    if let Some(n) = args.particles {
        cfg.num_particles = n;
    }
    if let Some(r) = args.radius {
        cfg.particle_radius = r;
    }
    if let Some(v) = args.speed {
        cfg.initial_speed = v;
    }
    if let Some(kind) = args.obstacle {
        cfg.obstacle_kind = kind.into();
    }
    if let Some(r) = args.obstacle_radius {
        cfg.obstacle_radius = r;
    }
    if let Some(m) = args.obstacle_mass {
        cfg.obstacle_mass = m;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = scenario_from_args(&args)?;
    let mut sim = build_simulation(&cfg).context("building initial configuration")?;

    let writer: Box<dyn SnapshotSink> = match &args.output {
        Some(path) => Box::new(
            SnapshotWriter::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(NullSink),
    };
    let mut tracker = ObstacleTracker::new();
    let mut sink = Tee(writer, &mut tracker);

    let started = std::time::Instant::now();
    let reason = sim.run(&mut sink)?;
    sink.flush()?;
    drop(sink);
    info!(
        "finished in {:.2}s wall time ({:?})",
        started.elapsed().as_secs_f64(),
        reason
    );

    if let Some(path) = &args.pressure {
        let mut out = BufWriter::new(File::create(path)?);
        write_pressure_series(&mut out, &sim.pressure_series())?;
        out.flush()?;
    }

    if let Some(path) = &args.msd {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "time msd")?;
        for (t, d) in tracker.times().iter().zip(tracker.squared_displacements()) {
            writeln!(out, "{t:.5} {d:.9}")?;
        }
        out.flush()?;
    }

    let s = sim.stats();
    println!("Simulated time:        {:.6}", sim.time());
    println!("Events processed:      {}", s.events_processed);
    println!("Particle-particle:     {}", s.particle_particle);
    println!("Wall:                  {}", s.wall);
    println!("Obstacle:              {}", s.obstacle);
    println!("Obstacle (distinct):   {}", s.obstacle_first_hits);
    println!("Stale discarded:       {}", s.stale_discarded);
    println!("Overlap corrections:   {}", s.corrections);
    println!("Temperature (mean KE): {:.6}", sim.temperature());
    Ok(())
}
