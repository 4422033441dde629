use std::path::PathBuf;

use anyhow::Context as _;
use bouncelight::{
    PointCloud, Scene, SimulationSettings,
    geometry::{ConvexPolyhedron, WorldPoint},
    point_cloud::PointCloudSummary,
    simulate,
};
use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use log::LevelFilter;
use rand::{Rng, SeedableRng, rngs::SmallRng};

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Bounces light from a point light around a cube and saves the resulting point cloud.
#[derive(Parser)]
#[command(name = "bouncelight")]
struct Args {
    /// Light position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], default_values_t = [0.2, 0.4, 0.0])]
    light: Vec<f32>,

    /// Number of rays emitted in each batch
    #[arg(long, short = 'r', default_value_t = 5_000)]
    rays: usize,

    /// Number of bounces traced for each ray
    #[arg(long, short = 'b', default_value_t = 3)]
    bounces: usize,

    /// Fraction of alpha surviving a unit of distance
    #[arg(long, default_value_t = 0.25)]
    absorption: f32,

    /// Number of independent emission batches merged into the output
    #[arg(long, default_value_t = 1)]
    batches: usize,

    /// Seed for reproducible output, every batch gets its own seed derived from it
    #[arg(long)]
    seed: Option<u64>,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Additional convex colliders loaded from wavefront OBJ files
    #[arg(long = "collider")]
    colliders: Vec<PathBuf>,

    /// Output PLY file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.clone().into())
        .parse_default_env()
        .init();

    let mut scene = Scene::reference();
    for path in &args.colliders {
        let collider = ConvexPolyhedron::from_obj(path)
            .with_context(|| format!("Loading collider {}", path.display()))?;
        scene.colliders.register(collider);
    }

    let bar = ProgressBar::new(args.batches as u64);
    let mut cloud = PointCloud::new();
    let mut summary = PointCloudSummary::default();
    let mut seeds = args.seed.map(SmallRng::seed_from_u64);
    for batch in 0..args.batches {
        let batch_seed = seeds.as_mut().map(|rng| rng.random::<u64>());
        let settings = SimulationSettings::builder()
            .light_position(WorldPoint::new(args.light[0], args.light[1], args.light[2]))
            .ray_count(args.rays)
            .bounce_count(args.bounces)
            .air_absorption_per_unit(args.absorption)
            .maybe_seed(batch_seed)
            .maybe_worker_count(args.workers)
            .build();

        let batch_cloud = simulate(&scene, &settings)?;
        let batch_summary = batch_cloud.summary();
        log::debug!("Emission {batch}: {batch_summary}");
        summary = summary.merge(&batch_summary);
        cloud.extend(batch_cloud);
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("{summary}");

    if let Some(output) = &args.output {
        cloud
            .save_ply(output)
            .with_context(|| format!("Writing {}", output.display()))?;
        log::info!("Saved point cloud to {}", output.display());
    }

    Ok(())
}
