//! Headless Road Network Generator
//!
//! Generates a road network from a TOML config and optionally exports it as
//! JSON. With `--runs N` it surveys N consecutive seeds in parallel and
//! prints aggregate statistics instead.

use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;

use road_network_gen::core::{GenError, GeneratorConfig, Result};
use road_network_gen::roads::{GenerationReport, RoadNetworkGenerator};
use road_network_gen::world::{NetworkFile, SceneRecorder};

/// Procedural grid road network generator
#[derive(Parser, Debug)]
#[command(name = "road_gen")]
#[command(about = "Generate a grid road network with roadside decorations")]
struct Args {
    /// Generator config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long, short)]
    seed: Option<u64>,

    /// Override the target road cell count
    #[arg(long)]
    target: Option<u32>,

    /// Override the grid spacing
    #[arg(long)]
    spacing: Option<i32>,

    /// Override the branch chance
    #[arg(long)]
    branch_chance: Option<f32>,

    /// Override the decoration density
    #[arg(long)]
    density: Option<f32>,

    /// Write the generated network to this JSON file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Survey this many consecutive seeds instead of a single run
    #[arg(long)]
    runs: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(target) = args.target {
        config.target_road_count = target;
    }
    if let Some(spacing) = args.spacing {
        config.grid_spacing = spacing;
    }
    if let Some(chance) = args.branch_chance {
        config.branch_chance = chance;
    }
    if let Some(density) = args.density {
        config.decoration_density = density;
    }
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);

    match args.runs {
        Some(runs) => survey(&config, seed, runs),
        None => single(&config, seed, args.output),
    }
}

fn single(config: &GeneratorConfig, seed: u64, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Generating road network with seed {}", seed);

    let mut generator = RoadNetworkGenerator::new(config.clone(), SceneRecorder::new())?;
    let report = generator.generate_seeded(seed);
    print_report(&report);

    let overlapping = generator
        .decorations()
        .overlapping_candidates(generator.grid())
        .count();
    if overlapping > 0 {
        tracing::debug!("{} decoration candidates were dropped for overlapping roads", overlapping);
    }

    if let Some(path) = output {
        let file = NetworkFile::from_network(&generator.network(), config, Some(seed));
        file.save(&path)?;
        tracing::info!("Wrote network to {}", path.display());
    }

    Ok(())
}

fn survey(config: &GeneratorConfig, first_seed: u64, runs: u64) -> Result<()> {
    tracing::info!("Surveying {} seeds starting at {}", runs, first_seed);

    let reports = (0..runs)
        .into_par_iter()
        .map(|i| -> std::result::Result<GenerationReport, GenError> {
            let mut generator = RoadNetworkGenerator::new(config.clone(), SceneRecorder::new())?;
            Ok(generator.generate_seeded(first_seed.wrapping_add(i)))
        })
        .collect::<std::result::Result<Vec<_>, GenError>>()?;

    if reports.is_empty() {
        return Ok(());
    }

    let n = reports.len() as f32;
    let mean = |f: fn(&GenerationReport) -> usize| reports.iter().map(f).sum::<usize>() as f32 / n;
    let truncated = reports
        .iter()
        .filter(|r| r.placed < config.target_road_count as usize)
        .count();

    println!("Runs:                      {}", reports.len());
    println!("Mean cells placed:         {:.1}", mean(|r| r.placed));
    println!("Mean intersections:        {:.1}", mean(|r| r.intersections));
    println!("Mean decorations:          {:.1}", mean(|r| r.decorations_committed));
    println!("Mean rejected on road:     {:.1}", mean(|r| r.decorations_rejected_on_road));
    println!("Runs short of target:      {}", truncated);

    Ok(())
}

fn print_report(report: &GenerationReport) {
    println!("Road cells placed:         {}", report.placed);
    println!("Intersections:             {}", report.intersections);
    println!("Frontier entries processed: {}", report.frontier_processed);
    println!("Stale entries discarded:   {}", report.frontier_discarded);
    println!("Decoration candidates:     {}", report.decoration_candidates);
    println!("Decorations committed:     {}", report.decorations_committed);
    println!("  rejected (road overlap): {}", report.decorations_rejected_on_road);
    println!("  rejected (duplicate):    {}", report.decorations_rejected_duplicate);
}
