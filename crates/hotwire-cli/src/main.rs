//! hotwire CLI - XYUV G-code generator for 4-axis hot-wire foam cutters
//!
//! Lists profile anchors, writes starter job files and turns a job into a
//! G-code program.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::path::{Path, PathBuf};

use hotwire_gcode::generate_gcode;
use hotwire_math::Tolerance;

mod config;

use config::{load_profile, oriented_anchors, JobConfig};

#[derive(Parser)]
#[command(name = "hotwire")]
#[command(about = "XYUV G-code generator for 4-axis hot-wire foam cutters", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the anchors of a profile with their indices
    Anchors {
        /// Profile SVG file
        svg: PathBuf,
        /// List anchors in reversed traversal order
        #[arg(long)]
        reverse: bool,
        /// Vertex matching distance (0 = exact)
        #[arg(long, default_value_t = 0.0)]
        tolerance: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Generate G-code for a job file
    Generate {
        /// Job file (.toml)
        job: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Resampling step in mm (overrides the job file)
        #[arg(long)]
        step: Option<f64>,
        /// Feedrate (overrides the job file)
        #[arg(long)]
        feedrate: Option<f64>,
    },
    /// Write a job file populated with defaults
    Init {
        /// Job file to create
        job: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct AnchorEntry {
    index: usize,
    x: f64,
    y: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Anchors {
            svg,
            reverse,
            tolerance,
            json,
        } => list_anchors(&svg, reverse, tolerance, json),
        Commands::Generate {
            job,
            output,
            step,
            feedrate,
        } => generate(&job, output.as_deref(), step, feedrate),
        Commands::Init { job, force } => init_job(&job, force),
    }
}

fn list_anchors(svg: &Path, reverse: bool, tolerance: f64, json: bool) -> Result<()> {
    let tol = Tolerance::within(tolerance);
    let contour = load_profile(svg, tol)?;
    let anchors = oriented_anchors(&contour, reverse, tol);

    if json {
        let entries: Vec<AnchorEntry> = anchors
            .iter()
            .enumerate()
            .map(|(index, p)| AnchorEntry {
                index,
                x: p.x,
                y: p.y,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{:>5}  {:>12}  {:>12}", "index", "x", "y");
        for (i, p) in anchors.iter().enumerate() {
            println!("{:>5}  {:>12.4}  {:>12.4}", i, p.x, p.y);
        }
    }
    Ok(())
}

fn generate(
    job_path: &Path,
    output: Option<&Path>,
    step: Option<f64>,
    feedrate: Option<f64>,
) -> Result<()> {
    let mut job = JobConfig::load(job_path)?;
    if let Some(step) = step {
        job.cut.step = step;
    }
    if let Some(feedrate) = feedrate {
        job.gcode.feedrate = feedrate;
    }

    let base_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
    let (front, back) = job.load_profiles(base_dir)?;
    let plan = job.plan(front, back)?;
    let gcode = generate_gcode(&plan.tool, &job.gcode).context("cannot generate G-code")?;

    let stats = &plan.stats;
    log::info!(
        "{} positions, {} waypoints, XY travel {:.1} mm, UV travel {:.1} mm",
        stats.point_count,
        stats.waypoint_count,
        stats.xy_travel,
        stats.uv_travel
    );
    log::info!(
        "Estimated cut time at F{}: {:.1}",
        job.gcode.feedrate,
        stats.estimated_duration(job.gcode.feedrate)
    );

    match output {
        Some(path) => {
            std::fs::write(path, &gcode)
                .with_context(|| format!("cannot write {}", path.display()))?;
            log::info!("G-code written to {}", path.display());
        }
        None => print!("{}", gcode),
    }
    Ok(())
}

fn init_job(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    JobConfig::example().save(path)
}
