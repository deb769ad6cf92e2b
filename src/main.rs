//! Command line front end: renders XML diagram files to PNG images

use diagram_raster::batch::{self, Job};
use diagram_raster::{FontSource, RenderOptions, Renderer};

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use std::path::{Path, PathBuf};

/// Render diagram descriptions to PNG images
#[derive(Parser, Debug)]
#[command(name = "diagram-raster", version)]
struct Args {
    /// Diagram XML files, or directories searched for *.xml
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory for the images; next to each input if not given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Font file for labels
    #[arg(long, conflicts_with = "font_family")]
    font: Option<PathBuf>,

    /// Installed font family for labels
    #[arg(long)]
    font_family: Option<String>,

    /// Anti-alias edges
    #[arg(short, long)]
    antialias: bool,

    /// Stroke width in pixels for shapes without their own
    #[arg(long, default_value_t = 1.0)]
    stroke_width: f64,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 4)]
    jobs: usize,
}

/// Jobs for every diagram found under `inputs`
fn collect_jobs(inputs: &[PathBuf], out_dir: Option<&Path>) -> anyhow::Result<Vec<Job>> {
    let mut jobs = vec![];
    for input in inputs {
        let files = batch::collect_inputs(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        jobs.extend(files.into_iter().map(|f| Job::new(f, out_dir)));
    }
    Ok(jobs)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    let font = match (args.font, args.font_family) {
        (Some(path), _) => Some(FontSource::File(path)),
        (None, Some(family)) => Some(FontSource::System(family)),
        (None, None) => None,
    };
    let opts = RenderOptions { antialias: args.antialias, stroke_width: args.stroke_width, font };
    // Fail early on a bad font rather than once per file
    Renderer::new(opts.clone()).context("Failed to load font")?;

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let jobs = collect_jobs(&args.inputs, args.output.as_deref())?;

    let reports = batch::render_all(jobs, &opts, args.jobs);
    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    info!("{} rendered, {} failed", reports.len() - failed, failed);
    if failed > 0 {
        error!("{} of {} files failed", failed, reports.len());
        std::process::exit(1);
    }
    Ok(())
}
