/// Command-line driver for one excavation planning cycle.
///
/// Inputs default to seeded synthetic terrain and samples; either can be
/// replaced with JSON files. Prints the ranked sites and optionally writes
/// the plan and per-sample reports as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use regolith_core::synth::{generate_samples, seeded_rng, simulate_terrain};
use regolith_core::{classify_samples, ElevationGrid, ExcavationPlanner, PlannerConfig, Sample};

#[derive(Parser, Debug)]
#[command(name = "regolith-plan", about = "Rank excavation sites from terrain and soil samples")]
struct Args {
    /// JSON planner config; command-line values override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metres per grid cell.
    #[arg(long)]
    resolution: Option<f64>,

    /// Area width in metres.
    #[arg(long)]
    area_width: Option<f64>,

    /// Area height in metres.
    #[arg(long)]
    area_height: Option<f64>,

    /// Slope below which a cell counts as flat.
    #[arg(long)]
    slope_threshold: Option<f64>,

    /// Number of excavation sites to return.
    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    /// Serialised ElevationGrid JSON; synthesised when absent.
    #[arg(short, long)]
    elevation: Option<PathBuf>,

    /// JSON array of samples; synthesised when absent.
    #[arg(short, long)]
    samples: Option<PathBuf>,

    /// Number of synthetic samples.
    #[arg(long, default_value_t = 10)]
    num_samples: usize,

    /// Seed for synthetic terrain and samples.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the plan as JSON here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write one sample_report_<id>.json per sample into this directory.
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

/// One site as handed to the manipulator.
#[derive(Debug, Serialize)]
struct PlannedSite {
    rank: usize,
    x_index: usize,
    y_index: usize,
    score: f64,
    x_m: f64,
    y_m: f64,
}

#[derive(Debug, Serialize)]
struct PlanFile<'a> {
    config: &'a PlannerConfig,
    samples: usize,
    dropped_samples: usize,
    sites: Vec<PlannedSite>,
}

/// Load the config file (if any) and apply command-line overrides.
fn resolve_config(args: &Args) -> Result<PlannerConfig> {
    let mut config = match &args.config {
        Some(path) => read_json::<PlannerConfig>(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(r) = args.resolution {
        config.resolution = r;
    }
    if let Some(w) = args.area_width {
        config.area_size.0 = w;
    }
    if let Some(h) = args.area_height {
        config.area_size.1 = h;
    }
    if let Some(t) = args.slope_threshold {
        config.slope_threshold = t;
    }
    if let Some(n) = args.top_n {
        config.top_n = n;
    }
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_reports(dir: &Path, samples: &[Sample]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    for sample in samples {
        let report = sample.report();
        let path = dir.join(report.file_name());
        fs::write(&path, report.to_json()?).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "sample report saved");
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let planner = ExcavationPlanner::new(config).context("invalid planner configuration")?;
    let config = planner.config();

    let elevation = match &args.elevation {
        Some(path) => read_json::<ElevationGrid>(path)?,
        None => simulate_terrain(config, args.seed),
    };
    info!(
        width = elevation.shape().0,
        height = elevation.shape().1,
        min = elevation.min_elevation(),
        max = elevation.max_elevation(),
        "terrain ready"
    );

    let mut samples = match &args.samples {
        Some(path) => read_json::<Vec<Sample>>(path)?,
        None => generate_samples(&mut seeded_rng(args.seed), elevation.shape(), args.num_samples),
    };
    let newly = classify_samples(&mut samples);
    if newly > 0 {
        debug!(count = newly, "classified samples from composition");
    }
    for sample in &samples {
        debug!("{}", sample.report());
    }
    if let Some(dir) = &args.reports_dir {
        write_reports(dir, &samples)?;
    }

    let outcome = planner.plan(&elevation, &samples)?;
    if outcome.sites.is_empty() {
        warn!("no cell has a positive priority; nothing to excavate");
    }

    let sites: Vec<PlannedSite> = outcome
        .sites
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (x_m, y_m) = s.physical_position(elevation.resolution);
            PlannedSite { rank: i + 1, x_index: s.x_index, y_index: s.y_index, score: s.score, x_m, y_m }
        })
        .collect();

    println!("Top excavation sites:");
    for site in &sites {
        println!(
            "  #{} cell ({}, {}) at ({:.2} m, {:.2} m), score {:.2}",
            site.rank, site.x_index, site.y_index, site.x_m, site.y_m, site.score
        );
    }

    if let Some(path) = &args.output {
        let plan = PlanFile {
            config,
            samples: samples.len(),
            dropped_samples: outcome.stats.dropped,
            sites,
        };
        fs::write(path, serde_json::to_string_pretty(&plan)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "plan saved");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let args = Args::parse_from(["regolith-plan", "--top-n", "3", "--area-width", "4"]);
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.area_size, (4.0, 10.0));
        assert_eq!(cfg.resolution, 0.05);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = Args::parse_from(["regolith-plan", "--config", "/nonexistent/planner.json"]);
        let err = resolve_config(&args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/planner.json"));
    }
}
