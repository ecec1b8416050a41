//! segment-class - label connected spot segments of a dataset region
//!
//! ```text
//! segment-class segment --dataset sample.json --roi cell_roi --label cells
//! segment-class list-regions --dataset sample.json
//! ```

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;
use spotseg::io::{DatasetSession, DatasetSource, SpotList};
use spotseg::pipeline::{PipelineOptions, run, segment_region};
use spotseg::region::ConnectivityType;
use spotseg::{ROOT_REGION_NAME, short_name};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "segment-class")]
#[command(about = "Group the spots of a dataset region into spatially connected segments")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment a region and write the result as a new label.
    Segment(SegmentArgs),

    /// Print the short name of every region, one per line.
    ListRegions {
        /// Path to the dataset file.
        #[arg(long)]
        dataset: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct SegmentArgs {
    /// Path to the dataset file.
    #[arg(long)]
    dataset: PathBuf,

    /// Name of the region of interest (last segment of its path, or a path suffix).
    #[arg(long)]
    roi: String,

    /// Name of the label to write.
    #[arg(long)]
    label: String,

    /// flexImaging spot list to take pixel coordinates from.
    #[arg(long)]
    spot_list: Option<PathBuf>,

    /// Region whose spots are transformed together.
    #[arg(long, default_value = ROOT_REGION_NAME)]
    parent_region: String,

    /// Run the segmentation but do not write the label.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Segment(args) => run_segment(&args),
        Commands::ListRegions { dataset } => run_list_regions(&dataset),
    }
}

fn check_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{what} does not exist: {}", path.display());
    }
    Ok(())
}

// ── segment ───────────────────────────────────────────────────────────

fn run_segment(args: &SegmentArgs) -> Result<()> {
    check_exists(&args.dataset, "dataset file")?;
    if let Some(path) = &args.spot_list {
        check_exists(path, "spot list")?;
    }

    let spot_list = args
        .spot_list
        .as_ref()
        .map(|path| {
            SpotList::read_from_file(path)
                .with_context(|| format!("failed to read spot list {}", path.display()))
        })
        .transpose()?;

    let options = PipelineOptions {
        parent_region: args.parent_region.clone(),
        connectivity: ConnectivityType::EightWay,
    };

    let mut session = DatasetSession::open(&args.dataset)
        .with_context(|| format!("failed to open dataset {}", args.dataset.display()))?;

    let report = if args.dry_run {
        let report = segment_region(session.dataset()?, &args.roi, &options, spot_list.as_ref())
            .with_context(|| format!("failed to segment region '{}'", args.roi))?;
        info!("dry run: label '{}' not written", args.label);
        report
    } else {
        let (id, report) = run(
            session.dataset_mut()?,
            &args.roi,
            &args.label,
            &options,
            spot_list.as_ref(),
        )
        .with_context(|| format!("failed to segment region '{}'", args.roi))?;
        info!("label '{}' written with id {}", args.label, id);
        report
    };

    session.close().context("failed to close dataset")?;

    println!(
        "{}: {} segments, {} spots",
        report.region,
        report.segment_count(),
        report.spot_count()
    );
    Ok(())
}

// ── list-regions ──────────────────────────────────────────────────────

fn run_list_regions(dataset: &Path) -> Result<()> {
    check_exists(dataset, "dataset file")?;

    let mut session = DatasetSession::open(dataset)
        .with_context(|| format!("failed to open dataset {}", dataset.display()))?;
    for region in session.dataset()?.regions()? {
        println!("\"{}\"", short_name(&region.name));
    }
    session.close().context("failed to close dataset")?;
    Ok(())
}
