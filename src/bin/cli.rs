//! tracefix CLI - clean and segment raw GPS trace logs.
//!
//! Usage:
//!   tracefix-cli fix <input> [--output <file>] [--quiet]
//!   tracefix-cli convert <input> [--output <file>]
//!
//! `fix` splits each vehicle's trace into physically plausible segments and
//! writes them under fresh sequential ids; `convert` regroups an already
//! cleaned file into one polyline row per trajectory.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use tracefix::{
    convert, NoopProgress, Pipeline, PipelineContext, ProgressObserver, TerminalProgressBar,
    TraceFixError, TrajectoryReader, TrajectoryWriter,
};

#[derive(Parser)]
#[command(name = "tracefix-cli")]
#[command(about = "Clean and segment raw GPS trace logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split each vehicle's trace into plausible segments
    Fix {
        /// Raw trace log (vehicle id;lat;lng;timestamp)
        input: PathBuf,

        /// Output file (default: fixed_<input> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress the progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Regroup a cleaned file into one polyline row per trajectory
    Convert {
        /// Cleaned file (driver_id;id;lat;lng;timestamp)
        input: PathBuf,

        /// Output file (default: converted_<input> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fix {
            input,
            output,
            quiet,
        } => run_fix(&input, output, quiet),
        Commands::Convert { input, output } => run_convert(&input, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Run the cleaning pipeline over one file.
fn run_fix(input: &Path, output: Option<PathBuf>, quiet: bool) -> tracefix::Result<()> {
    let output = output.unwrap_or_else(|| prefixed_name(input, "fixed_"));
    let total_points = count_records(input)?;

    info!("Fixing: {} => {}", input.display(), output.display());

    let infile = File::open(input).map_err(|e| TraceFixError::open(input, e))?;
    let outfile = File::create(&output).map_err(|e| TraceFixError::open(&output, e))?;

    let progress: Box<dyn ProgressObserver> = if quiet {
        Box::new(NoopProgress)
    } else {
        Box::new(TerminalProgressBar::new(total_points, 50))
    };

    let pipeline = Pipeline::new(
        TrajectoryReader::new(BufReader::new(infile)),
        TrajectoryWriter::new(BufWriter::new(outfile))?,
        PipelineContext::new(progress),
    );
    let summary = pipeline.run()?;

    info!(
        "{} trajectories in, {} segments out, {} points processed in {:.0}s",
        summary.trajectories_in,
        summary.segments_out,
        summary.points_processed,
        summary.elapsed_seconds
    );
    Ok(())
}

/// Run the polyline converter over one cleaned file.
fn run_convert(input: &Path, output: Option<PathBuf>) -> tracefix::Result<()> {
    let output = output.unwrap_or_else(|| prefixed_name(input, "converted_"));

    info!("Converting: {} => {}", input.display(), output.display());

    let infile = File::open(input).map_err(|e| TraceFixError::open(input, e))?;
    let outfile = File::create(&output).map_err(|e| TraceFixError::open(&output, e))?;

    let rows = convert::convert(BufReader::new(infile), BufWriter::new(outfile))?;
    info!("Wrote {} polyline rows", rows);
    Ok(())
}

/// `prefix` + file name, placed next to the input.
fn prefixed_name(input: &Path, prefix: &str) -> PathBuf {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("out");
    input.with_file_name(format!("{}{}", prefix, name))
}

/// Data records in the file: line count minus the header.
fn count_records(path: &Path) -> tracefix::Result<u64> {
    let file = File::open(path).map_err(|e| TraceFixError::open(path, e))?;
    let lines = BufReader::new(file).lines().count() as u64;
    Ok(lines.saturating_sub(1))
}
