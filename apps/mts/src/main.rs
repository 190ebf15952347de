//! mts — run a train list through the single-track scheduler.
//!
//! ```text
//! mts trains.txt                      # log to ./output.txt, 100 ms per unit
//! mts trains.txt -o run.log --unit-ms 10 --report crossings.csv -vv
//! ```
//!
//! Exit status: 0 on success (including `--help`/`--version`), 1 on any
//! usage, input, runtime or output error.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};

use mts_core::SimConfig;
use mts_input::load_trains_file;
use mts_output::{CrossingReport, EventLog};
use mts_sim::SimBuilder;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "mts", version)]
#[command(about = "Simulate trains sharing a single main track", long_about = None)]
struct Cli {
    /// Train list: one `<e|E|w|W> <load> <cross>` line per train
    input: PathBuf,

    /// Event log path
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Wall-clock milliseconds per load/cross unit
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    unit_ms: u64,

    /// Also write a per-train CSV crossing report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Diagnostic verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run(cli: &Cli) -> Result<()> {
    let trains = load_trains_file(&cli.input)
        .with_context(|| format!("failed to load trains from {}", cli.input.display()))?;
    info!("loaded {} trains from {}", trains.len(), cli.input.display());

    let config = SimConfig::with_unit_ms(cli.unit_ms)?;
    let sim = SimBuilder::new(trains).config(config).build()?;

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let log = EventLog::new(BufWriter::new(file));
    let report = CrossingReport::new();

    let summary = sim.run(&(&log, &report)).context("simulation failed")?;
    if let Some(e) = log.take_error() {
        bail!("failed to write {}: {e}", cli.output.display());
    }
    info!(
        "{} crossings in {:?}; event log at {}",
        summary.dispatches.len(),
        summary.elapsed,
        cli.output.display()
    );

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }
    Ok(())
}

fn write_report(report: &CrossingReport, path: &Path) -> Result<()> {
    report
        .write_csv(path)
        .with_context(|| format!("failed to write crossing report {}", path.display()))?;
    info!("crossing report at {}", path.display());
    Ok(())
}
