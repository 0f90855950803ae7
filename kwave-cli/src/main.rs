//! K-Wave CLI: long-cycle phase analysis of monthly price files.
//!
//! Commands:
//! - `analyze` - classify the latest cycle phase and score it
//! - `synthetic` - write a synthetic long-cycle series as CSV
//! - `config` - print the default analysis config as TOML

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

use kwave_core::data::{load_csv, write_csv, CsvOptions, SyntheticParams};
use kwave_core::{analyze, AnalysisConfig, AnalysisReport};

#[derive(Parser)]
#[command(
    name = "kwave",
    about = "K-Wave long-cycle trend extraction and phase scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more CSV price files.
    Analyze {
        /// CSV files with a date column and a price column.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Path to a TOML analysis config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// External resonance score to blend with the phase score.
        #[arg(long, allow_hyphen_values = true)]
        base_score: Option<f64>,

        /// Blend weight in [0, 1]; overrides the config.
        #[arg(long)]
        weight: Option<f64>,

        /// Price column name. Defaults to close / adj_close / price.
        #[arg(long)]
        column: Option<String>,

        /// Collapse daily or weekly rows to month-end closes.
        #[arg(long, default_value_t = false)]
        resample: bool,

        /// Emit reports as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a synthetic monthly series with a known long cycle.
    Synthetic {
        /// Number of monthly points.
        #[arg(long, default_value_t = 600)]
        months: usize,

        /// First month (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Half-width of uniform log-price noise.
        #[arg(long, default_value_t = 0.0)]
        noise: f64,

        /// RNG seed for the noise.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the default analysis config as TOML.
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            config,
            base_score,
            weight,
            column,
            resample,
            json,
        } => {
            let config = load_config(config.as_deref(), weight)?;
            let opts = CsvOptions {
                price_column: column,
                resample_monthly: resample,
            };
            run_analyze(&files, &config, &opts, base_score, json)
        }
        Commands::Synthetic {
            months,
            start,
            noise,
            seed,
            output,
        } => run_synthetic(months, start.as_deref(), noise, seed, output.as_deref()),
        Commands::Config => {
            print!("{}", AnalysisConfig::default().to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, weight: Option<f64>) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(p) => AnalysisConfig::from_file(p)
            .with_context(|| format!("loading config {}", p.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(w) = weight {
        config.resonance.weight = w;
        config.validate()?;
    }
    Ok(config)
}

fn run_analyze(
    files: &[PathBuf],
    config: &AnalysisConfig,
    opts: &CsvOptions,
    base_score: Option<f64>,
    json: bool,
) -> Result<()> {
    let results: Vec<(String, Result<AnalysisReport>)> = files
        .par_iter()
        .map(|path| {
            let source = path.display().to_string();
            let report = analyze_file(path, &source, config, opts, base_score);
            (source, report)
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (source, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("Error for {source}: {e:#}");
                failures += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report.summary());
            println!();
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", files.len());
    }
    Ok(())
}

fn analyze_file(
    path: &Path,
    source: &str,
    config: &AnalysisConfig,
    opts: &CsvOptions,
    base_score: Option<f64>,
) -> Result<AnalysisReport> {
    let series = load_csv(path, opts).with_context(|| format!("reading {source}"))?;
    let report = analyze(source, &series, config, base_score)?;
    log::info!(
        "{source}: {} via {} -> {}",
        report.months,
        report.method,
        report.phase
    );
    Ok(report)
}

fn run_synthetic(
    months: usize,
    start: Option<&str>,
    noise: f64,
    seed: u64,
    output: Option<&Path>,
) -> Result<()> {
    let mut params = SyntheticParams {
        months,
        noise,
        seed,
        ..Default::default()
    };
    if let Some(s) = start {
        params.start = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --start date: {s}"))?;
    }
    if months == 0 {
        bail!("--months must be at least 1");
    }
    let series = params.generate()?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_csv(file, &series)?;
            eprintln!("Wrote {} months to {}", series.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_csv(&mut lock, &series)?;
            lock.flush()?;
        }
    }
    Ok(())
}
