//! CLI entry point for the relative grading calculator.
//!
//! Reads a roster of raw scores, prints class statistics and the letter-grade
//! breakpoint table, and optionally appends a summary row to a CSV log.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use relative_grader::{
    config::ThresholdConfig,
    grading::compute,
    output::{ReportRecord, append_record, print_pretty, render_table, render_text, to_json},
};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "relative_grader")]
#[command(about = "Relative (bell-curve) grade breakpoint calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute class statistics and letter-grade breakpoints for a roster
    Compute {
        /// Roster file with one score per line; reads stdin when omitted or "-"
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// JSON file with pass_grade, pass_final_grade and res_threshold
        #[arg(short, long)]
        config: Option<String>,

        /// Minimum score to pass
        #[arg(short, long)]
        pass_grade: Option<f64>,

        /// Minimum final exam score to pass (reported only)
        #[arg(long)]
        pass_final_grade: Option<f64>,

        /// Scores below this are left out of the mean and standard deviation
        #[arg(short, long)]
        res_threshold: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Optional: CSV file to append a summary row to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the T-score normalization table
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/relative_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("relative_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute {
            source,
            config,
            pass_grade,
            pass_final_grade,
            res_threshold,
            format,
            output,
        } => {
            let thresholds = match config {
                Some(path) => ThresholdConfig::load(&path)?,
                None => ThresholdConfig::default(),
            }
            .with_env()?
            .with_overrides(pass_grade, pass_final_grade, res_threshold);

            let source = source.unwrap_or_else(|| "-".to_string());
            let roster = read_roster(&source)?;

            let computation = match compute(&roster, &thresholds) {
                Ok(c) => c,
                Err(e) => {
                    error!(error = %e, source = %source, "Grading failed");
                    return Err(e).context("could not compute grade breakpoints");
                }
            };
            print_pretty(&computation);

            match format {
                Format::Text => print!("{}", render_text(&computation, &thresholds)),
                Format::Json => println!("{}", to_json(&computation)?),
            }

            if let Some(path) = output {
                let label = if source == "-" { "stdin" } else { source.as_str() };
                let record =
                    ReportRecord::from_computation(&computation, &thresholds).with_source(label);
                append_record(&path, &record)
                    .with_context(|| format!("failed to append report to '{path}'"))?;
                info!(path = %path, "Report row appended");
            }
        }
        Commands::Table => {
            print!("{}", render_table());
        }
    }

    Ok(())
}

/// Loads roster text from a file path, or from stdin for `-`.
#[tracing::instrument]
fn read_roster(source: &str) -> Result<String> {
    let roster = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read roster from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("failed to read roster '{source}'"))?
    };
    Ok(roster)
}
