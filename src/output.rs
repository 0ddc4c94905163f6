//! Output formatting and persistence for grading results.
//!
//! Supports pretty-printing, JSON serialization, a plain-text report, and
//! CSV append of a flattened summary row.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::grading::table::BRACKETS;
use crate::grading::types::{Computation, LetterGrade};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row summarizing a grading run.
#[derive(Debug, Default, Serialize)]
pub struct ReportRecord {
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,

    pub pass_grade: f64,
    pub pass_final_grade: f64,
    pub res_threshold: f64,

    pub average: f64,
    pub std_dev: f64,
    pub passed: usize,
    pub failed: usize,
    pub admitted: usize,
    pub excluded: usize,
    pub discarded: usize,
    pub bracket: usize,

    // breakpoints, FF is always 0 and omitted
    pub aa: f64,
    pub ba: f64,
    pub bb: f64,
    pub cb: f64,
    pub cc: f64,
    pub dc: f64,
    pub dd: f64,
    pub fd: f64,
}

impl ReportRecord {
    pub fn from_computation(computation: &Computation, config: &ThresholdConfig) -> Self {
        let stats = &computation.statistics;
        let at = |grade: LetterGrade| computation.breakpoint(grade).unwrap_or_default();

        ReportRecord {
            timestamp: Utc::now(),
            source: None,
            pass_grade: config.pass_grade,
            pass_final_grade: config.pass_final_grade,
            res_threshold: config.res_threshold,
            average: stats.average,
            std_dev: stats.std_dev,
            passed: stats.passed_count,
            failed: stats.failed_count,
            admitted: stats.admitted_count,
            excluded: stats.excluded_count,
            discarded: stats.discarded_count,
            bracket: computation.bracket,
            aa: at(LetterGrade::AA),
            ba: at(LetterGrade::BA),
            bb: at(LetterGrade::BB),
            cb: at(LetterGrade::CB),
            cc: at(LetterGrade::CC),
            dc: at(LetterGrade::DC),
            dd: at(LetterGrade::DD),
            fd: at(LetterGrade::FD),
        }
    }

    /// Set the roster source (file path or `stdin`).
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

/// Logs a computation using Rust's debug pretty-print format.
pub fn print_pretty(computation: &Computation) {
    debug!("{:#?}", computation);
}

/// Serializes a computation as pretty-printed JSON.
pub fn to_json(computation: &Computation) -> Result<String> {
    Ok(serde_json::to_string_pretty(computation)?)
}

/// Renders the statistics and breakpoint table as plain text.
pub fn render_text(computation: &Computation, config: &ThresholdConfig) -> String {
    let stats = &computation.statistics;
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "Average             {:.2}", stats.average);
    let _ = writeln!(out, "Standard deviation  {:.2}", stats.std_dev);
    let _ = writeln!(
        out,
        "Passed              {} (pass grade {})",
        stats.passed_count, config.pass_grade
    );
    let _ = writeln!(out, "Failed              {}", stats.failed_count);
    let _ = writeln!(
        out,
        "Below RES threshold {} (threshold {})",
        stats.excluded_count, config.res_threshold
    );
    if stats.discarded_count > 0 {
        let _ = writeln!(out, "Discarded entries   {}", stats.discarded_count);
    }
    let _ = writeln!(
        out,
        "Class level         {} (bracket {})",
        computation.bracket_label, computation.bracket
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Grade  Minimum");
    for b in &computation.breakpoints {
        let _ = writeln!(out, "{:<5}  >= {:.2}", b.letter_grade, b.minimum_score);
    }

    out
}

/// Renders the normalization table, one bracket per line.
pub fn render_table() -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<8}{:<16}", "Mean >=", "Class level");
    for grade in &LetterGrade::ORDER[..8] {
        let _ = write!(out, "{:>4}", grade);
    }
    let _ = writeln!(out);

    for bracket in &BRACKETS {
        let floor = if bracket.min_mean.is_finite() {
            format!("{:.1}", bracket.min_mean)
        } else {
            "-".to_string()
        };
        let _ = write!(out, "{:<8}{:<16}", floor, bracket.label);
        for t in &bracket.t_scores {
            let _ = write!(out, "{:>4}", t);
        }
        let _ = writeln!(out);
    }

    out
}

/// Appends a [`ReportRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, record: &ReportRecord) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
