//! Threshold configuration for a grading run.
//!
//! Values are layered, lowest precedence first: built-in defaults, an
//! optional JSON file, then `PASS_GRADE` / `PASS_FINAL_GRADE` /
//! `RES_THRESHOLD` environment variables, then command-line flags through
//! [`ThresholdConfig::with_overrides`]. [`ThresholdConfig::validate`] runs
//! before computing.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ComputeError;

pub const DEFAULT_PASS_GRADE: f64 = 35.0;
pub const DEFAULT_PASS_FINAL_GRADE: f64 = 35.0;
pub const DEFAULT_RES_THRESHOLD: f64 = 20.0;

/// Caller-supplied limits, each expected in `[0, 100]`.
///
/// Stored as a JSON object on disk; missing keys fall back to the defaults:
/// ```json
/// {
///   "pass_grade": 40,
///   "res_threshold": 15
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Minimum admitted score counted as passed.
    pub pass_grade: f64,
    /// Minimum final-exam score. Reported only; the computation ignores it.
    pub pass_final_grade: f64,
    /// Scores below this never enter the mean/standard deviation pool.
    pub res_threshold: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            pass_grade: DEFAULT_PASS_GRADE,
            pass_final_grade: DEFAULT_PASS_FINAL_GRADE,
            res_threshold: DEFAULT_RES_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read threshold config '{path}'"))?;
        let config: ThresholdConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse threshold config '{path}'"))?;
        debug!(path, ?config, "Threshold config loaded");
        Ok(config)
    }

    /// Overrides fields from `PASS_GRADE`, `PASS_FINAL_GRADE` and
    /// `RES_THRESHOLD` when they are set.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    fn with_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let fields: [(&str, &mut f64); 3] = [
            ("PASS_GRADE", &mut self.pass_grade),
            ("PASS_FINAL_GRADE", &mut self.pass_final_grade),
            ("RES_THRESHOLD", &mut self.res_threshold),
        ];

        for (key, field) in fields {
            if let Some(raw) = lookup(key) {
                *field = raw
                    .trim()
                    .replace(',', ".")
                    .parse()
                    .with_context(|| format!("{key} is not a number: '{raw}'"))?;
                debug!(key, value = *field, "Threshold overridden from environment");
            }
        }

        Ok(self)
    }

    /// Applies explicitly given values (command-line flags) on top of the
    /// current ones.
    pub fn with_overrides(
        mut self,
        pass_grade: Option<f64>,
        pass_final_grade: Option<f64>,
        res_threshold: Option<f64>,
    ) -> Self {
        if let Some(v) = pass_grade {
            self.pass_grade = v;
        }
        if let Some(v) = pass_final_grade {
            self.pass_final_grade = v;
        }
        if let Some(v) = res_threshold {
            self.res_threshold = v;
        }
        self
    }

    /// Checks that every threshold lies in `[0, 100]`.
    pub fn validate(&self) -> Result<(), ComputeError> {
        let fields = [
            ("pass grade", self.pass_grade),
            ("pass final grade", self.pass_final_grade),
            ("RES threshold", self.res_threshold),
        ];

        for (field, value) in fields {
            // NaN fails the range check too
            if !(0.0..=100.0).contains(&value) {
                return Err(ComputeError::InvalidConfig { field, value });
            }
        }

        Ok(())
    }
}
