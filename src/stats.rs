use serde::Serialize;
use tracing::debug;

use crate::config::ThresholdConfig;
use crate::error::ComputeError;
use crate::grading::utility::{mean, population_std_dev, round2};

/// Class-level statistics for one roster.
///
/// `average` and `std_dev` cover admitted scores only and are rounded to two
/// decimals. Excluded scores (below the RES threshold) always count as
/// failed; discarded tokens count nowhere except `discarded_count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassStats {
    pub average: f64,
    pub std_dev: f64,
    pub passed_count: usize,
    pub failed_count: usize,

    // pool breakdown
    pub admitted_count: usize,
    pub excluded_count: usize,
    pub discarded_count: usize,
}

impl ClassStats {
    /// Builds statistics from already-validated scores.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::EmptyAdmittedPool`] when no score reaches the
    /// RES threshold, and [`ComputeError::NonFiniteStatistic`] if the mean or
    /// standard deviation is not finite.
    pub fn from_scores(scores: &[f64], config: &ThresholdConfig) -> Result<Self, ComputeError> {
        let (admitted, excluded): (Vec<f64>, Vec<f64>) = scores
            .iter()
            .copied()
            .partition(|&score| score >= config.res_threshold);

        if admitted.is_empty() {
            return Err(ComputeError::EmptyAdmittedPool {
                excluded: excluded.len(),
                discarded: 0,
            });
        }

        let mut s = ClassStats {
            average: round2(mean(&admitted)),
            std_dev: round2(population_std_dev(&admitted)),
            admitted_count: admitted.len(),
            excluded_count: excluded.len(),
            ..Default::default()
        };

        if !s.average.is_finite() {
            return Err(ComputeError::NonFiniteStatistic { name: "average" });
        }
        if !s.std_dev.is_finite() {
            return Err(ComputeError::NonFiniteStatistic {
                name: "standard deviation",
            });
        }

        for &score in &admitted {
            if score < config.pass_grade {
                s.failed_count += 1;
            } else {
                s.passed_count += 1;
            }
        }
        s.failed_count += excluded.len();

        debug!(
            admitted = s.admitted_count,
            excluded = s.excluded_count,
            average = s.average,
            std_dev = s.std_dev,
            "Class statistics computed"
        );

        Ok(s)
    }

    /// Records how many roster lines the parser dropped.
    pub fn with_discarded(mut self, discarded: usize) -> Self {
        self.discarded_count = discarded;
        self
    }
}
