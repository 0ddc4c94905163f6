use tracing::info;

use crate::config::ThresholdConfig;
use crate::error::ComputeError;
use crate::grading::breakpoints::breakpoints;
use crate::grading::table::{BRACKETS, select_bracket};
use crate::grading::types::Computation;
use crate::parser::{is_valid_score, parse_scores};
use crate::stats::ClassStats;

/// Runs the full pipeline over newline-separated roster text.
///
/// Validates `config`, parses the roster, computes class statistics, picks
/// the normalization bracket from the class mean and derives the breakpoint
/// table. Either the whole [`Computation`] is returned or a single error.
#[tracing::instrument(skip(raw_scores), fields(lines = raw_scores.lines().count()))]
pub fn compute(raw_scores: &str, config: &ThresholdConfig) -> Result<Computation, ComputeError> {
    config.validate()?;

    if raw_scores.trim().is_empty() {
        return Err(ComputeError::EmptyInput);
    }

    let parsed = parse_scores(raw_scores);
    compute_scores(&parsed.scores, parsed.discarded, config)
}

/// Same as [`compute`] for scores that are already parsed.
///
/// Scores failing [`is_valid_score`] are dropped and added to `discarded`,
/// the number of roster entries the caller already dropped. The total is
/// reported in the statistics and in [`ComputeError::EmptyAdmittedPool`].
pub fn compute_scores(
    scores: &[f64],
    discarded: usize,
    config: &ThresholdConfig,
) -> Result<Computation, ComputeError> {
    config.validate()?;

    let (valid, invalid): (Vec<f64>, Vec<f64>) =
        scores.iter().copied().partition(|&s| is_valid_score(s));
    let discarded = discarded + invalid.len();

    let statistics = match ClassStats::from_scores(&valid, config) {
        Ok(stats) => stats.with_discarded(discarded),
        Err(ComputeError::EmptyAdmittedPool { excluded, .. }) => {
            return Err(ComputeError::EmptyAdmittedPool {
                excluded,
                discarded,
            });
        }
        Err(e) => return Err(e),
    };

    let bracket = select_bracket(statistics.average);
    let breakpoints = breakpoints(&BRACKETS[bracket], statistics.average, statistics.std_dev);

    if breakpoints.iter().any(|b| !b.minimum_score.is_finite()) {
        return Err(ComputeError::NonFiniteStatistic { name: "breakpoint" });
    }

    info!(
        average = statistics.average,
        std_dev = statistics.std_dev,
        passed = statistics.passed_count,
        failed = statistics.failed_count,
        discarded,
        bracket,
        "Breakpoints computed"
    );

    Ok(Computation {
        statistics,
        bracket,
        bracket_label: BRACKETS[bracket].label,
        breakpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::types::LetterGrade;

    #[test]
    fn test_compute_reference_roster() {
        let result = compute("90\n100\n70\n50\n10", &ThresholdConfig::default()).unwrap();

        assert_eq!(result.statistics.average, 77.5);
        assert_eq!(result.statistics.std_dev, 19.2);
        assert_eq!(result.statistics.passed_count, 4);
        assert_eq!(result.statistics.failed_count, 1);
        assert_eq!(result.bracket, 1);
        assert_eq!(result.bracket_label, "Very good");
        assert_eq!(result.breakpoint(LetterGrade::AA), Some(94.78));
        assert_eq!(result.breakpoint(LetterGrade::FF), Some(0.0));
    }

    #[test]
    fn test_compute_reports_discarded_lines() {
        let result = compute("90\n150\nn/a\n70", &ThresholdConfig::default()).unwrap();

        assert_eq!(result.statistics.admitted_count, 2);
        assert_eq!(result.statistics.discarded_count, 2);
        assert_eq!(
            result.statistics.passed_count + result.statistics.failed_count,
            2
        );
    }

    #[test]
    fn test_compute_empty_input() {
        assert_eq!(
            compute("", &ThresholdConfig::default()),
            Err(ComputeError::EmptyInput)
        );
        assert_eq!(
            compute(" \n\n", &ThresholdConfig::default()),
            Err(ComputeError::EmptyInput)
        );
    }

    #[test]
    fn test_compute_only_garbage() {
        assert_eq!(
            compute("abc\n0\n101", &ThresholdConfig::default()),
            Err(ComputeError::EmptyAdmittedPool {
                excluded: 0,
                discarded: 3
            })
        );
    }

    #[test]
    fn test_compute_rejects_invalid_config() {
        let config = ThresholdConfig {
            res_threshold: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            compute("50", &config),
            Err(ComputeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_compute_scores_drops_out_of_range_values() {
        let config = ThresholdConfig::default();
        let result = compute_scores(&[60.0, 150.0, -5.0, f64::NAN, 40.0], 1, &config).unwrap();

        assert_eq!(result.statistics.average, 50.0);
        assert_eq!(result.statistics.admitted_count, 2);
        assert_eq!(result.statistics.discarded_count, 4);

        assert_eq!(
            compute_scores(&[150.0, 0.0], 0, &config),
            Err(ComputeError::EmptyAdmittedPool {
                excluded: 0,
                discarded: 2
            })
        );
    }

    #[test]
    fn test_compute_scores_matches_compute() {
        let config = ThresholdConfig::default();
        let from_text = compute("45\n55,5\n65", &config).unwrap();
        let from_scores = compute_scores(&[45.0, 55.5, 65.0], 0, &config).unwrap();
        assert_eq!(from_text, from_scores);
    }
}
