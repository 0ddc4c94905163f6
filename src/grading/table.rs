//! Fixed T-score normalization table for relative evaluation.

use crate::grading::types::LetterGrade;

/// One row of the normalization table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lowest class mean that selects this row (inclusive).
    pub min_mean: f64,
    /// Class-level description shown next to the row.
    pub label: &'static str,
    /// Reference T-scores for AA through FD, in [`LetterGrade::ORDER`].
    /// FF has no reference value.
    pub t_scores: [f64; 8],
}

impl Bracket {
    /// Reference T-score for `grade`, or `None` for FF.
    pub fn t_score(&self, grade: LetterGrade) -> Option<f64> {
        LetterGrade::ORDER
            .iter()
            .position(|&g| g == grade)
            .and_then(|i| self.t_scores.get(i).copied())
    }
}

/// Normalization brackets sorted by descending `min_mean`.
///
/// | Class mean        | AA | BA | BB | CB | CC | DC | DD | FD |
/// |-------------------|----|----|----|----|----|----|----|----|
/// | >= 80.0           | 57 | 52 | 47 | 42 | 37 | 32 | 27 | 22 |
/// | 70.0 – 80.0       | 59 | 54 | 49 | 44 | 39 | 34 | 29 | 24 |
/// | 62.5 – 70.0       | 61 | 56 | 51 | 46 | 41 | 36 | 31 | 26 |
/// | 57.5 – 62.5       | 63 | 58 | 53 | 48 | 43 | 38 | 33 | 28 |
/// | 52.5 – 57.5       | 65 | 60 | 55 | 50 | 45 | 40 | 35 | 30 |
/// | 47.5 – 52.5       | 67 | 62 | 57 | 52 | 47 | 42 | 37 | 32 |
/// | 42.5 – 47.5       | 69 | 64 | 59 | 54 | 49 | 44 | 39 | 34 |
/// | < 42.5            | 71 | 66 | 61 | 56 | 51 | 46 | 41 | 36 |
pub static BRACKETS: [Bracket; 8] = [
    Bracket {
        min_mean: 80.0,
        label: "Excellent",
        t_scores: [57.0, 52.0, 47.0, 42.0, 37.0, 32.0, 27.0, 22.0],
    },
    Bracket {
        min_mean: 70.0,
        label: "Very good",
        t_scores: [59.0, 54.0, 49.0, 44.0, 39.0, 34.0, 29.0, 24.0],
    },
    Bracket {
        min_mean: 62.5,
        label: "Good",
        t_scores: [61.0, 56.0, 51.0, 46.0, 41.0, 36.0, 31.0, 26.0],
    },
    Bracket {
        min_mean: 57.5,
        label: "Above average",
        t_scores: [63.0, 58.0, 53.0, 48.0, 43.0, 38.0, 33.0, 28.0],
    },
    Bracket {
        min_mean: 52.5,
        label: "Average",
        t_scores: [65.0, 60.0, 55.0, 50.0, 45.0, 40.0, 35.0, 30.0],
    },
    Bracket {
        min_mean: 47.5,
        label: "Weak",
        t_scores: [67.0, 62.0, 57.0, 52.0, 47.0, 42.0, 37.0, 32.0],
    },
    Bracket {
        min_mean: 42.5,
        label: "Poor",
        t_scores: [69.0, 64.0, 59.0, 54.0, 49.0, 44.0, 39.0, 34.0],
    },
    Bracket {
        min_mean: f64::NEG_INFINITY,
        label: "Very poor",
        t_scores: [71.0, 66.0, 61.0, 56.0, 51.0, 46.0, 41.0, 36.0],
    },
];

/// Returns the index of the bracket selected by `average`.
///
/// The first row whose `min_mean` is not above `average` wins; the last row
/// has no lower bound, so every finite mean resolves. NaN falls through to
/// the last row and must be rejected by the caller.
pub fn select_bracket(average: f64) -> usize {
    BRACKETS
        .iter()
        .position(|b| average >= b.min_mean)
        .unwrap_or(BRACKETS.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_bracket_boundaries() {
        assert_eq!(select_bracket(100.0), 0);
        assert_eq!(select_bracket(80.0), 0);
        assert_eq!(select_bracket(79.99), 1);
        assert_eq!(select_bracket(70.0), 1);
        assert_eq!(select_bracket(69.99), 2);
        assert_eq!(select_bracket(62.5), 2);
        assert_eq!(select_bracket(62.49), 3);
        assert_eq!(select_bracket(57.5), 3);
        assert_eq!(select_bracket(57.49), 4);
        assert_eq!(select_bracket(52.5), 4);
        assert_eq!(select_bracket(52.49), 5);
        assert_eq!(select_bracket(47.5), 5);
        assert_eq!(select_bracket(47.49), 6);
        assert_eq!(select_bracket(42.5), 6);
        assert_eq!(select_bracket(42.49), 7);
        assert_eq!(select_bracket(0.0), 7);
    }

    #[test]
    fn test_brackets_sorted_descending() {
        assert!(BRACKETS.windows(2).all(|w| w[0].min_mean > w[1].min_mean));
    }

    #[test]
    fn test_t_scores_step_by_five_within_row() {
        for bracket in &BRACKETS {
            assert!(bracket.t_scores.windows(2).all(|w| w[0] - w[1] == 5.0));
        }
    }

    #[test]
    fn test_t_score_lookup() {
        assert_eq!(BRACKETS[1].t_score(LetterGrade::AA), Some(59.0));
        assert_eq!(BRACKETS[7].t_score(LetterGrade::FD), Some(36.0));
        assert_eq!(BRACKETS[0].t_score(LetterGrade::FF), None);
    }
}
