use crate::grading::table::Bracket;
use crate::grading::types::{GradeBreakpoint, LetterGrade};
use crate::grading::utility::round2;

/// Converts a bracket's reference T-scores into raw-score breakpoints.
///
/// Each grade's minimum is the inverse T-score transform
/// `((T - 50) / 10) * std_dev + average`, rounded to two decimals. FF has
/// no reference value and is pinned to `0.0`. The result follows
/// [`LetterGrade::ORDER`]; monotonicity is not checked.
pub fn breakpoints(bracket: &Bracket, average: f64, std_dev: f64) -> Vec<GradeBreakpoint> {
    LetterGrade::ORDER
        .iter()
        .map(|&letter_grade| {
            let minimum_score = match bracket.t_score(letter_grade) {
                Some(t) => round2((t - 50.0) / 10.0 * std_dev + average),
                None => 0.0,
            };
            GradeBreakpoint {
                letter_grade,
                minimum_score,
            }
        })
        .collect()
}
