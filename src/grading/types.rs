//! Data types produced by the grading pipeline.

use serde::Serialize;
use std::fmt;

use crate::stats::ClassStats;

/// Letter grades on the relative evaluation scale, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterGrade {
    AA,
    BA,
    BB,
    CB,
    CC,
    DC,
    DD,
    FD,
    FF,
}

impl LetterGrade {
    /// Fixed output order of the breakpoint table.
    pub const ORDER: [LetterGrade; 9] = [
        LetterGrade::AA,
        LetterGrade::BA,
        LetterGrade::BB,
        LetterGrade::CB,
        LetterGrade::CC,
        LetterGrade::DC,
        LetterGrade::DD,
        LetterGrade::FD,
        LetterGrade::FF,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::AA => "AA",
            LetterGrade::BA => "BA",
            LetterGrade::BB => "BB",
            LetterGrade::CB => "CB",
            LetterGrade::CC => "CC",
            LetterGrade::DC => "DC",
            LetterGrade::DD => "DD",
            LetterGrade::FD => "FD",
            LetterGrade::FF => "FF",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Minimum raw score needed for a letter grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeBreakpoint {
    pub letter_grade: LetterGrade,
    pub minimum_score: f64,
}

/// Complete result of one grading run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub statistics: ClassStats,
    /// Index of the normalization bracket selected by the class mean.
    pub bracket: usize,
    pub bracket_label: &'static str,
    pub breakpoints: Vec<GradeBreakpoint>,
}

impl Computation {
    /// Looks up the breakpoint for `grade`.
    pub fn breakpoint(&self, grade: LetterGrade) -> Option<f64> {
        self.breakpoints
            .iter()
            .find(|b| b.letter_grade == grade)
            .map(|b| b.minimum_score)
    }
}
