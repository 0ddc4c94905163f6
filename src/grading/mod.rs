//! Relative evaluation: T-score normalization and grade breakpoints.
//!
//! The class mean selects one row of the fixed normalization table, and each
//! letter grade's reference T-score is mapped back to a raw-score minimum
//! using the class mean and standard deviation.

pub mod breakpoints;
pub mod compute;
pub mod table;
pub mod types;
pub mod utility;

pub use compute::{compute, compute_scores};
pub use types::{Computation, GradeBreakpoint, LetterGrade};
