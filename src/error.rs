//! Error types returned by the grading pipeline.

/// Reasons a computation over a roster can fail.
///
/// Unparsable or out-of-range tokens are not errors; they are dropped by the
/// parser and only show up in [`crate::stats::ClassStats::discarded_count`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComputeError {
    #[error("no scores were entered")]
    EmptyInput,

    #[error(
        "no score is admitted into the statistical pool \
         ({excluded} below the RES threshold, {discarded} discarded)"
    )]
    EmptyAdmittedPool { excluded: usize, discarded: usize },

    #[error("invalid {field}: {value} (expected a value between 0 and 100)")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("{name} is not a finite number")]
    NonFiniteStatistic { name: &'static str },
}
