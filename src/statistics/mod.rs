// Statistical helpers for comparing completion datasets
//
// Descriptive statistics for a single sample, Welch's two-sample t-test with
// Cohen's d, and the interpretation bands used by reports and insights.
//
// Two p-value backends are available:
// - Bucketed: a fixed table of critical values mapped to a small set of
//   p-value buckets. Kept for parity with existing dashboard consumers.
// - StudentT: two-tailed survival function of Student's t at the Welch
//   statistic and degrees of freedom.

mod descriptive;
mod interpret;
mod significance;

pub use descriptive::{descriptive_stats, percentile, try_descriptive_stats, DescriptiveStats};
pub use interpret::{approximate_power, interpret_p_value, EffectCategory};
pub use significance::{
    bucketed_p_value, cohens_d, student_t_p_value, welch_t_test, welch_t_test_with, PValueMethod,
    WelchTest,
};

use thiserror::Error;

/// Errors raised by the statistics helpers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Cannot compute statistics of an empty sample")]
    EmptySample,

    #[error("Insufficient sample size: need at least {required} observations, got {actual}")]
    InsufficientSampleSize { required: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, StatsError>;
