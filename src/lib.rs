//! Comparo - statistical comparison of prompt/completion datasets
//!
//! This library provides the analysis core behind a comparative-analysis
//! dashboard: descriptive statistics, Welch's t-test with Cohen's d,
//! prompt/completion alignment, and ranked insight generation over
//! per-metric comparison results.

pub mod alignment;
pub mod cli;
pub mod dataset;
pub mod insights;
pub mod model;
pub mod report;
pub mod statistics;
