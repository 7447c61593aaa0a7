// Tunable thresholds for insight generation
//
// Every heuristic band the analyzers use lives here so that a deployment
// can tighten or loosen them from a TOML file instead of code.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds driving the six insight analyzers
///
/// # Example
/// ```
/// use comparo::insights::InsightConfig;
///
/// let config = InsightConfig::default();
/// assert_eq!(config.significance_threshold, 0.05);
/// assert_eq!(config.large_effect, 0.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// p-value below which a metric counts as significant
    pub significance_threshold: f64,

    /// |d| at or above which a significant metric has a large effect
    pub large_effect: f64,

    /// Mean |d| above which a length/token finding is medium impact
    pub medium_effect: f64,

    /// Mean |a - b| over entropy metrics that signals a diversity gap
    pub entropy_difference: f64,

    /// Coverage (percent) below which a coverage warning is raised
    pub low_coverage: f64,

    /// Coverage (percent) below which the warning becomes high impact
    pub critical_coverage: f64,

    /// Coverage (percent) above which coverage is reported as excellent
    pub excellent_coverage: f64,

    /// Coverage (percent) above which the evidence is considered sufficient
    pub recommendation_coverage: f64,

    /// Coefficient of variation above which a row is highly variable
    pub variability_cv: f64,

    /// Distance from the mean, in standard deviations, that marks an outlier
    pub outlier_sigma: f64,

    /// Maximum number of outlier rows collected
    pub outlier_cap: usize,

    /// Number of outlier rows attached to the insight payload
    pub outlier_sample: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            significance_threshold: 0.05,
            large_effect: 0.8,
            medium_effect: 0.5,
            entropy_difference: 1.0,
            low_coverage: 70.0,
            critical_coverage: 50.0,
            excellent_coverage: 95.0,
            recommendation_coverage: 80.0,
            variability_cv: 0.5,
            outlier_sigma: 2.0,
            outlier_cap: 10,
            outlier_sample: 5,
        }
    }
}

impl InsightConfig {
    /// Default thresholds with a custom significance level
    pub fn with_significance(significance_threshold: f64) -> Self {
        Self {
            significance_threshold,
            ..Self::default()
        }
    }

    /// Stricter evidence requirements (fewer, more certain findings)
    pub fn strict() -> Self {
        Self {
            significance_threshold: 0.01,
            low_coverage: 80.0,
            recommendation_coverage: 90.0,
            outlier_sigma: 3.0,
            ..Self::default()
        }
    }

    /// Looser evidence requirements (surface more tentative findings)
    pub fn permissive() -> Self {
        Self {
            significance_threshold: 0.10,
            large_effect: 0.5,
            low_coverage: 60.0,
            recommendation_coverage: 70.0,
            variability_cv: 0.3,
            ..Self::default()
        }
    }

    /// Load thresholds from a TOML file; missing keys keep their defaults
    ///
    /// # Example TOML
    /// ```toml
    /// significance_threshold = 0.01
    /// low_coverage = 75.0
    /// outlier_sigma = 2.5
    /// ```
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read insight config: {}", path.as_ref().display())
        })?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse insight config TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.significance_threshold) {
            return Err(format!(
                "significance_threshold must be in [0, 1], got {}",
                self.significance_threshold
            ));
        }

        if self.large_effect < 0.0 || self.medium_effect < 0.0 {
            return Err(format!(
                "effect thresholds must be non-negative, got large={} medium={}",
                self.large_effect, self.medium_effect
            ));
        }

        for (name, value) in [
            ("low_coverage", self.low_coverage),
            ("critical_coverage", self.critical_coverage),
            ("excellent_coverage", self.excellent_coverage),
            ("recommendation_coverage", self.recommendation_coverage),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{} must be in [0, 100], got {}", name, value));
            }
        }

        if self.critical_coverage > self.low_coverage {
            return Err(format!(
                "critical_coverage ({}) must not exceed low_coverage ({})",
                self.critical_coverage, self.low_coverage
            ));
        }

        if self.low_coverage > self.excellent_coverage {
            return Err(format!(
                "low_coverage ({}) must not exceed excellent_coverage ({})",
                self.low_coverage, self.excellent_coverage
            ));
        }

        if self.variability_cv < 0.0 || self.outlier_sigma < 0.0 {
            return Err(format!(
                "variability_cv and outlier_sigma must be non-negative, got {} and {}",
                self.variability_cv, self.outlier_sigma
            ));
        }

        if self.outlier_sample > self.outlier_cap {
            return Err(format!(
                "outlier_sample ({}) must not exceed outlier_cap ({})",
                self.outlier_sample, self.outlier_cap
            ));
        }

        Ok(())
    }
}
