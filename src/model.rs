//! Comparison records and alignment data consumed by the analysis core
//!
//! These are the wire shapes produced by the comparison backend: metric
//! records use snake_case field names, alignment payloads use camelCase.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One comparison result for a single named metric between two datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalMetric {
    /// Metric identifier (e.g., "average_length", "entropy")
    pub name: String,

    pub dataset_a_value: f64,
    pub dataset_b_value: f64,

    /// p-value in [0, 1]; lower means stronger evidence of a real difference
    pub statistical_significance: f64,

    /// Signed Cohen's d
    pub effect_size: f64,

    /// Lower bound of the mean-difference interval; `null` when the backend
    /// could not compute one
    #[serde(default)]
    pub confidence_interval_lower: Option<f64>,

    /// Upper bound, never below the lower bound when both are present
    #[serde(default)]
    pub confidence_interval_upper: Option<f64>,

    /// Name of the first compared dataset, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_a: Option<String>,

    /// Name of the second compared dataset, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_b: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_statistic: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degrees_of_freedom: Option<f64>,
}

impl StatisticalMetric {
    /// Build a metric record without the optional backend annotations
    ///
    /// `confidence_interval` is `(lower, upper)` with `lower <= upper`.
    pub fn new(
        name: impl Into<String>,
        dataset_a_value: f64,
        dataset_b_value: f64,
        statistical_significance: f64,
        effect_size: f64,
        confidence_interval: (f64, f64),
    ) -> Self {
        let (lower, upper) = confidence_interval;
        debug_assert!(
            lower <= upper,
            "confidence interval lower bound {} exceeds upper bound {}",
            lower,
            upper
        );

        Self {
            name: name.into(),
            dataset_a_value,
            dataset_b_value,
            statistical_significance,
            effect_size,
            confidence_interval_lower: Some(lower),
            confidence_interval_upper: Some(upper),
            dataset_a: None,
            dataset_b: None,
            test_statistic: None,
            degrees_of_freedom: None,
        }
    }

    /// Attach the names of the two compared datasets
    pub fn with_datasets(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.dataset_a = Some(a.into());
        self.dataset_b = Some(b.into());
        self
    }

    /// Both interval bounds, when the backend reported them
    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        self.confidence_interval_lower
            .zip(self.confidence_interval_upper)
    }

    /// True when dataset A's summary value is strictly greater than B's
    pub fn a_wins(&self) -> bool {
        self.dataset_a_value > self.dataset_b_value
    }
}

/// Prompt coverage across the compared completion datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageStats {
    pub total_inputs: usize,
    pub matched_inputs: usize,
    /// matched_inputs / total_inputs * 100
    pub coverage_percentage: f64,
}

/// One prompt matched against every completion dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedRow {
    pub input_id: String,
    pub input_text: String,

    /// Dataset name → completions (`None` when that dataset produced nothing)
    #[serde(alias = "completions")]
    pub outputs: BTreeMap<String, Option<Vec<String>>>,

    /// Dataset name → free-form derived annotations
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl AlignedRow {
    /// Total character length of each dataset that produced output, in key order
    pub fn output_lengths(&self) -> Vec<usize> {
        self.outputs
            .values()
            .flatten()
            .map(|texts| texts.iter().map(|t| t.chars().count()).sum())
            .collect()
    }

    /// Combined character length across all datasets
    pub fn combined_length(&self) -> usize {
        self.output_lengths().iter().sum()
    }
}

/// Result of matching prompt rows to each dataset's completions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentResult {
    #[serde(default)]
    pub aligned_rows: Vec<AlignedRow>,
    #[serde(default)]
    pub unmatched_inputs: Vec<String>,
    pub coverage_stats: CoverageStats,
}
