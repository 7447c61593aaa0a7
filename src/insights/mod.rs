// Insight generation for completion dataset comparisons
//
// Turns per-metric comparison records and an optional alignment summary
// into a ranked list of human-readable findings. Six analyzers run over the
// same immutable input:
//
// - performance: which dataset leads on significant, large-effect metrics
// - coverage: how many prompts aligned across every dataset
// - quality: entropy (diversity) and length/token differences
// - consistency: per-prompt output length variability between datasets
// - outlier: prompts whose combined output length is unusual
// - recommendation: whether the evidence supports a decision
//
// Each analyzer is a pure function of the input; the generator concatenates
// their findings and applies a stable sort by impact, then confidence.

mod config;
mod consistency;
mod coverage;
mod outlier;
mod performance;
mod quality;
mod recommendation;
mod scoring;

pub use config::InsightConfig;
pub use consistency::ConsistencySummary;
pub use scoring::confidence_score;

use crate::model::{AlignmentResult, StatisticalMetric};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a generated insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Performance,
    Quality,
    Consistency,
    Coverage,
    Recommendation,
    Outlier,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Quality => "quality",
            Self::Consistency => "consistency",
            Self::Coverage => "coverage",
            Self::Recommendation => "recommendation",
            Self::Outlier => "outlier",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much an insight matters; only used for ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    /// Ordinal sort weight: high 3, medium 2, low 1
    pub fn weight(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One qualitative finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedInsight {
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// In [0, 1]
    pub confidence: f64,
    /// Names of the metrics that contributed (may be empty)
    pub metrics: Vec<String>,
    /// Drill-down payload for the presentation layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Immutable snapshot every analyzer reads from
#[derive(Debug, Clone, Copy)]
pub struct AnalysisInput<'a> {
    pub metrics: &'a [StatisticalMetric],
    pub alignment: Option<&'a AlignmentResult>,
    pub config: &'a InsightConfig,
}

impl<'a> AnalysisInput<'a> {
    /// Metrics with p-value below the significance threshold, in input order
    pub fn significant_metrics(&self) -> Vec<&'a StatisticalMetric> {
        let threshold = self.config.significance_threshold;
        self.metrics
            .iter()
            .filter(|m| m.statistical_significance < threshold)
            .collect()
    }

    /// Significant metrics whose |effect size| reaches the large-effect band
    pub fn large_effect_metrics(&self) -> Vec<&'a StatisticalMetric> {
        let large = self.config.large_effect;
        self.significant_metrics()
            .into_iter()
            .filter(|m| m.effect_size.abs() >= large)
            .collect()
    }

    /// Alignment coverage percentage, if an alignment was supplied
    pub fn coverage_percentage(&self) -> Option<f64> {
        self.alignment
            .map(|a| a.coverage_stats.coverage_percentage)
    }
}

/// Signature shared by the six analyzers
pub type Analyzer = fn(&AnalysisInput<'_>) -> Vec<GeneratedInsight>;

/// Analyzers in the order their findings are concatenated before ranking
pub const ANALYZERS: [(&str, Analyzer); 6] = [
    ("performance", performance::analyze),
    ("coverage", coverage::analyze),
    ("quality", quality::analyze),
    ("consistency", consistency::analyze),
    ("outlier", outlier::analyze),
    ("recommendation", recommendation::analyze),
];

/// Generates ranked insights from a fixed snapshot of metrics and alignment
///
/// # Example
/// ```
/// use comparo::insights::{Impact, InsightGenerator, InsightType};
/// use comparo::model::StatisticalMetric;
///
/// let metrics = vec![StatisticalMetric::new("m1", 10.0, 1.0, 0.0001, 1.2, (5.0, 15.0))];
/// let insights = InsightGenerator::new(metrics, None, 0.05).generate_insights();
///
/// let performance: Vec<_> = insights
///     .iter()
///     .filter(|i| i.insight_type == InsightType::Performance)
///     .collect();
/// assert_eq!(performance.len(), 1);
/// assert_eq!(performance[0].impact, Impact::High);
/// assert!(performance[0].title.contains("Dataset A"));
/// ```
#[derive(Debug, Clone)]
pub struct InsightGenerator {
    metrics: Vec<StatisticalMetric>,
    alignment: Option<AlignmentResult>,
    config: InsightConfig,
}

impl InsightGenerator {
    /// Create a generator with default thresholds and the given significance level
    pub fn new(
        metrics: Vec<StatisticalMetric>,
        alignment: Option<AlignmentResult>,
        significance_threshold: f64,
    ) -> Self {
        Self::with_config(
            metrics,
            alignment,
            InsightConfig::with_significance(significance_threshold),
        )
    }

    /// Create a generator with a full threshold configuration
    pub fn with_config(
        metrics: Vec<StatisticalMetric>,
        alignment: Option<AlignmentResult>,
        config: InsightConfig,
    ) -> Self {
        Self {
            metrics,
            alignment,
            config,
        }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Run every analyzer and return the findings ranked by impact, then confidence
    pub fn generate_insights(&self) -> Vec<GeneratedInsight> {
        generate_insights(&self.metrics, self.alignment.as_ref(), &self.config)
    }
}

/// Borrowing form of [`InsightGenerator::generate_insights`]
pub fn generate_insights(
    metrics: &[StatisticalMetric],
    alignment: Option<&AlignmentResult>,
    config: &InsightConfig,
) -> Vec<GeneratedInsight> {
    let input = AnalysisInput {
        metrics,
        alignment,
        config,
    };

    let mut insights = Vec::new();
    for (name, analyze) in ANALYZERS {
        let found = analyze(&input);
        tracing::debug!(analyzer = name, insights = found.len(), "insight analyzer finished");
        insights.extend(found);
    }

    rank_insights(&mut insights);
    insights
}

/// Stable sort: impact weight descending, then confidence descending
pub fn rank_insights(insights: &mut [GeneratedInsight]) {
    insights.sort_by(|a, b| {
        b.impact
            .weight()
            .cmp(&a.impact.weight())
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });
}

/// Mean of `f` over `items`; 0.0 when empty
pub(crate) fn mean_of<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(f).sum::<f64>() / items.len() as f64
}

/// Names of the given metrics, in order
pub(crate) fn metric_names(metrics: &[&StatisticalMetric]) -> Vec<String> {
    metrics.iter().map(|m| m.name.clone()).collect()
}
