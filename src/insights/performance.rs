// Performance analyzer: which dataset leads on significant metrics

use super::{
    confidence_score, metric_names, AnalysisInput, GeneratedInsight, Impact, InsightType,
};
use crate::model::StatisticalMetric;

/// Dataset that wins the majority of large-effect metrics
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DominantDataset {
    pub name: String,
    /// Mean effect size signed toward the winning side, reported as |value|
    pub avg_effect: f64,
}

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let significant = input.significant_metrics();
    let large_effect = input.large_effect_metrics();

    if !large_effect.is_empty() {
        let dominant = dominant_dataset(&large_effect);
        let count = large_effect.len();
        return vec![GeneratedInsight {
            insight_type: InsightType::Performance,
            title: format!("Clear Performance Leader: {}", dominant.name),
            description: format!(
                "{} consistently outperforms in {} key metric{} with large effect sizes (avg: {:.2}).",
                dominant.name,
                count,
                if count > 1 { "s" } else { "" },
                dominant.avg_effect
            ),
            impact: Impact::High,
            confidence: confidence_score(&large_effect),
            metrics: metric_names(&large_effect),
            data: None,
        }];
    }

    if !significant.is_empty() {
        return vec![GeneratedInsight {
            insight_type: InsightType::Performance,
            title: "Moderate Performance Differences".to_string(),
            description: format!(
                "{} metrics show significant but small-to-medium effect sizes. \
                 Consider practical significance alongside statistical significance.",
                significant.len()
            ),
            impact: Impact::Medium,
            confidence: confidence_score(&significant),
            metrics: metric_names(&significant),
            data: None,
        }];
    }

    Vec::new()
}

/// Majority vote of `dataset_a_value > dataset_b_value`; ties go to B
pub(super) fn dominant_dataset(metrics: &[&StatisticalMetric]) -> DominantDataset {
    let a_wins = metrics.iter().filter(|m| m.a_wins()).count();
    let b_wins = metrics.len() - a_wins;

    let signed_effect = if metrics.is_empty() {
        0.0
    } else {
        metrics
            .iter()
            .map(|m| if m.a_wins() { m.effect_size } else { -m.effect_size })
            .sum::<f64>()
            / metrics.len() as f64
    };

    let (a_label, b_label) = dataset_labels(metrics);
    DominantDataset {
        name: if a_wins > b_wins { a_label } else { b_label },
        avg_effect: signed_effect.abs(),
    }
}

/// Real dataset names when every metric agrees on them, else "Dataset A"/"Dataset B"
fn dataset_labels(metrics: &[&StatisticalMetric]) -> (String, String) {
    let fallback = ("Dataset A".to_string(), "Dataset B".to_string());

    let Some(first) = metrics.first() else {
        return fallback;
    };
    let (Some(a), Some(b)) = (&first.dataset_a, &first.dataset_b) else {
        return fallback;
    };

    let consistent = metrics.iter().all(|m| {
        m.dataset_a.as_deref() == Some(a.as_str()) && m.dataset_b.as_deref() == Some(b.as_str())
    });

    if consistent {
        (a.clone(), b.clone())
    } else {
        fallback
    }
}
