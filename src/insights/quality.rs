// Quality analyzer: output diversity (entropy) and length/token patterns

use super::{
    confidence_score, mean_of, metric_names, AnalysisInput, GeneratedInsight, Impact, InsightType,
};
use crate::model::StatisticalMetric;

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let mut insights = Vec::new();
    insights.extend(entropy_insight(input));
    insights.extend(length_insight(input));
    insights
}

fn name_contains(metric: &StatisticalMetric, needles: &[&str]) -> bool {
    let name = metric.name.to_lowercase();
    needles.iter().any(|n| name.contains(n))
}

fn entropy_insight(input: &AnalysisInput<'_>) -> Option<GeneratedInsight> {
    let entropy: Vec<&StatisticalMetric> = input
        .metrics
        .iter()
        .filter(|m| name_contains(m, &["entropy"]))
        .collect();

    if entropy.is_empty() {
        return None;
    }

    let avg_diff = mean_of(&entropy, |m| (m.dataset_a_value - m.dataset_b_value).abs());
    if avg_diff <= input.config.entropy_difference {
        return None;
    }

    Some(GeneratedInsight {
        insight_type: InsightType::Quality,
        title: "Significant Output Diversity Differences".to_string(),
        description: format!(
            "Average entropy difference of {:.2} suggests models produce outputs \
             with different levels of diversity and creativity.",
            avg_diff
        ),
        impact: Impact::Medium,
        confidence: 0.7,
        metrics: metric_names(&entropy),
        data: None,
    })
}

fn length_insight(input: &AnalysisInput<'_>) -> Option<GeneratedInsight> {
    let threshold = input.config.significance_threshold;
    let significant_length: Vec<&StatisticalMetric> = input
        .metrics
        .iter()
        .filter(|m| name_contains(m, &["length", "token"]))
        .filter(|m| m.statistical_significance < threshold)
        .collect();

    if significant_length.is_empty() {
        return None;
    }

    let avg_effect = mean_of(&significant_length, |m| m.effect_size.abs());

    Some(GeneratedInsight {
        insight_type: InsightType::Quality,
        title: "Consistent Output Length Patterns".to_string(),
        description: format!(
            "Significant differences in output length detected (avg effect: {:.2}). \
             Consider if length variations align with your requirements.",
            avg_effect
        ),
        impact: if avg_effect > input.config.medium_effect {
            Impact::Medium
        } else {
            Impact::Low
        },
        confidence: confidence_score(&significant_length),
        metrics: metric_names(&significant_length),
        data: None,
    })
}
