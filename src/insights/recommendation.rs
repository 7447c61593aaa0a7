// Recommendation analyzer: does the evidence support a decision?
//
// First matching branch wins, at most one recommendation per run:
// 1. large-effect significant metrics and coverage above the bar
// 2. no significant metrics at all
// 3. coverage at or below the bar (or no alignment supplied)

use super::{AnalysisInput, GeneratedInsight, Impact, InsightType};

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let has_significant = !input.significant_metrics().is_empty();
    let has_large_effect = !input.large_effect_metrics().is_empty();
    let coverage_ok = input
        .coverage_percentage()
        .is_some_and(|pct| pct > input.config.recommendation_coverage);

    let insight = if has_large_effect && coverage_ok {
        GeneratedInsight {
            insight_type: InsightType::Recommendation,
            title: "Sufficient Evidence for Decision Making".to_string(),
            description: "High data coverage and clear performance differences detected. \
                          You have sufficient statistical evidence to make an informed model \
                          selection decision."
                .to_string(),
            impact: Impact::High,
            confidence: 0.85,
            metrics: Vec::new(),
            data: None,
        }
    } else if !has_significant {
        GeneratedInsight {
            insight_type: InsightType::Recommendation,
            title: "Consider Additional Metrics or Data".to_string(),
            description: "No statistically significant differences detected. Consider \
                          collecting more data, testing different metrics, or evaluating \
                          other model aspects."
                .to_string(),
            impact: Impact::Medium,
            confidence: 0.7,
            metrics: Vec::new(),
            data: None,
        }
    } else if !coverage_ok {
        GeneratedInsight {
            insight_type: InsightType::Recommendation,
            title: "Improve Data Alignment".to_string(),
            description: "Low data coverage limits analysis reliability. Ensure consistent \
                          input identifiers across datasets or collect additional aligned \
                          samples."
                .to_string(),
            impact: Impact::Medium,
            confidence: 0.8,
            metrics: vec!["alignment_coverage".to_string()],
            data: None,
        }
    } else {
        return Vec::new();
    };

    vec![insight]
}
