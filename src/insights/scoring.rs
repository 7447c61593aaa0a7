// Confidence scoring shared by the performance and quality analyzers

use super::mean_of;
use crate::model::StatisticalMetric;

/// Confidence in a finding backed by `metrics`
///
/// Starts at 0.5, adds 0.3 / 0.2 / 0.1 when the mean p-value is below
/// 0.001 / 0.01 / 0.05, adds 0.2 / 0.15 / 0.1 when the mean |effect size| is
/// above 0.8 / 0.5 / 0.2, and caps the total at 1.0. An empty subset scores 0.
pub fn confidence_score(metrics: &[&StatisticalMetric]) -> f64 {
    if metrics.is_empty() {
        return 0.0;
    }

    let avg_p_value = mean_of(metrics, |m| m.statistical_significance);
    let avg_effect_size = mean_of(metrics, |m| m.effect_size.abs());

    let mut confidence = 0.5;

    if avg_p_value < 0.001 {
        confidence += 0.3;
    } else if avg_p_value < 0.01 {
        confidence += 0.2;
    } else if avg_p_value < 0.05 {
        confidence += 0.1;
    }

    if avg_effect_size > 0.8 {
        confidence += 0.2;
    } else if avg_effect_size > 0.5 {
        confidence += 0.15;
    } else if avg_effect_size > 0.2 {
        confidence += 0.1;
    }

    f64::min(confidence, 1.0)
}
