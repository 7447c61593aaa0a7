// Coverage analyzer: how much of the prompt set aligned

use super::{AnalysisInput, GeneratedInsight, Impact, InsightType};
use serde_json::json;

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let Some(alignment) = input.alignment else {
        return Vec::new();
    };

    let config = input.config;
    let stats = &alignment.coverage_stats;
    let coverage = stats.coverage_percentage;
    let data = json!({
        "coveragePercentage": coverage,
        "totalInputs": stats.total_inputs,
        "matchedInputs": stats.matched_inputs,
    });

    if coverage < config.low_coverage {
        vec![GeneratedInsight {
            insight_type: InsightType::Coverage,
            title: "Low Data Alignment Coverage".to_string(),
            description: format!(
                "Only {:.1}% of inputs have matching outputs ({}/{}). \
                 This reduces the reliability of comparative analysis.",
                coverage, stats.matched_inputs, stats.total_inputs
            ),
            impact: if coverage < config.critical_coverage {
                Impact::High
            } else {
                Impact::Medium
            },
            confidence: 0.9,
            metrics: vec!["alignment_coverage".to_string()],
            data: Some(data),
        }]
    } else if coverage > config.excellent_coverage {
        vec![GeneratedInsight {
            insight_type: InsightType::Coverage,
            title: "Excellent Data Alignment".to_string(),
            description: format!(
                "High coverage achieved ({:.1}%). Reliable comparative analysis is possible \
                 with {} aligned data points.",
                coverage, stats.matched_inputs
            ),
            impact: Impact::Low,
            confidence: 0.8,
            metrics: vec!["alignment_coverage".to_string()],
            data: Some(data),
        }]
    } else {
        Vec::new()
    }
}
