// Consistency analyzer: output length variability between datasets per prompt
//
// For each aligned prompt with at least two datasets producing output, the
// coefficient of variation (population std / mean) of the per-dataset total
// character lengths measures how differently the models answered.

use super::{AnalysisInput, GeneratedInsight, Impact, InsightType};
use crate::model::AlignmentResult;
use serde::{Deserialize, Serialize};
use trueno::Vector;

/// Aggregate consistency over the aligned rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencySummary {
    /// Rows whose coefficient of variation exceeds the variability threshold
    pub high_variability_inputs: usize,

    /// Mean of `1 - min(cv, 1)` over ALL aligned rows
    ///
    /// Rows with fewer than two producing datasets add nothing to the sum
    /// but still count in the denominator.
    pub avg_consistency: f64,
}

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let Some(alignment) = input.alignment else {
        return Vec::new();
    };

    let summary = summarize(alignment, input.config.variability_cv);
    if summary.high_variability_inputs == 0 {
        return Vec::new();
    }

    vec![GeneratedInsight {
        insight_type: InsightType::Consistency,
        title: "Inconsistent Performance on Some Inputs".to_string(),
        description: format!(
            "{} inputs show high variability in output quality between models. \
             These may be challenging edge cases.",
            summary.high_variability_inputs
        ),
        impact: Impact::Medium,
        confidence: 0.6,
        metrics: vec!["output_consistency".to_string()],
        data: serde_json::to_value(&summary).ok(),
    }]
}

/// Count highly variable rows and average the per-row consistency score
pub fn summarize(alignment: &AlignmentResult, variability_cv: f64) -> ConsistencySummary {
    let rows = &alignment.aligned_rows;
    if rows.is_empty() {
        return ConsistencySummary {
            high_variability_inputs: 0,
            avg_consistency: 1.0,
        };
    }

    let mut high_variability = 0;
    let mut total_consistency = 0.0;

    for row in rows {
        let lengths = row.output_lengths();
        if lengths.len() < 2 {
            continue;
        }

        let cv = coefficient_of_variation(&lengths);
        if cv > variability_cv {
            high_variability += 1;
        }
        total_consistency += 1.0 - cv.min(1.0);
    }

    ConsistencySummary {
        high_variability_inputs: high_variability,
        avg_consistency: total_consistency / rows.len() as f64,
    }
}

/// Population std / mean of the lengths; 0.0 when the mean is zero
pub(crate) fn coefficient_of_variation(lengths: &[usize]) -> f64 {
    if lengths.is_empty() {
        return 0.0;
    }

    let samples: Vec<f32> = lengths.iter().map(|&l| l as f32).collect();
    let vec = Vector::from_slice(&samples);

    let Ok(mean) = vec.mean() else {
        return 0.0;
    };
    let Ok(std) = vec.stddev() else {
        return 0.0;
    };

    if mean <= 0.0 {
        return 0.0;
    }

    f64::from(std / mean)
}
