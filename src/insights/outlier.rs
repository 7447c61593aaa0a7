// Outlier analyzer: prompts whose combined output length is unusual

use super::{AnalysisInput, GeneratedInsight, Impact, InsightType};
use crate::model::{AlignedRow, AlignmentResult};
use serde_json::json;
use trueno::Vector;

pub(super) fn analyze(input: &AnalysisInput<'_>) -> Vec<GeneratedInsight> {
    let Some(alignment) = input.alignment else {
        return Vec::new();
    };

    let config = input.config;
    let outliers = detect_outliers(alignment, config.outlier_sigma, config.outlier_cap);
    if outliers.is_empty() {
        return Vec::new();
    }

    let sample: Vec<&AlignedRow> = outliers.iter().copied().take(config.outlier_sample).collect();

    vec![GeneratedInsight {
        insight_type: InsightType::Outlier,
        title: "Outlier Inputs Detected".to_string(),
        description: format!(
            "{} inputs show unusual patterns that may warrant individual investigation. \
             These represent potential edge cases or data quality issues.",
            outliers.len()
        ),
        impact: Impact::Low,
        confidence: 0.5,
        metrics: vec!["outlier_detection".to_string()],
        data: Some(json!({ "outliers": sample })),
    }]
}

/// Rows whose combined length lies more than `sigma` population standard
/// deviations from the mean, in row order, at most `cap` of them
pub fn detect_outliers(alignment: &AlignmentResult, sigma: f64, cap: usize) -> Vec<&AlignedRow> {
    let rows = &alignment.aligned_rows;
    if rows.is_empty() {
        return Vec::new();
    }

    let lengths: Vec<f32> = rows.iter().map(|r| r.combined_length() as f32).collect();
    let vec = Vector::from_slice(&lengths);

    let (Ok(mean), Ok(std)) = (vec.mean(), vec.stddev()) else {
        return Vec::new();
    };
    let threshold = sigma * f64::from(std);

    rows.iter()
        .zip(&lengths)
        .filter(|(_, len)| f64::from(**len - mean).abs() > threshold)
        .map(|(row, _)| row)
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::InsightConfig;
    use crate::model::CoverageStats;
    use std::collections::BTreeMap;

    fn row(id: &str, len: usize) -> AlignedRow {
        let mut outputs = BTreeMap::new();
        outputs.insert("a".to_string(), Some(vec!["x".repeat(len)]));
        outputs.insert("b".to_string(), None);
        AlignedRow {
            input_id: id.to_string(),
            input_text: String::new(),
            outputs,
            metadata: BTreeMap::new(),
        }
    }

    fn alignment(lengths: &[usize]) -> AlignmentResult {
        AlignmentResult {
            aligned_rows: lengths
                .iter()
                .enumerate()
                .map(|(i, &l)| row(&i.to_string(), l))
                .collect(),
            unmatched_inputs: Vec::new(),
            coverage_stats: CoverageStats {
                total_inputs: lengths.len(),
                matched_inputs: lengths.len(),
                coverage_percentage: 100.0,
            },
        }
    }

    #[test]
    fn test_single_spike_detected() {
        let mut lengths = vec![10; 20];
        lengths[7] = 500;
        let a = alignment(&lengths);

        let outliers = detect_outliers(&a, 2.0, 10);
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].input_id, "7");
    }

    #[test]
    fn test_uniform_lengths_have_no_outliers() {
        let a = alignment(&[10, 10, 10, 10]);
        assert!(detect_outliers(&a, 2.0, 10).is_empty());
    }

    #[test]
    fn test_cap_applies_in_row_order() {
        let mut lengths = vec![10; 200];
        for i in 0..12 {
            lengths[i * 10] = 1000;
        }
        let a = alignment(&lengths);

        let outliers = detect_outliers(&a, 2.0, 10);
        assert_eq!(outliers.len(), 10);
        assert_eq!(outliers[0].input_id, "0");
        assert_eq!(outliers[9].input_id, "90");
    }

    #[test]
    fn test_payload_holds_five_rows() {
        let mut lengths = vec![10; 200];
        for i in 0..12 {
            lengths[i * 10] = 1000;
        }
        let a = alignment(&lengths);
        let config = InsightConfig::default();

        let insights = analyze(&AnalysisInput {
            metrics: &[],
            alignment: Some(&a),
            config: &config,
        });

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].impact, Impact::Low);
        assert!(insights[0].description.starts_with("10 inputs"));
        let sample = insights[0].data.as_ref().unwrap()["outliers"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(sample, 5);
    }
}
