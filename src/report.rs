//! Rendering of insights and per-metric interpretations
//!
//! Text output is meant for terminals, JSON mirrors the dashboard payload,
//! CSV is for spreadsheets.

use crate::insights::{GeneratedInsight, Impact};
use crate::model::StatisticalMetric;
use crate::statistics::{interpret_p_value, EffectCategory};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Human-readable reading of a single comparison metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricInterpretation {
    /// Title-cased metric name ("completion_length" → "Completion Length")
    pub display_name: String,
    pub significant: bool,
    pub effect_category: EffectCategory,
    /// a - b
    pub difference: f64,
    /// |a - b| / |b| * 100, 0 when b is 0
    pub relative_difference: f64,
    pub interpretation: String,
    pub recommendation: String,
}

fn spaced(name: &str) -> String {
    name.replace('_', " ")
}

fn title_case(name: &str) -> String {
    spaced(name)
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Interpret one metric at significance level `alpha`
pub fn interpret_metric(metric: &StatisticalMetric, alpha: f64) -> MetricInterpretation {
    let significant = metric.statistical_significance < alpha;
    let effect_category = EffectCategory::from_effect_size(metric.effect_size);
    let difference = metric.dataset_a_value - metric.dataset_b_value;
    let relative_difference = if metric.dataset_b_value != 0.0 {
        (difference / metric.dataset_b_value * 100.0).abs()
    } else {
        0.0
    };

    let (interpretation, recommendation) = if !significant {
        (
            format!(
                "No statistically significant difference detected (p = {:.4} > {})",
                metric.statistical_significance, alpha
            ),
            "The observed difference could be due to random variation. Consider collecting \
             more data or investigating other metrics."
                .to_string(),
        )
    } else {
        let direction = if difference > 0.0 { "higher" } else { "lower" };
        let recommendation = match effect_category {
            EffectCategory::Large => format!(
                "Strong evidence of meaningful difference. This {} difference should be \
                 considered in model selection.",
                spaced(&metric.name)
            ),
            EffectCategory::Medium => "Moderate difference detected. Consider practical \
                                       significance alongside statistical significance."
                .to_string(),
            _ => "Small but significant difference. May not be practically meaningful \
                  depending on use case."
                .to_string(),
        };
        (
            format!(
                "Dataset A shows {} values with {} effect size (d = {:.3}, p = {:.3e}, {})",
                direction,
                effect_category,
                metric.effect_size,
                metric.statistical_significance,
                interpret_p_value(metric.statistical_significance, alpha)
            ),
            recommendation,
        )
    };

    MetricInterpretation {
        display_name: title_case(&metric.name),
        significant,
        effect_category,
        difference,
        relative_difference,
        interpretation,
        recommendation,
    }
}

fn impact_marker(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "🔴",
        Impact::Medium => "🟡",
        Impact::Low => "🟢",
    }
}

/// Plain-text report of ranked insights
pub fn render_text(insights: &[GeneratedInsight]) -> String {
    let mut report = String::new();

    if insights.is_empty() {
        report.push_str("No insights generated\n");
        return report;
    }

    report.push_str(&format!("📊 {} insight(s)\n\n", insights.len()));
    for (i, insight) in insights.iter().enumerate() {
        report.push_str(&format!(
            "{}. {} [{}] {} (impact: {}, confidence: {:.0}%)\n",
            i + 1,
            impact_marker(insight.impact),
            insight.insight_type,
            insight.title,
            insight.impact,
            insight.confidence * 100.0
        ));
        report.push_str(&format!("   {}\n", insight.description));
        if !insight.metrics.is_empty() {
            report.push_str(&format!("   metrics: {}\n", insight.metrics.join(", ")));
        }
        report.push('\n');
    }

    report
}

/// Plain-text section with one interpretation per metric
pub fn render_interpretations(metrics: &[StatisticalMetric], alpha: f64) -> String {
    let mut report = String::from("🔬 Statistical Tests:\n");
    for metric in metrics {
        let reading = interpret_metric(metric, alpha);
        report.push_str(&format!(
            "  {} ({}): {}\n    → {}\n",
            reading.display_name,
            if reading.significant { "significant" } else { "not significant" },
            reading.interpretation,
            reading.recommendation
        ));
    }
    report
}

/// Pretty JSON array of insights
pub fn render_json(insights: &[GeneratedInsight]) -> Result<String> {
    serde_json::to_string_pretty(insights).context("Failed to serialize insights")
}

/// CSV with one row per insight; metric names joined by ';'
pub fn render_csv(insights: &[GeneratedInsight]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["type", "impact", "confidence", "title", "description", "metrics"])?;

    for insight in insights {
        let confidence = format!("{:.2}", insight.confidence);
        let metrics = insight.metrics.join(";");
        writer.write_record([
            insight.insight_type.as_str(),
            insight.impact.as_str(),
            confidence.as_str(),
            insight.title.as_str(),
            insight.description.as_str(),
            metrics.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
