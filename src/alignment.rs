//! Prompt/completion alignment
//!
//! Matches every prompt id against each completion dataset and reports
//! coverage. A prompt is matched only when every dataset has completions for
//! it. Aligned rows are capped to keep payloads small.

use crate::dataset::{CompletionDataset, PromptDataset};
use crate::model::{AlignedRow, AlignmentResult, CoverageStats};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

/// Default cap on the number of aligned rows returned
pub const DEFAULT_MAX_ROWS: usize = 200;

/// Align prompts with completion datasets by input id
///
/// # Example
/// ```
/// use comparo::alignment::align;
/// use comparo::dataset::{CompletionDataset, PromptDataset};
///
/// let prompts = PromptDataset::from_reader("p", "input_id,input_text\n1,a\n2,b\n".as_bytes()).unwrap();
/// let gpt = CompletionDataset::from_reader("gpt", "input_id,output_text\n1,x\n".as_bytes()).unwrap();
///
/// let result = align(&prompts, &[gpt], 200);
/// assert_eq!(result.coverage_stats.matched_inputs, 1);
/// assert_eq!(result.coverage_stats.coverage_percentage, 50.0);
/// assert_eq!(result.unmatched_inputs, vec!["2".to_string()]);
/// ```
pub fn align(
    prompts: &PromptDataset,
    completions: &[CompletionDataset],
    max_rows: usize,
) -> AlignmentResult {
    let matched: Vec<&String> = prompts
        .prompts
        .keys()
        .filter(|id| completions.iter().all(|ds| ds.completions.contains_key(*id)))
        .collect();

    let unmatched: BTreeSet<&String> = completions
        .iter()
        .flat_map(|ds| {
            prompts
                .prompts
                .keys()
                .filter(move |id| !ds.completions.contains_key(*id))
        })
        .collect();

    let total_inputs = prompts.len();
    let matched_inputs = matched.len();
    let coverage = if total_inputs > 0 {
        matched_inputs as f64 / total_inputs as f64 * 100.0
    } else {
        0.0
    };

    let keys = output_keys(completions);
    let aligned_rows: Vec<AlignedRow> = matched
        .iter()
        .take(max_rows)
        .map(|id| aligned_row(id, prompts, completions, &keys))
        .collect();

    tracing::debug!(
        total_inputs,
        matched_inputs,
        rows = aligned_rows.len(),
        "aligned prompt dataset {}",
        prompts.name
    );

    AlignmentResult {
        aligned_rows,
        unmatched_inputs: unmatched.into_iter().cloned().collect(),
        coverage_stats: CoverageStats {
            total_inputs,
            matched_inputs,
            coverage_percentage: round2(coverage),
        },
    }
}

/// Per-dataset keys for `outputs` and `metadata`
///
/// Datasets sharing a name (e.g. `gpt/out.csv` and `claude/out.csv`) keep the
/// name for the first one and get `name#2`, `name#3`, ... for the rest.
pub fn output_keys(completions: &[CompletionDataset]) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut keys = Vec::with_capacity(completions.len());

    for ds in completions {
        let mut key = ds.name.clone();
        let mut n = 2;
        while used.contains(&key) {
            key = format!("{}#{}", ds.name, n);
            n += 1;
        }
        if key != ds.name {
            tracing::warn!("duplicate dataset name {}, keyed as {}", ds.name, key);
        }
        used.insert(key.clone());
        keys.push(key);
    }

    keys
}

fn aligned_row(
    id: &str,
    prompts: &PromptDataset,
    completions: &[CompletionDataset],
    keys: &[String],
) -> AlignedRow {
    let mut outputs = BTreeMap::new();
    let mut metadata = BTreeMap::new();

    for (ds, key) in completions.iter().zip(keys) {
        let texts = ds.completions.get(id).cloned();
        let meta = match &texts {
            Some(texts) => {
                let total: usize = texts.iter().map(|t| t.chars().count()).sum();
                let average = if texts.is_empty() {
                    0.0
                } else {
                    total as f64 / texts.len() as f64
                };
                json!({ "output_count": texts.len(), "average_length": average })
            }
            None => json!({ "output_count": 0, "average_length": 0.0 }),
        };
        outputs.insert(key.clone(), texts);
        metadata.insert(key.clone(), meta);
    }

    AlignedRow {
        input_id: id.to_string(),
        input_text: prompts.prompts.get(id).cloned().unwrap_or_default(),
        outputs,
        metadata,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
