// Integration tests for the comparo binary
// Covers insights, align, describe and ttest end to end

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const METRICS_JSON: &str = r#"[
  {"name": "completion_length", "dataset_a_value": 310.0, "dataset_b_value": 180.0,
   "statistical_significance": 0.0001, "effect_size": 1.2,
   "confidence_interval_lower": 90.0, "confidence_interval_upper": 170.0},
  {"name": "token_count", "dataset_a_value": 72.0, "dataset_b_value": 41.0,
   "statistical_significance": 0.001, "effect_size": 0.95,
   "confidence_interval_lower": 20.0, "confidence_interval_upper": 42.0},
  {"name": "response_entropy", "dataset_a_value": 4.1, "dataset_b_value": 3.9,
   "statistical_significance": 0.4, "effect_size": 0.1,
   "confidence_interval_lower": -0.3, "confidence_interval_upper": 0.7}
]"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Four prompts; `gpt` answers all of them, `claude` only two
fn write_datasets(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
    let prompts = write(
        dir,
        "prompts.csv",
        "input_id,input_text\n1,What is Rust?\n2,Explain ownership\n3,Define a trait\n4,What is a crate?\n",
    );
    let gpt = write(
        dir,
        "gpt.csv",
        "input_id,output_text\n1,A systems language\n2,Each value has one owner\n3,Shared behavior\n4,A compilation unit\n",
    );
    let claude = write(
        dir,
        "claude.csv",
        "input_id,output_text\n1,A memory-safe language\n1,A fast language\n3,An interface\n",
    );
    (prompts, gpt, claude)
}

// ============================================================================
// insights
// ============================================================================

#[test]
fn test_insights_text_reports_performance_leader() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights").arg("--metrics").arg(&metrics);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Clear Performance Leader: Dataset A"))
        .stdout(predicate::str::contains("completion_length, token_count"))
        // No alignment supplied, so coverage cannot back a decision
        .stdout(predicate::str::contains("Improve Data Alignment"));
}

#[test]
fn test_insights_json_is_ranked_array() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    let output = cmd
        .arg("insights")
        .arg("--metrics")
        .arg(&metrics)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let insights = value.as_array().unwrap();
    assert!(!insights.is_empty());
    assert_eq!(insights[0]["type"], "performance");
    assert_eq!(insights[0]["impact"], "high");
}

#[test]
fn test_insights_strict_threshold_changes_outcome() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);

    // At p < 0.0001 nothing is significant
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--metrics")
        .arg(&metrics)
        .arg("--threshold")
        .arg("0.0001");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Consider Additional Metrics or Data"))
        .stdout(predicate::str::contains("Clear Performance Leader").not());
}

#[test]
fn test_insights_from_csv_datasets_flags_low_coverage() {
    let dir = TempDir::new().unwrap();
    let (prompts, gpt, claude) = write_datasets(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--prompts")
        .arg(&prompts)
        .arg("--completions")
        .arg(&gpt)
        .arg("--completions")
        .arg(&claude);

    // 2 of 4 prompts aligned: 50% coverage
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Low Data Alignment Coverage"))
        .stdout(predicate::str::contains("50.0%"))
        .stdout(predicate::str::contains("Consider Additional Metrics or Data"));
}

#[test]
fn test_insights_csv_format_header() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--metrics")
        .arg(&metrics)
        .arg("--format")
        .arg("csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "type,impact,confidence,title,description,metrics",
        ))
        .stdout(predicate::str::contains("completion_length;token_count"));
}

#[test]
fn test_insights_interpret_section() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--metrics")
        .arg(&metrics)
        .arg("--interpret");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Statistical Tests:"))
        .stdout(predicate::str::contains("Completion Length (significant)"))
        .stdout(predicate::str::contains("Response Entropy (not significant)"));
}

#[test]
fn test_insights_accepts_null_confidence_bounds() {
    let dir = TempDir::new().unwrap();
    let metrics = write(
        &dir,
        "metrics.json",
        r#"[{"name": "completion_length", "dataset_a": "gpt", "dataset_b": "claude",
             "dataset_a_value": 300.0, "dataset_b_value": 120.0,
             "statistical_significance": 0.0005, "effect_size": 1.4,
             "confidence_interval_lower": null, "confidence_interval_upper": null}]"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights").arg("--metrics").arg(&metrics);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Clear Performance Leader: gpt"));
}

#[test]
fn test_insights_with_no_inputs_recommends_more_data() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Consider Additional Metrics or Data"));
}

#[test]
fn test_insights_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", METRICS_JSON);
    let config = write(&dir, "insights.toml", "significance_threshold = 1.5\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--metrics")
        .arg(&metrics)
        .arg("--config")
        .arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("significance_threshold"));
}

#[test]
fn test_insights_missing_metrics_file() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights")
        .arg("--metrics")
        .arg("/nonexistent/metrics.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read metrics file"));
}

#[test]
fn test_insights_malformed_metrics_json() {
    let dir = TempDir::new().unwrap();
    let metrics = write(&dir, "metrics.json", "{ not json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("insights").arg("--metrics").arg(&metrics);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse metrics JSON"));
}

// ============================================================================
// align
// ============================================================================

#[test]
fn test_align_prints_alignment_json() {
    let dir = TempDir::new().unwrap();
    let (prompts, gpt, claude) = write_datasets(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    let output = cmd
        .arg("align")
        .arg("--prompts")
        .arg(&prompts)
        .arg("--completions")
        .arg(&gpt)
        .arg("--completions")
        .arg(&claude)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["coverageStats"]["totalInputs"], 4);
    assert_eq!(value["coverageStats"]["matchedInputs"], 2);
    assert_eq!(value["coverageStats"]["coveragePercentage"], 50.0);
    assert_eq!(value["unmatchedInputs"], serde_json::json!(["2", "4"]));
    assert_eq!(value["alignedRows"][0]["inputId"], "1");
    assert_eq!(
        value["alignedRows"][0]["outputs"]["claude"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_align_max_rows_caps_rows_not_coverage() {
    let dir = TempDir::new().unwrap();
    let (prompts, gpt, _) = write_datasets(&dir);

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    let output = cmd
        .arg("align")
        .arg("--prompts")
        .arg(&prompts)
        .arg("--completions")
        .arg(&gpt)
        .arg("--max-rows")
        .arg("1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["alignedRows"].as_array().unwrap().len(), 1);
    assert_eq!(value["coverageStats"]["matchedInputs"], 4);
}

#[test]
fn test_align_same_file_names_in_different_directories() {
    let dir = TempDir::new().unwrap();
    let prompts = write(&dir, "prompts.csv", "input_id,input_text\n1,Say hi\n");
    fs::create_dir(dir.path().join("gpt")).unwrap();
    fs::create_dir(dir.path().join("claude")).unwrap();
    let gpt = write(&dir, "gpt/out.csv", "input_id,output_text\n1,hi\n");
    let claude = write(&dir, "claude/out.csv", "input_id,output_text\n1,hello there\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    let output = cmd
        .arg("align")
        .arg("--prompts")
        .arg(&prompts)
        .arg("--completions")
        .arg(&gpt)
        .arg("--completions")
        .arg(&claude)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let outputs = value["alignedRows"][0]["outputs"].as_object().unwrap();
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs["out"], serde_json::json!(["hi"]));
    assert_eq!(outputs["out#2"], serde_json::json!(["hello there"]));
}

#[test]
fn test_align_requires_prompts() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("align");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--prompts is required"));
}

#[test]
fn test_align_missing_column_reported() {
    let dir = TempDir::new().unwrap();
    let prompts = write(&dir, "prompts.csv", "id,text\n1,hello\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.arg("align").arg("--prompts").arg(&prompts);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("input_id"));
}

// ============================================================================
// describe / ttest
// ============================================================================

#[test]
fn test_describe_text() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.args(["describe", "1", "2", "3", "4"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Count:    4"))
        .stdout(predicate::str::contains("Mean:     2.5000"))
        .stdout(predicate::str::contains("Median:   2.5000"));
}

#[test]
fn test_describe_empty_sample_is_zero_filled() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.args(["describe", "--json"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 0);
    assert_eq!(value["mean"], 0.0);
}

#[test]
fn test_ttest_bucketed_json() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    let output = cmd
        .args([
            "ttest",
            "--a",
            "10,11,12,13,14",
            "--b",
            "20,21,22,23,24",
            "--p-value",
            "bucketed",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["p_value"], 0.0001);
    assert!(value["effect_size"].as_f64().unwrap() < -0.8);
}

#[test]
fn test_ttest_text_output() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.args(["ttest", "--a", "1,2,3,4", "--b", "2,3,4,5"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("t statistic:"))
        .stdout(predicate::str::contains("Cohen's d:"))
        .stdout(predicate::str::contains("95% CI:"));
}

#[test]
fn test_ttest_rejects_single_observation() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("comparo");
    cmd.args(["ttest", "--a", "1", "--b", "2,3"]);

    cmd.assert().failure();
}
