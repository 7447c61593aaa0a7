//! Prompt and completion datasets loaded from CSV
//!
//! Prompt files carry `input_id,input_text`; completion files carry
//! `input_id,output_text` with one row per completion (several rows may share
//! an id). Extra columns are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub const INPUT_ID: &str = "input_id";
pub const INPUT_TEXT: &str = "input_text";
pub const OUTPUT_TEXT: &str = "output_text";

/// Errors for dataset loading
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File is empty")]
    Empty,

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// A named collection of prompts keyed by input id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDataset {
    pub name: String,
    /// input_id → input_text
    pub prompts: BTreeMap<String, String>,
}

/// A named collection of model outputs keyed to prompt ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionDataset {
    pub name: String,
    /// input_id → completions in file order
    pub completions: BTreeMap<String, Vec<String>>,
}

/// Missing entries of `required` among `headers`, in `required` order
pub fn missing_columns(headers: &csv::StringRecord, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .map(|col| col.to_string())
        .collect()
}

/// Dataset name derived from a file path (its stem)
fn name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every row as (id, text) pairs from the two named columns
fn read_pairs<R: Read>(reader: R, text_column: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::Empty);
    }

    let missing = missing_columns(&headers, &[INPUT_ID, text_column]);
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let (Some(id_idx), Some(text_idx)) = (position(INPUT_ID), position(text_column)) else {
        return Err(DatasetError::MissingColumns(vec![
            INPUT_ID.to_string(),
            text_column.to_string(),
        ]));
    };

    let mut pairs = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Skip blank lines the reader surfaces as empty records
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let id = record.get(id_idx).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(DatasetError::InvalidRow {
                row: i + 2,
                message: format!("empty {}", INPUT_ID),
            });
        }
        let text = record.get(text_idx).unwrap_or_default();
        pairs.push((id.to_string(), text.to_string()));
    }

    Ok(pairs)
}

impl PromptDataset {
    /// Load a prompt dataset; the name is the file stem
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(name_from_path(path), file)
    }

    /// Parse prompt CSV from any reader; later duplicates of an id win
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let prompts = read_pairs(reader, INPUT_TEXT)?.into_iter().collect();
        Ok(Self {
            name: name.into(),
            prompts,
        })
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

impl CompletionDataset {
    /// Load a completion dataset; the name is the file stem
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(name_from_path(path), file)
    }

    /// Parse completion CSV from any reader; rows sharing an id accumulate
    pub fn from_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let mut completions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, text) in read_pairs(reader, OUTPUT_TEXT)? {
            completions.entry(id).or_default().push(text);
        }
        Ok(Self {
            name: name.into(),
            completions,
        })
    }

    /// Total number of completions across all prompts
    pub fn output_count(&self) -> usize {
        self.completions.values().map(Vec::len).sum()
    }
}
