//! CSV loader for the labeled training dataset.
//!
//! The file must carry a header row naming the `target` column plus all 13
//! clinical feature columns. Column order in the file is free; rows are
//! reordered into classifier input order on load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::features::{FEATURE_DIM, FEATURE_NAMES};

/// Name of the label column.
pub const TARGET_COLUMN: &str = "target";

#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing header row")]
    MissingHeader,
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: invalid number {value:?}")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}: invalid target {value:?} (expected 0 or 1)")]
    InvalidTarget { line: usize, value: String },
    #[error("dataset contains no data rows")]
    Empty,
}

/// Feature rows (classifier input order) plus 0/1 labels.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    /// One row of 13 features per sample.
    pub x: Vec<Vec<f32>>,
    /// Per-sample binary label.
    pub y: Vec<u8>,
}

/// Load a labeled CSV dataset from `path`.
///
/// Any malformed content is fatal; the trainer aborts rather than skipping
/// rows.
pub fn load_csv(path: &Path) -> Result<LabeledDataset, DatasetLoadError> {
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    let header = loop {
        match lines.next() {
            Some(line) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Err(DatasetLoadError::MissingHeader),
        }
    };
    let columns: Vec<String> = header
        .split(',')
        .map(|name| name.trim().to_string())
        .collect();
    let target_idx = column_index(&columns, TARGET_COLUMN)?;
    let mut feature_idx = [0usize; FEATURE_DIM];
    for (slot, name) in feature_idx.iter_mut().zip(FEATURE_NAMES.iter()) {
        *slot = column_index(&columns, name)?;
    }

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (offset, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1 of the file.
        let line_no = offset + 2;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.len() {
            return Err(DatasetLoadError::RaggedRow {
                line: line_no,
                expected: columns.len(),
                found: fields.len(),
            });
        }

        let mut row = Vec::with_capacity(FEATURE_DIM);
        for (&idx, name) in feature_idx.iter().zip(FEATURE_NAMES.iter()) {
            let raw = fields[idx];
            let value: f32 =
                raw.parse()
                    .map_err(|_| DatasetLoadError::InvalidNumber {
                        line: line_no,
                        column: (*name).to_string(),
                        value: raw.to_string(),
                    })?;
            if !value.is_finite() {
                return Err(DatasetLoadError::InvalidNumber {
                    line: line_no,
                    column: (*name).to_string(),
                    value: raw.to_string(),
                });
            }
            row.push(value);
        }
        y.push(parse_target(fields[target_idx], line_no)?);
        x.push(row);
    }

    if x.is_empty() {
        return Err(DatasetLoadError::Empty);
    }
    Ok(LabeledDataset { x, y })
}

fn column_index(columns: &[String], name: &str) -> Result<usize, DatasetLoadError> {
    columns
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| DatasetLoadError::MissingColumn(name.to_string()))
}

fn parse_target(raw: &str, line: usize) -> Result<u8, DatasetLoadError> {
    let invalid = || DatasetLoadError::InvalidTarget {
        line,
        value: raw.to_string(),
    };
    let value: f32 = raw.parse().map_err(|_| invalid())?;
    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(invalid())
    }
}
