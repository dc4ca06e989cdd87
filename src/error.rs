use std::path::PathBuf;
use thiserror::Error;

/// The main error type for iouscore operations.
///
/// Degenerate geometry (zero-area boxes, empty masks, zero union) is never
/// an error; metrics resolve it to a documented fallback value instead.
#[derive(Debug, Error)]
pub enum IouScoreError {
    #[error("Shape mismatch: {}x{} vs {}x{}", left.0, left.1, right.0, right.1)]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Ragged mask: row {row} has {found} cell(s), expected {expected}")]
    RaggedMask {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Mask buffer of {len} cell(s) does not fit shape {rows}x{cols}")]
    InvalidMaskBuffer { rows: usize, cols: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML from {path}: {source}")]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse CSV from {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Non-finite box coordinate in {path}, pair #{pair}")]
    NonFiniteBox { path: PathBuf, pair: usize },

    #[error("Failed to write JSON report: {source}")]
    JsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl IouScoreError {
    pub(crate) fn shape_mismatch(left: (usize, usize), right: (usize, usize)) -> Self {
        Self::ShapeMismatch { left, right }
    }
}
