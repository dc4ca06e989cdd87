//! Readers for box-pair and mask-pair input files.
//!
//! # Box pairs
//!
//! CSV files carry one pair per row under the header
//! `id,a_x1,a_y1,a_x2,a_y2,b_x1,b_y1,b_x2,b_y2`. The `id` column may be
//! blank or left out entirely.
//!
//! JSON and YAML files hold a list of pairs:
//!
//! ```json
//! [
//!   {"id": "cat", "a": [0, 0, 2, 2], "b": [1, 1, 3, 3]},
//!   {"a": [0, 0, 2, 2], "b": [3, 3, 5, 5]}
//! ]
//! ```
//!
//! # Mask pairs
//!
//! A JSON or YAML document with two nested row lists; nonzero cells are on:
//!
//! ```json
//! {"a": [[1, 1, 0], [1, 1, 0]], "b": [[0, 1, 1], [0, 1, 1]]}
//! ```
//!
//! The format is chosen from the file extension. Box coordinates must be
//! finite; a NaN or infinite value is rejected with
//! [`IouScoreError::NonFiniteBox`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::IouScoreError;
use crate::geom::BBoxXYXY;
use crate::score::{BoxPair, MaskPair};

/// Input file formats, chosen by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    Yaml,
}

impl InputFormat {
    /// Infers the format from `path`'s extension (case-insensitive).
    ///
    /// # Errors
    /// [`IouScoreError::UnsupportedFormat`] for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self, IouScoreError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(IouScoreError::UnsupportedFormat(format!(
                "cannot infer input format from '{}' (expected .csv, .json, .yaml or .yml)",
                path.display()
            ))),
        }
    }
}

/// A single CSV row, flattened from a [`BoxPair`].
#[derive(Debug, Deserialize)]
struct BoxPairRow {
    #[serde(default)]
    id: Option<String>,
    a_x1: f64,
    a_y1: f64,
    a_x2: f64,
    a_y2: f64,
    b_x1: f64,
    b_y1: f64,
    b_x2: f64,
    b_y2: f64,
}

impl From<BoxPairRow> for BoxPair {
    fn from(row: BoxPairRow) -> Self {
        Self {
            id: row.id.filter(|id| !id.is_empty()),
            a: BBoxXYXY::from_xyxy(row.a_x1, row.a_y1, row.a_x2, row.a_y2),
            b: BBoxXYXY::from_xyxy(row.b_x1, row.b_y1, row.b_x2, row.b_y2),
        }
    }
}

/// Reads box pairs from a CSV, JSON or YAML file.
///
/// # Example
///
/// ```no_run
/// use std::path::{Path, PathBuf};
/// use iouscore::io::read_box_pairs;
///
/// let pairs = read_box_pairs(Path::new("pairs.csv"))?;
/// # Ok::<(), iouscore::IouScoreError>(())
/// ```
pub fn read_box_pairs(path: &Path) -> Result<Vec<BoxPair>, IouScoreError> {
    let format = InputFormat::from_path(path)?;
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let pairs: Vec<BoxPair> = match format {
        InputFormat::Csv => box_pairs_from_csv_reader(reader, path)?,
        InputFormat::Json => {
            serde_json::from_reader(reader).map_err(|source| IouScoreError::JsonParse {
                path: path.to_path_buf(),
                source,
            })?
        }
        InputFormat::Yaml => {
            serde_yaml::from_reader(reader).map_err(|source| IouScoreError::YamlParse {
                path: path.to_path_buf(),
                source,
            })?
        }
    };
    ensure_finite(&pairs, path)?;

    debug!(path = %path.display(), ?format, pairs = pairs.len(), "loaded box pairs");
    Ok(pairs)
}

/// Reads one mask pair from a JSON or YAML file.
///
/// # Errors
/// [`IouScoreError::UnsupportedFormat`] for CSV or unknown extensions; a
/// parse error for malformed documents, including ragged rows.
pub fn read_mask_pair(path: &Path) -> Result<MaskPair, IouScoreError> {
    let format = InputFormat::from_path(path)?;
    if format == InputFormat::Csv {
        return Err(IouScoreError::UnsupportedFormat(format!(
            "mask pairs must be JSON or YAML, got '{}'",
            path.display()
        )));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let pair: MaskPair = if format == InputFormat::Json {
        serde_json::from_reader(reader).map_err(|source| IouScoreError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_reader(reader).map_err(|source| IouScoreError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?
    };

    debug!(
        path = %path.display(),
        a = ?pair.a.shape(),
        b = ?pair.b.shape(),
        "loaded mask pair"
    );
    Ok(pair)
}

/// Reads box pairs from a CSV string.
pub fn box_pairs_from_csv_str(csv_str: &str) -> Result<Vec<BoxPair>, IouScoreError> {
    box_pairs_from_csv_slice(csv_str.as_bytes())
}

/// Reads box pairs from CSV bytes without requiring UTF-8 upfront.
pub fn box_pairs_from_csv_slice(bytes: &[u8]) -> Result<Vec<BoxPair>, IouScoreError> {
    box_pairs_from_csv_reader(bytes, Path::new("<bytes>"))
}

/// Reads box pairs from a JSON string.
pub fn box_pairs_from_json_str(json: &str) -> Result<Vec<BoxPair>, IouScoreError> {
    let path = Path::new("<string>");
    let pairs: Vec<BoxPair> =
        serde_json::from_str(json).map_err(|source| IouScoreError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    ensure_finite(&pairs, path)?;
    Ok(pairs)
}

/// Reads box pairs from a YAML string.
pub fn box_pairs_from_yaml_str(yaml: &str) -> Result<Vec<BoxPair>, IouScoreError> {
    let path = Path::new("<string>");
    let pairs: Vec<BoxPair> =
        serde_yaml::from_str(yaml).map_err(|source| IouScoreError::YamlParse {
            path: path.to_path_buf(),
            source,
        })?;
    ensure_finite(&pairs, path)?;
    Ok(pairs)
}

/// Reads a mask pair from a JSON string.
pub fn mask_pair_from_json_str(json: &str) -> Result<MaskPair, IouScoreError> {
    mask_pair_from_json_slice(json.as_bytes())
}

/// Reads a mask pair from JSON bytes.
pub fn mask_pair_from_json_slice(bytes: &[u8]) -> Result<MaskPair, IouScoreError> {
    serde_json::from_slice(bytes).map_err(|source| IouScoreError::JsonParse {
        path: Path::new("<bytes>").to_path_buf(),
        source,
    })
}

fn box_pairs_from_csv_reader<R: std::io::Read>(
    reader: R,
    path: &Path,
) -> Result<Vec<BoxPair>, IouScoreError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut pairs = Vec::new();

    for result in csv_reader.deserialize() {
        let row: BoxPairRow = result.map_err(|source| IouScoreError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        pairs.push(BoxPair::from(row));
    }

    ensure_finite(&pairs, path)?;
    Ok(pairs)
}

/// Rejects the first pair (numbered from 1) holding a NaN or infinite
/// coordinate.
fn ensure_finite(pairs: &[BoxPair], path: &Path) -> Result<(), IouScoreError> {
    match pairs
        .iter()
        .position(|pair| !(pair.a.is_finite() && pair.b.is_finite()))
    {
        Some(index) => Err(IouScoreError::NonFiniteBox {
            path: PathBuf::from(path),
            pair: index + 1,
        }),
        None => Ok(()),
    }
}

/// Parses mask-pair JSON and, when it parses, scores it.
#[cfg(feature = "fuzzing")]
pub fn fuzz_score_mask_pair_json(bytes: &[u8]) -> Result<(), IouScoreError> {
    let pair = mask_pair_from_json_slice(bytes)?;
    let _ = crate::score::score_mask_pair(&pair, &crate::MetricParams::default())?;
    let _ = crate::pixel::directed_hausdorff(&pair.a, &pair.b);
    Ok(())
}

/// Parses box-pair CSV and, when it parses, scores it.
#[cfg(feature = "fuzzing")]
pub fn fuzz_score_box_pairs_csv(bytes: &[u8]) -> Result<(), IouScoreError> {
    let pairs = box_pairs_from_csv_slice(bytes)?;
    let _ = crate::score::score_box_pairs(&pairs, &crate::MetricParams::default());
    Ok(())
}
