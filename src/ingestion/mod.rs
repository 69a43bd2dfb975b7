//! Format selection and the two readers.
//!
//! Most callers should use [`read_table`], which:
//!
//! - infers the [`SourceFormat`] from the file extension (case-insensitive)
//! - dispatches to the matching reader ([`tsv`] or [`json`])
//! - fails with [`PipelineError::UnsupportedFormat`] for anything else, before
//!   touching the file
//!
//! Both readers converge on the long-format schema
//! `{unit, sex, age, region, year, value}`; the TSV path leaves `year`/`value`
//! as raw text for the cleaning transform, the JSON path coerces them at read
//! time.

pub mod json;
pub mod tsv;

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Tab-separated wide format (compound key column + one column per year).
    Tsv,
    /// JSON array-of-objects, already long format.
    Json,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsv" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Read an input file into a long-format [`DataSet`], choosing the reader by
/// file extension.
pub fn read_table(path: impl AsRef<Path>) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    let format = infer_format_from_path(path)?;
    match format {
        SourceFormat::Tsv => tsv::read_tsv_from_path(path),
        SourceFormat::Json => json::read_json_from_path(path),
    }
}

fn infer_format_from_path(path: &Path) -> PipelineResult<SourceFormat> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    SourceFormat::from_extension(ext).ok_or_else(|| PipelineError::UnsupportedFormat {
        extension: ext.to_string(),
    })
}
