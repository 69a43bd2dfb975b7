//! Orchestration: read → clean → save.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::PipelineResult;
use crate::ingestion;
use crate::persistence;
use crate::processing;
use crate::region::Region;

/// Explicit configuration for a pipeline run.
///
/// The data directory is passed in rather than hard-coded so tests can point a
/// run at a temporary directory.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the input file and receiving the output file.
    pub data_dir: PathBuf,
}

impl PipelineConfig {
    /// Create a config rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

/// Run the whole pipeline for one region and one input file name.
///
/// The reader is selected by the file's extension; every error propagates
/// unchanged (no wrapping, no retry). Returns the path of the written output.
pub fn run(
    config: &PipelineConfig,
    region: Region,
    input_file_name: &str,
) -> PipelineResult<PathBuf> {
    let input_path = config.data_dir.join(input_file_name);
    debug!(path = %input_path.display(), "reading input table");

    let table = ingestion::read_table(&input_path)?;
    debug!(rows = table.row_count(), "ingested long-format table");

    let cleaned = processing::clean(&table, region)?;
    info!(
        region = region.code(),
        rows = cleaned.row_count(),
        "cleaned and filtered"
    );

    let out_path = persistence::save(&cleaned, region, &config.data_dir)?;
    info!(path = %out_path.display(), "wrote output");
    Ok(out_path)
}
