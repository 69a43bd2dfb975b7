//! Delimited wide-format reader.
//!
//! The raw Eurostat export is tab-separated: the first column holds the
//! compound key `"<unit>,<sex>,<age>,<region>"` and every remaining column is
//! a year. Reading pivots that into the long-format schema via
//! [`reshape::wide_to_long`]; `year` and `value` stay raw text so the cleaning
//! transform owns all coercion.

use std::path::Path;

use crate::error::PipelineResult;
use crate::processing::reshape;
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Read a tab-separated wide file and pivot it into long format.
pub fn read_tsv_from_path(path: impl AsRef<Path>) -> PipelineResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let wide = read_wide_from_reader(&mut rdr)?;
    reshape::wide_to_long(&wide)
}

/// Read the wide table from an existing CSV reader, without pivoting.
///
/// Cell text is preserved verbatim (no trimming) so that value annotations
/// and padding survive until the cleaning transform decides what to do with
/// them. Short records read missing cells as empty text.
pub fn read_wide_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> PipelineResult<DataSet> {
    let headers = rdr.headers()?.clone();
    let schema = Schema::new(
        headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8))
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = (0..headers.len())
            .map(|idx| Value::Utf8(record.get(idx).unwrap_or("").to_string()))
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}
