//! CSV output for the cleaned table.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{PipelineError, PipelineResult};
use crate::region::Region;
use crate::types::{DataSet, Value};

/// One serialized output row. Field order is the output column order.
#[derive(Debug, Serialize)]
struct ObservationRow<'a> {
    unit: &'a str,
    sex: &'a str,
    age: &'a str,
    region: &'a str,
    year: i64,
    value: f64,
}

/// Output column order, also used as the header when the table has no rows.
const OUTPUT_COLUMNS: [&str; 6] = ["unit", "sex", "age", "region", "year", "value"];

/// The output file name for a region: `<code lower-cased>_life_expectancy.csv`.
pub fn output_file_name(region: Region) -> String {
    format!("{}_life_expectancy.csv", region.code().to_lowercase())
}

/// Write the cleaned table as comma-separated text under `data_dir`.
///
/// The header is `unit,sex,age,region,year,value` with no index column. The
/// file is written to a temporary sibling first and renamed into place, so a
/// failed run never leaves a truncated output behind. Returns the final path.
///
/// The table must have the cleaned shape (`year` as Int64, `value` as Float64);
/// anything else is a [`PipelineError::Schema`].
pub fn save(dataset: &DataSet, region: Region, data_dir: impl AsRef<Path>) -> PipelineResult<PathBuf> {
    let data_dir = data_dir.as_ref();
    let out_path = data_dir.join(output_file_name(region));

    let field_names: Vec<&str> = dataset.schema.field_names().collect();
    let tmp = NamedTempFile::new_in(data_dir)?;
    {
        let mut wtr = csv::Writer::from_path(tmp.path())?;
        // `serialize` emits the header from the struct field names; an empty
        // table still gets its header row.
        if dataset.rows.is_empty() {
            wtr.write_record(OUTPUT_COLUMNS)?;
        }
        for (row_idx, row) in dataset.rows.iter().enumerate() {
            wtr.serialize(observation_row(&field_names, row, row_idx)?)?;
        }
        wtr.flush()?;
    }
    tmp.persist(&out_path)
        .map_err(|e| PipelineError::Io(e.error))?;

    Ok(out_path)
}

fn observation_row<'a>(
    field_names: &[&str],
    row: &'a [Value],
    row_idx: usize,
) -> PipelineResult<ObservationRow<'a>> {
    let cell = |name: &str| -> PipelineResult<&'a Value> {
        let idx = field_names
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| PipelineError::Schema {
                message: format!("cleaned table is missing column '{name}'"),
            })?;
        row.get(idx).ok_or_else(|| PipelineError::Schema {
            message: format!("row {row_idx} is shorter than the schema"),
        })
    };
    let text = |name: &str| -> PipelineResult<&'a str> {
        cell(name)?.as_utf8().ok_or_else(|| PipelineError::Schema {
            message: format!("row {row_idx}: column '{name}' is not text"),
        })
    };

    Ok(ObservationRow {
        unit: text("unit")?,
        sex: text("sex")?,
        age: text("age")?,
        region: text("region")?,
        year: cell("year")?.as_i64().ok_or_else(|| PipelineError::Schema {
            message: format!("row {row_idx}: column 'year' is not an integer"),
        })?,
        value: cell("value")?.as_f64().ok_or_else(|| PipelineError::Schema {
            message: format!("row {row_idx}: column 'value' is not a float"),
        })?,
    })
}
