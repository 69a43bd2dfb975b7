//! Structured (JSON) reader.
//!
//! The JSON export is already long format: an array of objects with keys
//! `unit`, `sex`, `age`, `country`, `year`, `life_expectancy`. Reading renames
//! `country`→`region` and `life_expectancy`→`value`, coerces `year` to an
//! integer and `value` to a float using the same rule as the cleaning
//! transform, and drops rows whose value is missing or uncoercible.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::processing::clean::parse_value_text;
use crate::types::{DataSet, DataType, Field, Schema, Value};

const STRING_FIELDS: [&str; 3] = ["unit", "sex", "age"];

/// Read a JSON file into the long-format [`DataSet`].
pub fn read_json_from_path(path: impl AsRef<Path>) -> PipelineResult<DataSet> {
    let text = fs::read_to_string(path)?;
    read_json_from_str(&text)
}

/// Read JSON from an in-memory string into the long-format [`DataSet`].
pub fn read_json_from_str(input: &str) -> PipelineResult<DataSet> {
    let document: serde_json::Value = serde_json::from_str(input)?;
    let items = document
        .as_array()
        .ok_or_else(|| PipelineError::Schema {
            message: "json input must be an array of objects".to_string(),
        })?;

    let schema = Schema::new(vec![
        Field::new("unit", DataType::Utf8),
        Field::new("sex", DataType::Utf8),
        Field::new("age", DataType::Utf8),
        Field::new("region", DataType::Utf8),
        Field::new("year", DataType::Int64),
        Field::new("value", DataType::Float64),
    ]);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(items.len());
    for (idx0, item) in items.iter().enumerate() {
        let row_num = idx0 + 1;
        let obj = item
            .as_object()
            .ok_or_else(|| PipelineError::Schema {
                message: format!("row {row_num} is not a json object"),
            })?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for name in STRING_FIELDS {
            let field = require_field(obj, name, row_num)?;
            let text = field.as_str().ok_or_else(|| PipelineError::Schema {
                message: format!("row {row_num}: field '{name}' is not a string"),
            })?;
            row.push(Value::Utf8(text.to_string()));
        }

        // country → region
        let country = require_field(obj, "country", row_num)?;
        let region = country.as_str().ok_or_else(|| PipelineError::Schema {
            message: format!("row {row_num}: field 'country' is not a string"),
        })?;
        row.push(Value::Utf8(region.to_string()));

        row.push(Value::Int64(coerce_year(
            require_field(obj, "year", row_num)?,
        )?));

        // life_expectancy → value; unparsable values drop the row here, same
        // policy as the cleaning transform.
        let Some(value) = coerce_value(require_field(obj, "life_expectancy", row_num)?) else {
            continue;
        };
        row.push(Value::Float64(value));

        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

fn require_field<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    name: &str,
    row_num: usize,
) -> PipelineResult<&'a serde_json::Value> {
    obj.get(name).ok_or_else(|| PipelineError::Schema {
        message: format!("row {row_num} missing required field '{name}'"),
    })
}

fn coerce_year(v: &serde_json::Value) -> PipelineResult<i64> {
    if let Some(year) = v.as_i64() {
        return Ok(year);
    }
    if let Some(text) = v.as_str() {
        if let Ok(year) = text.trim().parse::<i64>() {
            return Ok(year);
        }
    }
    Err(PipelineError::TypeConversion {
        column: "year".to_string(),
        raw: v.to_string(),
    })
}

fn coerce_value(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => parse_value_text(text),
        other => other
            .as_f64()
            .filter(|value| value.is_finite() && *value >= 0.0),
    }
}
