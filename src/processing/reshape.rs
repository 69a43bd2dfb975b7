//! Wide→long pivot for the raw Eurostat table.

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// The four identifier columns produced by splitting the compound key.
pub const ID_FIELDS: [&str; 4] = ["unit", "sex", "age", "region"];

/// Pivot a wide table (compound key column + one column per year) into long form.
///
/// Rules:
///
/// - If the table already has a `year` column it is considered long-format and
///   returned unchanged, which makes the cleaning transform idempotent.
/// - The first column holds the compound key `"<unit>,<sex>,<age>,<region>"`;
///   a key that does not split into exactly four parts fails the whole reshape
///   with [`PipelineError::Schema`].
/// - Every remaining column header is treated as an opaque year label; it is
///   coerced to an integer later, by the cleaning transform.
///
/// Output columns are `unit, sex, age, region, year, value`, all text at this
/// stage. Row order is wide-row order first, then the header's left-to-right
/// year order within each wide row.
pub fn wide_to_long(dataset: &DataSet) -> PipelineResult<DataSet> {
    if dataset.schema.has_field("year") {
        return Ok(dataset.clone());
    }

    let Some(key_field) = dataset.schema.fields.first() else {
        return Err(PipelineError::Schema {
            message: "wide table has no columns".to_string(),
        });
    };
    let key_name = key_field.name.clone();
    let year_labels: Vec<String> = dataset
        .schema
        .fields
        .iter()
        .skip(1)
        .map(|f| f.name.clone())
        .collect();

    let mut fields: Vec<Field> = ID_FIELDS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8))
        .collect();
    fields.push(Field::new("year", DataType::Utf8));
    fields.push(Field::new("value", DataType::Utf8));
    let schema = Schema::new(fields);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(dataset.row_count() * year_labels.len());
    for (row_idx, row) in dataset.rows.iter().enumerate() {
        let key = cell_text(row.first());
        let parts: Vec<&str> = key.split(',').collect();
        if parts.len() != ID_FIELDS.len() {
            return Err(PipelineError::Schema {
                message: format!(
                    "row {}: compound key '{key}' in column '{key_name}' does not split into \
                     exactly {} parts",
                    row_idx + 1,
                    ID_FIELDS.len()
                ),
            });
        }

        for (year_offset, year_label) in year_labels.iter().enumerate() {
            let mut long_row: Vec<Value> = parts
                .iter()
                .map(|part| Value::Utf8((*part).to_string()))
                .collect();
            long_row.push(Value::Utf8(year_label.clone()));
            long_row.push(Value::Utf8(cell_text(row.get(year_offset + 1))));
            rows.push(long_row);
        }
    }

    Ok(DataSet::new(schema, rows))
}

/// Raw text of a cell; missing/null cells read as the empty string.
fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        Some(Value::Utf8(s)) => s.clone(),
        Some(Value::Int64(v)) => v.to_string(),
        Some(Value::Float64(v)) => v.to_string(),
        Some(Value::Null) | None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_two_years() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("unit,sex,age,geo\\time", DataType::Utf8),
            Field::new("2010", DataType::Utf8),
            Field::new("2011", DataType::Utf8),
        ]);
        let rows = vec![
            vec![
                Value::Utf8("YR,F,Y1,PT".to_string()),
                Value::Utf8("70.1".to_string()),
                Value::Utf8("70.5".to_string()),
            ],
            vec![
                Value::Utf8("YR,F,Y1,ES".to_string()),
                Value::Utf8("72.0".to_string()),
                Value::Utf8(": ".to_string()),
            ],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn pivots_each_wide_row_into_one_row_per_year() {
        let long = wide_to_long(&wide_two_years()).unwrap();

        let names: Vec<&str> = long.schema.field_names().collect();
        assert_eq!(names, vec!["unit", "sex", "age", "region", "year", "value"]);
        // 2 wide rows x 2 year columns
        assert_eq!(long.row_count(), 4);

        assert_eq!(
            long.rows[0],
            vec![
                Value::Utf8("YR".to_string()),
                Value::Utf8("F".to_string()),
                Value::Utf8("Y1".to_string()),
                Value::Utf8("PT".to_string()),
                Value::Utf8("2010".to_string()),
                Value::Utf8("70.1".to_string()),
            ]
        );
        // Wide-row order outer, header year order inner.
        assert_eq!(long.rows[1][4], Value::Utf8("2011".to_string()));
        assert_eq!(long.rows[2][3], Value::Utf8("ES".to_string()));
        assert_eq!(long.rows[2][4], Value::Utf8("2010".to_string()));
    }

    #[test]
    fn noop_when_year_column_already_present() {
        let long = wide_to_long(&wide_two_years()).unwrap();
        let again = wide_to_long(&long).unwrap();
        assert_eq!(again, long);
    }

    #[test]
    fn rejects_compound_key_with_wrong_arity() {
        let schema = Schema::new(vec![
            Field::new("unit,sex,age,geo\\time", DataType::Utf8),
            Field::new("2010", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Utf8("YR,F,PT".to_string()),
                Value::Utf8("70.1".to_string()),
            ]],
        );

        let err = wide_to_long(&ds).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("schema mismatch"), "{msg}");
        assert!(msg.contains("YR,F,PT"), "{msg}");
    }

    #[test]
    fn wide_table_without_year_columns_pivots_to_empty() {
        let schema = Schema::new(vec![Field::new("unit,sex,age,geo\\time", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::Utf8("YR,F,Y1,PT".to_string())]]);
        let long = wide_to_long(&ds).unwrap();
        assert_eq!(long.row_count(), 0);
        assert!(long.schema.has_field("year"));
    }
}
