//! The cleaning transform: coerce, strip, drop, filter.

use crate::error::{PipelineError, PipelineResult};
use crate::region::Region;
use crate::types::{DataSet, DataType, Field, Schema, Value};

use super::reshape;

/// Clean a life-expectancy table and filter it to one region.
///
/// Steps, in order:
///
/// 1. Reshape wide→long via [`reshape::wide_to_long`] (skipped when a `year`
///    column already exists, so cleaning an already-clean table is a no-op).
/// 2. Coerce `year` to an integer. Year is structurally required, so any
///    uncoercible year is a fatal [`PipelineError::TypeConversion`], not a
///    per-row drop.
/// 3. Normalize `value` text: trim, then drop every character that is not an
///    ASCII digit or `.` (Eurostat appends flags like `e`, `b`, `p` and uses
///    `:` for missing).
/// 4. Parse as a float; failures become missing values, never errors.
/// 5. Drop rows whose value is missing.
/// 6. Keep rows whose region cell equals `region`'s code byte-for-byte. The
///    comparison is deliberately untrimmed and case-sensitive: a padded region
///    cell in the source is excluded, not matched.
///
/// The result has schema `{unit, sex, age, region: Utf8, year: Int64,
/// value: Float64}` with rows in the filtered original order.
pub fn clean(dataset: &DataSet, region: Region) -> PipelineResult<DataSet> {
    let long = reshape::wide_to_long(dataset)?;

    let column = |name: &str| {
        long.schema.index_of(name).ok_or_else(|| PipelineError::Schema {
            message: format!("long table is missing required column '{name}'"),
        })
    };
    let unit_idx = column("unit")?;
    let sex_idx = column("sex")?;
    let age_idx = column("age")?;
    let region_idx = column("region")?;
    let year_idx = column("year")?;
    let value_idx = column("value")?;

    let schema = Schema::new(vec![
        Field::new("unit", DataType::Utf8),
        Field::new("sex", DataType::Utf8),
        Field::new("age", DataType::Utf8),
        Field::new("region", DataType::Utf8),
        Field::new("year", DataType::Int64),
        Field::new("value", DataType::Float64),
    ]);

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for row in &long.rows {
        // Year first: a bad year fails the whole table even on rows that would
        // be dropped or filtered out below.
        let year = coerce_year(row.get(year_idx))?;

        let Some(value) = coerce_value(row.get(value_idx)) else {
            continue;
        };
        let matches_region =
            matches!(row.get(region_idx), Some(Value::Utf8(cell)) if cell == region.code());
        if !matches_region {
            continue;
        }

        rows.push(vec![
            row[unit_idx].clone(),
            row[sex_idx].clone(),
            row[age_idx].clone(),
            row[region_idx].clone(),
            Value::Int64(year),
            Value::Float64(value),
        ]);
    }

    Ok(DataSet::new(schema, rows))
}

/// The shared numeric coercion rule for the `value` column.
///
/// Trims, strips every character that is not an ASCII digit or a decimal point,
/// then parses as `f64`. Returns `None` for anything unparsable (including text
/// that is annotation-only, which strips down to the empty string).
pub fn parse_value_text(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parsed = stripped.parse::<f64>().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

fn coerce_year(cell: Option<&Value>) -> PipelineResult<i64> {
    match cell {
        Some(Value::Int64(year)) => Ok(*year),
        Some(Value::Utf8(label)) => {
            label
                .trim()
                .parse::<i64>()
                .map_err(|_| PipelineError::TypeConversion {
                    column: "year".to_string(),
                    raw: label.clone(),
                })
        }
        other => Err(PipelineError::TypeConversion {
            column: "year".to_string(),
            raw: match other {
                Some(v) => format!("{v:?}"),
                None => String::new(),
            },
        }),
    }
}

fn coerce_value(cell: Option<&Value>) -> Option<f64> {
    match cell {
        Some(Value::Float64(v)) => (v.is_finite() && *v >= 0.0).then_some(*v),
        Some(Value::Int64(v)) => (*v >= 0).then_some(*v as f64),
        Some(Value::Utf8(raw)) => parse_value_text(raw),
        Some(Value::Null) | None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_fixture() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("unit,sex,age,geo\\time", DataType::Utf8),
            Field::new("2010 ", DataType::Utf8),
            Field::new("2011 ", DataType::Utf8),
        ]);
        let rows = vec![
            vec![
                Value::Utf8("YR,F,Y1,PT".to_string()),
                Value::Utf8("70.1 ".to_string()),
                Value::Utf8("70.5 e".to_string()),
            ],
            vec![
                Value::Utf8("YR,F,Y1,ES".to_string()),
                Value::Utf8("72.0 ".to_string()),
                Value::Utf8("73.2 ".to_string()),
            ],
            vec![
                Value::Utf8("YR,M,Y1,PT".to_string()),
                Value::Utf8(": ".to_string()),
                Value::Utf8("68.9 b".to_string()),
            ],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn cleans_wide_input_end_to_end() {
        let cleaned = clean(&wide_fixture(), Region::PT).unwrap();

        let names: Vec<&str> = cleaned.schema.field_names().collect();
        assert_eq!(names, vec!["unit", "sex", "age", "region", "year", "value"]);

        // PT has 4 pivoted rows; the ":" one is dropped.
        assert_eq!(cleaned.row_count(), 3);
        for row in &cleaned.rows {
            assert_eq!(row[3], Value::Utf8("PT".to_string()));
        }
        assert_eq!(cleaned.rows[0][4], Value::Int64(2010));
        assert_eq!(cleaned.rows[0][5], Value::Float64(70.1));
        // "70.5 e" strips to 70.5
        assert_eq!(cleaned.rows[1][5], Value::Float64(70.5));
        // The M row lost its 2010 cell, so its first surviving year is 2011.
        assert_eq!(cleaned.rows[2][4], Value::Int64(2011));
        assert_eq!(cleaned.rows[2][5], Value::Float64(68.9));
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean(&wide_fixture(), Region::PT).unwrap();
        let twice = clean(&once, Region::PT).unwrap();
        assert_eq!(twice, once);
    }

    #[test]
    fn value_annotation_stripping() {
        assert_eq!(parse_value_text("81.2 e"), Some(81.2));
        assert_eq!(parse_value_text("  79.4"), Some(79.4));
        assert_eq!(parse_value_text("57.9 ep"), Some(57.9));
        // Annotation-only cells strip to nothing and are missing, not zero.
        assert_eq!(parse_value_text(": b"), None);
        assert_eq!(parse_value_text(":"), None);
        assert_eq!(parse_value_text(""), None);
    }

    #[test]
    fn uncoercible_year_is_a_hard_failure() {
        let schema = Schema::new(vec![
            Field::new("unit,sex,age,geo\\time", DataType::Utf8),
            Field::new("not_a_year", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![
                Value::Utf8("YR,F,Y1,PT".to_string()),
                Value::Utf8("70.1".to_string()),
            ]],
        );

        let err = clean(&ds, Region::PT).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TypeConversion { ref column, .. } if column == "year"
        ));
    }

    #[test]
    fn region_match_is_exact_and_untrimmed() {
        // A whitespace-padded region cell must be excluded, not normalized into
        // a match. This documents the current strict behavior on purpose.
        let schema = Schema::new(vec![
            Field::new("unit", DataType::Utf8),
            Field::new("sex", DataType::Utf8),
            Field::new("age", DataType::Utf8),
            Field::new("region", DataType::Utf8),
            Field::new("year", DataType::Utf8),
            Field::new("value", DataType::Utf8),
        ]);
        let row = |region: &str| {
            vec![
                Value::Utf8("YR".to_string()),
                Value::Utf8("F".to_string()),
                Value::Utf8("Y1".to_string()),
                Value::Utf8(region.to_string()),
                Value::Utf8("2010".to_string()),
                Value::Utf8("70.1".to_string()),
            ]
        };
        let ds = DataSet::new(schema, vec![row("PT"), row(" PT"), row("pt")]);

        let cleaned = clean(&ds, Region::PT).unwrap();
        assert_eq!(cleaned.row_count(), 1);
        assert_eq!(cleaned.rows[0][3], Value::Utf8("PT".to_string()));
    }

    #[test]
    fn long_table_missing_value_column_is_schema_error() {
        let schema = Schema::new(vec![
            Field::new("unit", DataType::Utf8),
            Field::new("sex", DataType::Utf8),
            Field::new("age", DataType::Utf8),
            Field::new("region", DataType::Utf8),
            Field::new("year", DataType::Utf8),
        ]);
        let ds = DataSet::new(schema, vec![]);

        let err = clean(&ds, Region::PT).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { .. }));
        assert!(err.to_string().contains("value"));
    }
}
