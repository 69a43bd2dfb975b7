//! In-memory transforms over [`crate::types::DataSet`].
//!
//! - [`reshape::wide_to_long`]: splits the compound `unit,sex,age,region` key
//!   column and pivots one-column-per-year data into one-row-per-year data.
//!   A no-op on tables that already carry a `year` column.
//! - [`clean::clean`]: the full cleaning transform: reshape if needed, coerce
//!   `year`, strip value annotations, drop unparsable rows, filter to one region.
//!
//! ## Example: wide row to cleaned rows
//!
//! ```rust
//! use eu_life_expectancy::processing::clean::clean;
//! use eu_life_expectancy::region::Region;
//! use eu_life_expectancy::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("unit,sex,age,geo\\time", DataType::Utf8),
//!     Field::new("2010", DataType::Utf8),
//!     Field::new("2011", DataType::Utf8),
//! ]);
//! let wide = DataSet::new(
//!     schema,
//!     vec![vec![
//!         Value::Utf8("YR,F,Y1,PT".to_string()),
//!         Value::Utf8("70.1".to_string()),
//!         Value::Utf8("70.5 e".to_string()),
//!     ]],
//! );
//!
//! let cleaned = clean(&wide, Region::PT).unwrap();
//! assert_eq!(cleaned.row_count(), 2);
//! assert_eq!(cleaned.rows[0][4], Value::Int64(2010));
//! assert_eq!(cleaned.rows[1][5], Value::Float64(70.5));
//! ```

pub mod clean;
pub mod reshape;

pub use clean::clean;
pub use reshape::wide_to_long;
