//! `eu-life-expectancy` cleans the Eurostat life expectancy dataset.
//!
//! The pipeline reads one of two input shapes into an in-memory [`types::DataSet`]:
//!
//! - **Wide TSV** (`.tsv`): the raw Eurostat export, with a compound
//!   `unit,sex,age,geo` first column and one column per year.
//! - **JSON** (`.json`): an array of objects already in long form, with keys
//!   `unit`, `sex`, `age`, `country`, `year`, `life_expectancy`.
//!
//! Both converge on the normalized schema `{unit, sex, age, region, year, value}`.
//! Cleaning coerces `year` to an integer, strips the annotation characters that
//! Eurostat appends to values (letters like `e`/`b`/`p`, stray colons), drops rows
//! without a parsable value, and filters to a single [`Region`] code. The result
//! is written as `<data_dir>/<code>_life_expectancy.csv`.
//!
//! ## Quick example
//!
//! ```no_run
//! use eu_life_expectancy::pipeline::{run, PipelineConfig};
//! use eu_life_expectancy::region::Region;
//!
//! # fn main() -> Result<(), eu_life_expectancy::PipelineError> {
//! let config = PipelineConfig::new("data");
//! let out = run(&config, Region::PT, "eu_life_expectancy_raw.tsv")?;
//! println!("wrote {}", out.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format selection and the two readers
//! - [`processing`]: wide→long reshape and the cleaning transform
//! - [`region`]: the closed set of valid country/aggregate codes
//! - [`persistence`]: CSV output
//! - [`pipeline`]: orchestration (read → clean → save)
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: the shared error enum

pub mod error;
pub mod ingestion;
pub mod persistence;
pub mod pipeline;
pub mod processing;
pub mod region;
pub mod types;

pub use error::{PipelineError, PipelineResult};
pub use region::Region;
