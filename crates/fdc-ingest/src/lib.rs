//! FoodData Central source ingestion.
//!
//! This crate loads the delimited FoodData Central tables into memory and
//! decodes them into the typed records of `fdc-model`.
//!
//! # Features
//!
//! - **Table loading**: keyed, projected loading with schema validation
//!   ([`load_table`], [`read_table`])
//! - **Typed sources**: food, measurement, nutrient and brand decoders
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fdc_ingest::{load_foods, load_measurements};
//!
//! let foods = load_foods(Path::new("data/food.csv"))?;
//! let measurements = load_measurements(Path::new("data/food_nutrient.csv"))?;
//! ```

mod csv;
mod error;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Loading ===
pub use self::csv::{CsvHeaders, Table, TableRow, TableSpec, load_table, read_table};

// === Typed Sources ===
pub use sources::{
    AMOUNT_COLUMN, MEASUREMENT_NUTRIENT_COLUMN, NUTRIENT_ID_COLUMN, brand_value_columns,
    decode_brands, decode_foods, decode_measurements, decode_nutrients, load_brands, load_foods,
    load_measurements, load_nutrients,
};
