//! FoodData Central consolidation entry point.
//!
//! [`consolidate`] runs the full pipeline over a set of [`SourcePaths`] and
//! returns the one-row-per-food table together with warnings and stage
//! statistics.
//!
//! # Example
//!
//! ```ignore
//! use fdc_core::consolidate;
//! use fdc_model::{ConsolidationOptions, SourcePaths};
//!
//! let sources = SourcePaths::in_dir("FoodData_Central_csv");
//! let result = consolidate(&sources, &ConsolidationOptions::default())?;
//! println!("{} foods", result.table.len());
//! ```
//!
//! [`SourcePaths`]: fdc_model::SourcePaths

pub mod error;
pub mod pipeline;

pub use error::{ConsolidateError, Result};
pub use pipeline::{Consolidation, ConsolidationStats, consolidate, partition_data_types};
