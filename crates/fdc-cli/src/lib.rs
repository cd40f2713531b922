//! CLI components for the FoodData Central consolidator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
