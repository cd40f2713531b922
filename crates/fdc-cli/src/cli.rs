//! CLI argument definitions for the FoodData Central consolidator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use fdc_model::{CollisionPolicy, ConsolidationOptions, DEFAULT_BRAND_COLUMNS, SourcePaths};

#[derive(Parser)]
#[command(
    name = "fdc-consolidate",
    version,
    about = "USDA FoodData Central combining and export tool",
    long_about = "Combine the USDA FoodData Central CSV tables into one row per food.\n\n\
                  Nutrient amounts are pivoted into columns, joined with food descriptions,\n\
                  optionally labelled by nutrient name and extended with branded food data.\n\
                  Exports CSV, JSON, SpreadsheetML, SQLite and Parquet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Consolidate the source tables and write the requested exports.
    Export(ExportArgs),

    /// List the known FoodData Central data types.
    DataTypes,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Directory holding the FoodData Central CSV files.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Path to food.csv (default: <DATA_DIR>/food.csv).
    #[arg(long = "food-db-path", value_name = "PATH")]
    pub food_db_path: Option<PathBuf>,

    /// Path to food_nutrient.csv (default: <DATA_DIR>/food_nutrient.csv).
    #[arg(long = "food-nutrient-db-path", value_name = "PATH")]
    pub food_nutrient_db_path: Option<PathBuf>,

    /// Path to nutrient.csv (default: <DATA_DIR>/nutrient.csv).
    #[arg(long = "nutrient-table-path", value_name = "PATH")]
    pub nutrient_table_path: Option<PathBuf>,

    /// Path to branded_food.csv (default: <DATA_DIR>/branded_food.csv).
    #[arg(long = "branded-food-table-path", value_name = "PATH")]
    pub branded_food_table_path: Option<PathBuf>,

    /// Base path of the exported files; each format appends its extension.
    #[arg(
        long = "export-file-name",
        value_name = "PATH",
        default_value = "exported_foods"
    )]
    pub export_file_name: PathBuf,

    /// Export format (csv, json, spreadsheet, relational-dump, binary-serialized).
    /// Repeat for several formats. Defaults to csv.
    #[arg(long = "export-format", value_name = "FORMAT")]
    pub export_formats: Vec<String>,

    /// Label nutrient columns with nutrient names instead of ids.
    #[arg(long = "use-nutrient-names")]
    pub use_nutrient_names: bool,

    /// Exclude a data type (for example branded_food). Repeat for several.
    #[arg(long = "exclude-data-type", value_name = "TYPE")]
    pub exclude_data_types: Vec<String>,

    /// Append columns from branded_food.csv.
    #[arg(long = "include-branded-data")]
    pub include_branded_data: bool,

    /// Comma-separated branded_food.csv columns to append.
    #[arg(
        long = "branded-data-columns",
        value_name = "COLUMNS",
        value_delimiter = ',',
        default_values_t = DEFAULT_BRAND_COLUMNS.map(String::from)
    )]
    pub branded_data_columns: Vec<String>,

    /// What to do when several nutrients share a name.
    #[arg(long = "collision-policy", value_enum, default_value = "suffix")]
    pub collision_policy: CollisionPolicyArg,
}

impl ExportArgs {
    /// Source locations, with explicit paths overriding the data directory layout.
    pub fn source_paths(&self) -> SourcePaths {
        let mut sources = SourcePaths::in_dir(&self.data_dir);
        if let Some(path) = &self.food_db_path {
            sources = sources.with_food(path);
        }
        if let Some(path) = &self.food_nutrient_db_path {
            sources = sources.with_food_nutrient(path);
        }
        if let Some(path) = &self.nutrient_table_path {
            sources = sources.with_nutrient(path);
        }
        if let Some(path) = &self.branded_food_table_path {
            sources = sources.with_branded_food(path);
        }
        sources
    }

    pub fn consolidation_options(&self) -> ConsolidationOptions {
        ConsolidationOptions::new()
            .with_translate_nutrients(self.use_nutrient_names)
            .with_excluded_data_types(self.exclude_data_types.iter().map(|name| name.trim()))
            .with_brand_data(self.include_branded_data)
            .with_brand_columns(self.branded_data_columns.iter().map(|name| name.trim()))
            .with_collision_policy(self.collision_policy.into())
    }
}

/// CLI collision policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum CollisionPolicyArg {
    Suffix,
    Reject,
}

impl From<CollisionPolicyArg> for CollisionPolicy {
    fn from(value: CollisionPolicyArg) -> Self {
        match value {
            CollisionPolicyArg::Suffix => CollisionPolicy::Suffix,
            CollisionPolicyArg::Reject => CollisionPolicy::Reject,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
