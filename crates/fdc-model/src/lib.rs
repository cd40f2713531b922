//! FoodData Central consolidation data model.
//!
//! Typed records for the four source tables, the pivoted [`NutrientMatrix`],
//! the denormalized [`ConsolidatedTable`], and the options and warnings that
//! travel with a consolidation run.

pub mod format;
pub mod ids;
pub mod matrix;
pub mod options;
pub mod records;
pub mod table;
pub mod warning;

pub use format::{ExportFormat, UnsupportedFormatError};
pub use ids::{FoodId, NutrientId};
pub use matrix::NutrientMatrix;
pub use options::{
    BRANDED_FOOD_FILE, CollisionPolicy, ConsolidationOptions, DEFAULT_BRAND_COLUMNS, FOOD_FILE,
    FOOD_NUTRIENT_FILE, NUTRIENT_FILE, SourcePaths,
};
pub use records::{
    BrandTable, DATA_TYPE_COLUMN, DESCRIPTION_COLUMN, FOOD_ID_COLUMN, FoodDataType, FoodRecord,
    FoodTable, MeasurementRecord, NutrientDefinition, NutrientDefinitions,
    PUBLICATION_DATE_COLUMN, UnknownDataTypeError,
};
pub use table::{CellValue, ColumnKey, ConsolidatedTable, TableColumn, label_key};
pub use warning::ConsolidationWarning;
