//! Error types for table transforms.

use fdc_model::{FoodId, NutrientId};
use thiserror::Error;

/// Errors raised while reshaping or relabelling tables.
#[derive(Debug, Error)]
pub enum TransformError {
    /// More than one measurement names the same food and nutrient.
    #[error(
        "duplicate measurement: food {food_id} has {occurrences} amounts for nutrient {nutrient_id}"
    )]
    DuplicateMeasurement {
        food_id: FoodId,
        nutrient_id: NutrientId,
        occurrences: usize,
    },

    /// Several nutrient columns translate to one name and collisions are rejected.
    #[error("nutrient name collision: '{name}' is shared by nutrients {}", join_ids(.nutrient_ids))]
    NameCollision {
        name: String,
        nutrient_ids: Vec<NutrientId>,
    },

    /// The output table would carry the same column label twice.
    #[error("duplicate column label '{label}'")]
    DuplicateColumn { label: String },
}

fn join_ids(ids: &[NutrientId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
