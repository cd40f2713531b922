//! Non-fatal findings reported alongside a consolidated table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::NutrientId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsolidationWarning {
    /// An excluded data type is not part of the known vocabulary and was ignored.
    UnknownDataType { name: String },
    /// Several nutrient columns translate to the same display name.
    NameCollision {
        name: String,
        nutrient_ids: Vec<NutrientId>,
        /// Labels given to the colliding columns, in `nutrient_ids` order.
        resolved_labels: Vec<String>,
    },
    /// A nutrient id has no definition and keeps its numeric label.
    UntranslatedNutrient { nutrient_id: NutrientId },
    /// A nutrient definition exists but its name is blank; the numeric label is kept.
    BlankNutrientName { nutrient_id: NutrientId },
    /// Food ids present only in the brand table entered the result without
    /// descriptive or nutrient data.
    BrandOnlyRows { count: usize },
}

impl ConsolidationWarning {
    /// Short machine-friendly category.
    pub fn code(&self) -> &'static str {
        match self {
            ConsolidationWarning::UnknownDataType { .. } => "unknown-data-type",
            ConsolidationWarning::NameCollision { .. } => "name-collision",
            ConsolidationWarning::UntranslatedNutrient { .. } => "untranslated-nutrient",
            ConsolidationWarning::BlankNutrientName { .. } => "blank-nutrient-name",
            ConsolidationWarning::BrandOnlyRows { .. } => "brand-only-rows",
        }
    }
}

impl fmt::Display for ConsolidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsolidationWarning::UnknownDataType { name } => {
                write!(f, "ignored unknown data type '{name}'")
            }
            ConsolidationWarning::NameCollision {
                name,
                nutrient_ids,
                resolved_labels,
            } => {
                let ids: Vec<String> = nutrient_ids.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "nutrients {} share the name '{name}'; labelled {}",
                    ids.join(", "),
                    resolved_labels.join(", ")
                )
            }
            ConsolidationWarning::UntranslatedNutrient { nutrient_id } => {
                write!(f, "nutrient {nutrient_id} has no definition; kept numeric label")
            }
            ConsolidationWarning::BlankNutrientName { nutrient_id } => {
                write!(f, "nutrient {nutrient_id} is defined with a blank name; kept numeric label")
            }
            ConsolidationWarning::BrandOnlyRows { count } => write!(
                f,
                "{count} food(s) present only in brand data were added without description or nutrient values"
            ),
        }
    }
}
