//! Configuration values for a consolidation run.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Conventional file name of the food table.
pub const FOOD_FILE: &str = "food.csv";
/// Conventional file name of the per-food nutrient measurements.
pub const FOOD_NUTRIENT_FILE: &str = "food_nutrient.csv";
/// Conventional file name of the nutrient definitions.
pub const NUTRIENT_FILE: &str = "nutrient.csv";
/// Conventional file name of the branded food metadata.
pub const BRANDED_FOOD_FILE: &str = "branded_food.csv";

/// Brand columns merged when none are configured explicitly.
pub const DEFAULT_BRAND_COLUMNS: [&str; 3] = ["brand_owner", "ingredients", "market_country"];

/// Locations of the four source tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    pub food: PathBuf,
    pub food_nutrient: PathBuf,
    pub nutrient: PathBuf,
    pub branded_food: PathBuf,
}

impl SourcePaths {
    /// Conventional FoodData Central CSV layout inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            food: dir.join(FOOD_FILE),
            food_nutrient: dir.join(FOOD_NUTRIENT_FILE),
            nutrient: dir.join(NUTRIENT_FILE),
            branded_food: dir.join(BRANDED_FOOD_FILE),
        }
    }

    #[must_use]
    pub fn with_food(mut self, path: impl Into<PathBuf>) -> Self {
        self.food = path.into();
        self
    }

    #[must_use]
    pub fn with_food_nutrient(mut self, path: impl Into<PathBuf>) -> Self {
        self.food_nutrient = path.into();
        self
    }

    #[must_use]
    pub fn with_nutrient(mut self, path: impl Into<PathBuf>) -> Self {
        self.nutrient = path.into();
        self
    }

    #[must_use]
    pub fn with_branded_food(mut self, path: impl Into<PathBuf>) -> Self {
        self.branded_food = path.into();
        self
    }
}

/// What to do when two nutrient columns translate to the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Relabel every colliding column as `"{name} ({nutrient_id})"`.
    #[default]
    Suffix,
    /// Fail the translation.
    Reject,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Suffix => f.write_str("suffix"),
            CollisionPolicy::Reject => f.write_str("reject"),
        }
    }
}

/// Options controlling which rows and columns end up in the consolidated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationOptions {
    /// Rename nutrient columns from ids to nutrient names.
    pub translate_nutrients: bool,

    /// Food data types to drop before joining.
    ///
    /// Names outside the known vocabulary are ignored (and reported).
    pub excluded_data_types: BTreeSet<String>,

    /// Outer-join the brand table onto the result.
    pub include_brand_data: bool,

    /// Brand columns to merge, in output order.
    pub brand_columns: Vec<String>,

    /// Resolution for nutrient name collisions.
    pub collision_policy: CollisionPolicy,
}

impl Default for ConsolidationOptions {
    fn default() -> Self {
        Self {
            translate_nutrients: true,
            excluded_data_types: BTreeSet::new(),
            include_brand_data: false,
            brand_columns: DEFAULT_BRAND_COLUMNS.iter().map(ToString::to_string).collect(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl ConsolidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_translate_nutrients(mut self, enable: bool) -> Self {
        self.translate_nutrients = enable;
        self
    }

    #[must_use]
    pub fn with_excluded_data_types<I, S>(mut self, data_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_data_types = data_types.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_brand_data(mut self, enable: bool) -> Self {
        self.include_brand_data = enable;
        self
    }

    #[must_use]
    pub fn with_brand_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brand_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_paths_follow_conventional_layout() {
        let paths = SourcePaths::in_dir("data");
        assert_eq!(paths.food, Path::new("data").join("food.csv"));
        assert_eq!(paths.food_nutrient, Path::new("data").join("food_nutrient.csv"));
        assert_eq!(paths.nutrient, Path::new("data").join("nutrient.csv"));
        assert_eq!(paths.branded_food, Path::new("data").join("branded_food.csv"));

        let overridden = paths.with_food("elsewhere/foods.csv");
        assert_eq!(overridden.food, PathBuf::from("elsewhere/foods.csv"));
    }

    #[test]
    fn defaults_translate_and_skip_brand_data() {
        let options = ConsolidationOptions::default();
        assert!(options.translate_nutrients);
        assert!(!options.include_brand_data);
        assert!(options.excluded_data_types.is_empty());
        assert_eq!(
            options.brand_columns,
            vec!["brand_owner", "ingredients", "market_country"]
        );
        assert_eq!(options.collision_policy, CollisionPolicy::Suffix);
    }
}
