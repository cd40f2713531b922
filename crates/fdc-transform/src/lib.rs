//! Table transforms for FoodData Central consolidation.
//!
//! Each stage consumes its input and returns a new value:
//!
//! - [`pivot`]: long measurements to a wide [`fdc_model::NutrientMatrix`]
//! - [`filter_food_types`]: drop foods by data type
//! - [`join_foods_with_nutrients`]: inner join into a consolidated table
//! - [`translate_nutrients`]: relabel nutrient columns by name
//! - [`join_brand_data`]: outer join of brand attributes

pub mod brand;
pub mod error;
pub mod filter;
pub mod join;
pub mod pivot;
pub mod translate;

pub use brand::{BrandJoin, join_brand_data};
pub use error::{Result, TransformError};
pub use filter::filter_food_types;
pub use join::join_foods_with_nutrients;
pub use pivot::pivot;
pub use translate::{Translation, suffixed_label, translate_nutrients};
