//! Typed rows of the four FoodData Central source tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{FoodId, NutrientId};

/// Name of the descriptive `description` column.
pub const DESCRIPTION_COLUMN: &str = "description";
/// Name of the descriptive `data_type` column.
pub const DATA_TYPE_COLUMN: &str = "data_type";
/// Name of the optional descriptive `publication_date` column.
pub const PUBLICATION_DATE_COLUMN: &str = "publication_date";
/// Name of the food key column, used as the index of exported tables.
pub const FOOD_ID_COLUMN: &str = "fdc_id";

/// One row of `food.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub fdc_id: FoodId,
    pub description: String,
    /// Raw category text; compared verbatim by the data type filter.
    pub data_type: String,
    pub publication_date: Option<NaiveDate>,
}

/// The loaded food table in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTable {
    pub records: Vec<FoodRecord>,
    /// Whether the source carried a `publication_date` column.
    pub has_publication_date: bool,
}

impl FoodTable {
    pub fn new(records: Vec<FoodRecord>, has_publication_date: bool) -> Self {
        Self {
            records,
            has_publication_date,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Descriptive column names in load order.
    pub fn descriptive_columns(&self) -> Vec<&'static str> {
        let mut columns = vec![DESCRIPTION_COLUMN, DATA_TYPE_COLUMN];
        if self.has_publication_date {
            columns.push(PUBLICATION_DATE_COLUMN);
        }
        columns
    }
}

/// One row of `nutrient.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientDefinition {
    pub id: NutrientId,
    pub name: String,
    pub unit_name: String,
}

/// Translation dictionary from nutrient id to its definition.
pub type NutrientDefinitions = BTreeMap<NutrientId, NutrientDefinition>;

/// One row of `food_nutrient.csv`.
///
/// `amount` is `None` when the source cell was empty: the measurement exists
/// but carries no value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub food_id: FoodId,
    pub nutrient_id: NutrientId,
    pub amount: Option<f64>,
}

impl MeasurementRecord {
    /// A measurement with a recorded amount.
    pub fn new(food_id: i64, nutrient_id: i64, amount: f64) -> Self {
        Self {
            food_id: FoodId::new(food_id),
            nutrient_id: NutrientId::new(nutrient_id),
            amount: Some(amount),
        }
    }
}

/// Selected columns of `branded_food.csv`, keyed by food id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandTable {
    columns: Vec<String>,
    rows: BTreeMap<FoodId, Vec<Option<String>>>,
}

impl BrandTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: BTreeMap::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Insert a row, returning the previous values if the food id was already present.
    ///
    /// Rows shorter than the column list are padded with missing values.
    pub fn insert(
        &mut self,
        food_id: FoodId,
        mut values: Vec<Option<String>>,
    ) -> Option<Vec<Option<String>>> {
        values.resize(self.columns.len(), None);
        self.rows.insert(food_id, values)
    }

    pub fn get(&self, food_id: FoodId) -> Option<&[Option<String>]> {
        self.rows.get(&food_id).map(Vec::as_slice)
    }

    pub fn food_ids(&self) -> impl Iterator<Item = FoodId> + '_ {
        self.rows.keys().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (FoodId, &[Option<String>])> {
        self.rows.iter().map(|(id, values)| (*id, values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Known FoodData Central data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodDataType {
    AgriculturalAcquisition,
    BrandedFood,
    FoundationFood,
    SrLegacyFood,
    SubSampleFood,
    SurveyFnddsFood,
}

impl FoodDataType {
    pub const ALL: [FoodDataType; 6] = [
        FoodDataType::AgriculturalAcquisition,
        FoodDataType::BrandedFood,
        FoodDataType::FoundationFood,
        FoodDataType::SrLegacyFood,
        FoodDataType::SubSampleFood,
        FoodDataType::SurveyFnddsFood,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodDataType::AgriculturalAcquisition => "agricultural_acquisition",
            FoodDataType::BrandedFood => "branded_food",
            FoodDataType::FoundationFood => "foundation_food",
            FoodDataType::SrLegacyFood => "sr_legacy_food",
            FoodDataType::SubSampleFood => "sub_sample_food",
            FoodDataType::SurveyFnddsFood => "survey_fndds_food",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FoodDataType::AgriculturalAcquisition => "Raw samples acquired for analysis",
            FoodDataType::BrandedFood => "Commercial products with label nutrients",
            FoodDataType::FoundationFood => "Analytical data with extensive metadata",
            FoodDataType::SrLegacyFood => "USDA Standard Reference, final release",
            FoodDataType::SubSampleFood => "Sub-samples of acquired foods",
            FoodDataType::SurveyFnddsFood => "Foods reported in the WWEIA/NHANES survey",
        }
    }
}

impl fmt::Display for FoodDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a data type name is not part of the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown data type '{0}'")]
pub struct UnknownDataTypeError(pub String);

impl FromStr for FoodDataType {
    type Err = UnknownDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        FoodDataType::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == trimmed)
            .ok_or_else(|| UnknownDataTypeError(s.to_string()))
    }
}
