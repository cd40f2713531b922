//! Consolidation pipeline with explicit stages.
//!
//! The stages run in this order:
//! 1. **Measurements**: load `food_nutrient.csv`
//! 2. **Pivot**: group amounts into a food x nutrient matrix
//! 3. **Foods**: load `food.csv`
//! 4. **Filter**: drop excluded data types
//! 5. **Join**: inner join of foods and matrix rows
//! 6. **Translate** (optional): load `nutrient.csv`, relabel nutrient columns
//! 7. **Brand** (optional): load `branded_food.csv`, outer join brand columns
//!
//! Every stage consumes its input and any error aborts the run.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, warn};

use fdc_ingest::{load_brands, load_foods, load_measurements, load_nutrients};
use fdc_model::{
    ConsolidatedTable, ConsolidationOptions, ConsolidationWarning, FoodDataType, SourcePaths,
};
use fdc_transform::{
    BrandJoin, Translation, filter_food_types, join_brand_data, join_foods_with_nutrients, pivot,
    translate_nutrients,
};

use crate::error::Result;

/// Counts gathered while running the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationStats {
    pub foods_loaded: usize,
    pub foods_after_filter: usize,
    pub measurements: usize,
    pub matrix_rows: usize,
    pub matrix_columns: usize,
    pub joined_rows: usize,
    pub brand_only_rows: usize,
    pub elapsed: Duration,
}

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    pub table: ConsolidatedTable,
    pub warnings: Vec<ConsolidationWarning>,
    pub stats: ConsolidationStats,
}

/// Splits requested exclusions into known data types and unknown names.
pub fn partition_data_types(requested: &BTreeSet<String>) -> (BTreeSet<String>, Vec<String>) {
    let mut known = BTreeSet::new();
    let mut unknown = Vec::new();
    for name in requested {
        match name.parse::<FoodDataType>() {
            Ok(data_type) => {
                known.insert(data_type.as_str().to_string());
            }
            Err(_) => unknown.push(name.clone()),
        }
    }
    (known, unknown)
}

/// Builds the consolidated food table from the sources.
///
/// The nutrient source is read only when `options.translate_nutrients` is set,
/// and the brand source only when `options.include_brand_data` is set.
pub fn consolidate(sources: &SourcePaths, options: &ConsolidationOptions) -> Result<Consolidation> {
    let run_start = Instant::now();
    let mut stats = ConsolidationStats::default();
    let mut warnings = Vec::new();

    // =========================================================================
    // Stage 1-2: Measurements and pivot
    // =========================================================================
    let matrix = info_span!("pivot", path = %sources.food_nutrient.display()).in_scope(
        || -> Result<_> {
            let start = Instant::now();
            let measurements = load_measurements(&sources.food_nutrient)?;
            stats.measurements = measurements.len();
            let matrix = pivot(&measurements)?;
            info!(
                measurements = measurements.len(),
                rows = matrix.row_count(),
                columns = matrix.column_count(),
                duration_ms = start.elapsed().as_millis(),
                "pivot complete"
            );
            Ok(matrix)
        },
    )?;
    stats.matrix_rows = matrix.row_count();
    stats.matrix_columns = matrix.column_count();

    // =========================================================================
    // Stage 3-5: Foods, filter, join
    // =========================================================================
    let mut table = info_span!("join", path = %sources.food.display()).in_scope(
        || -> Result<_> {
            let start = Instant::now();
            let foods = load_foods(&sources.food)?;
            stats.foods_loaded = foods.len();

            let (excluded, unknown) = partition_data_types(&options.excluded_data_types);
            for name in unknown {
                warn!(data_type = %name, "ignoring unknown data type exclusion");
                warnings.push(ConsolidationWarning::UnknownDataType { name });
            }
            let foods = filter_food_types(foods, &excluded);
            stats.foods_after_filter = foods.len();

            let table = join_foods_with_nutrients(&foods, &matrix);
            info!(
                foods = stats.foods_loaded,
                kept = stats.foods_after_filter,
                rows = table.len(),
                duration_ms = start.elapsed().as_millis(),
                "join complete"
            );
            Ok(table)
        },
    )?;
    stats.joined_rows = table.len();

    // =========================================================================
    // Stage 6: Nutrient name translation
    // =========================================================================
    if options.translate_nutrients {
        let Translation {
            table: translated,
            warnings: translation_warnings,
        } = info_span!("translate", path = %sources.nutrient.display()).in_scope(
            || -> Result<_> {
                let start = Instant::now();
                let definitions = load_nutrients(&sources.nutrient)?;
                let translation =
                    translate_nutrients(table, &definitions, options.collision_policy)?;
                info!(
                    definitions = definitions.len(),
                    warnings = translation.warnings.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "translate complete"
                );
                Ok(translation)
            },
        )?;
        table = translated;
        warnings.extend(translation_warnings);
    } else {
        debug!("nutrient translation disabled");
    }

    // =========================================================================
    // Stage 7: Brand data
    // =========================================================================
    if options.include_brand_data {
        let BrandJoin {
            table: joined,
            brand_only_rows,
        } = info_span!("brand", path = %sources.branded_food.display()).in_scope(
            || -> Result<_> {
                let start = Instant::now();
                let brands = load_brands(&sources.branded_food, &options.brand_columns)?;
                let joined = join_brand_data(table, &brands)?;
                info!(
                    brand_rows = brands.len(),
                    rows = joined.table.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "brand join complete"
                );
                Ok(joined)
            },
        )?;
        table = joined;
        stats.brand_only_rows = brand_only_rows;
        if brand_only_rows > 0 {
            warnings.push(ConsolidationWarning::BrandOnlyRows {
                count: brand_only_rows,
            });
        }
    }

    stats.elapsed = run_start.elapsed();
    info!(
        rows = table.len(),
        columns = table.column_count(),
        warnings = warnings.len(),
        duration_ms = stats.elapsed.as_millis(),
        "consolidation complete"
    );

    Ok(Consolidation {
        table,
        warnings,
        stats,
    })
}
