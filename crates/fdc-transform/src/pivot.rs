//! Pivot long-format measurements into a wide nutrient matrix.

use std::collections::BTreeMap;

use fdc_model::{FoodId, MeasurementRecord, NutrientId, NutrientMatrix};

use crate::error::{Result, TransformError};

/// Groups measurements by food id and nutrient id.
///
/// Every `(food_id, nutrient_id)` pair must occur exactly once. When some pair
/// repeats, the smallest repeated pair is reported together with its
/// occurrence count, so the outcome does not depend on input order. A
/// measurement with an empty amount still occupies its pair.
pub fn pivot(measurements: &[MeasurementRecord]) -> Result<NutrientMatrix> {
    let mut grouped: BTreeMap<(FoodId, NutrientId), (Option<f64>, usize)> = BTreeMap::new();
    for record in measurements {
        grouped
            .entry((record.food_id, record.nutrient_id))
            .and_modify(|(_, occurrences)| *occurrences += 1)
            .or_insert((record.amount, 1));
    }

    if let Some((&(food_id, nutrient_id), &(_, occurrences))) =
        grouped.iter().find(|(_, (_, occurrences))| *occurrences > 1)
    {
        return Err(TransformError::DuplicateMeasurement {
            food_id,
            nutrient_id,
            occurrences,
        });
    }

    let mut matrix = NutrientMatrix::new();
    for ((food_id, nutrient_id), (amount, _)) in grouped {
        matrix.insert(food_id, nutrient_id, amount);
    }

    tracing::debug!(
        measurements = measurements.len(),
        rows = matrix.row_count(),
        columns = matrix.column_count(),
        "pivoted measurements"
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_groups_by_food_and_nutrient() {
        let measurements = vec![
            MeasurementRecord::new(2, 100, 3.2),
            MeasurementRecord::new(1, 100, 0.3),
            MeasurementRecord::new(1, 200, 0.2),
            MeasurementRecord::new(2, 200, 3.3),
        ];
        let matrix = pivot(&measurements).unwrap();

        assert_eq!(matrix.food_ids().collect::<Vec<_>>(), [FoodId::new(1), FoodId::new(2)]);
        assert_eq!(
            matrix.nutrient_ids().iter().copied().collect::<Vec<_>>(),
            [NutrientId::new(100), NutrientId::new(200)]
        );
        assert_eq!(matrix.get(FoodId::new(1), NutrientId::new(200)), Some(0.2));
        assert_eq!(matrix.get(FoodId::new(2), NutrientId::new(100)), Some(3.2));
    }

    #[test]
    fn test_pivot_missing_pairs_are_not_zero() {
        let measurements = vec![
            MeasurementRecord::new(1, 100, 0.0),
            MeasurementRecord::new(2, 200, 1.5),
        ];
        let matrix = pivot(&measurements).unwrap();

        assert_eq!(matrix.get(FoodId::new(1), NutrientId::new(100)), Some(0.0));
        assert_eq!(matrix.get(FoodId::new(1), NutrientId::new(200)), None);
        assert_eq!(matrix.dense_row(FoodId::new(2)), Some(vec![None, Some(1.5)]));
    }

    #[test]
    fn test_pivot_empty_amount_counts_as_measurement() {
        let empty = MeasurementRecord {
            food_id: FoodId::new(1),
            nutrient_id: NutrientId::new(100),
            amount: None,
        };
        let matrix = pivot(std::slice::from_ref(&empty)).unwrap();
        assert!(matrix.contains_food(FoodId::new(1)));
        assert_eq!(matrix.column_count(), 1);

        let err = pivot(&[empty, MeasurementRecord::new(1, 100, 4.0)]).unwrap_err();
        assert!(matches!(err, TransformError::DuplicateMeasurement { occurrences: 2, .. }));
    }

    #[test]
    fn test_pivot_reports_smallest_duplicate() {
        let measurements = vec![
            MeasurementRecord::new(9, 300, 1.0),
            MeasurementRecord::new(9, 300, 1.0),
            MeasurementRecord::new(4, 500, 1.0),
            MeasurementRecord::new(4, 500, 2.0),
            MeasurementRecord::new(4, 500, 3.0),
        ];
        match pivot(&measurements).unwrap_err() {
            TransformError::DuplicateMeasurement {
                food_id,
                nutrient_id,
                occurrences,
            } => {
                assert_eq!(food_id, FoodId::new(4));
                assert_eq!(nutrient_id, NutrientId::new(500));
                assert_eq!(occurrences, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_pivot_empty_input() {
        let matrix = pivot(&[]).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.column_count(), 0);
    }
}
