//! Property tests for classification, normalization and slot mapping.

use eqv_analysis::{
    column_statistics, infer_roles, map_parameter_slots, normalize_rows, process_table,
};
use eqv_model::{ParameterSlot, RawTable};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1.0e6f64..1.0e6).prop_map(|v| v.to_string()),
        (-1000i64..1000).prop_map(|v| v.to_string()),
        "[a-zA-Z ]{0,8}",
        Just(String::new()),
        Just("nan".to_string()),
    ]
}

fn table() -> impl Strategy<Value = RawTable> {
    (1usize..6, 1usize..12).prop_flat_map(|(width, height)| {
        let columns: Vec<String> = (0..width).map(|i| format!("col{i}")).collect();
        proptest::collection::vec(proptest::collection::vec(cell(), width), height)
            .prop_map(move |rows| RawTable::new(columns.clone(), rows))
    })
}

proptest! {
    #[test]
    fn classification_is_deterministic(table in table()) {
        prop_assert_eq!(infer_roles(&table), infer_roles(&table));
    }

    #[test]
    fn roles_are_disjoint(table in table()) {
        let roles = infer_roles(&table).unwrap();
        prop_assert!(!roles.numeric_columns.contains(&roles.name_column));
        if let Some(category) = &roles.category_column {
            prop_assert_ne!(category, &roles.name_column);
            prop_assert!(!roles.numeric_columns.contains(category));
        }
    }

    #[test]
    fn normalization_is_total(table in table()) {
        let roles = infer_roles(&table).unwrap();
        let records = normalize_rows(&table, &roles);
        prop_assert_eq!(records.len(), table.row_count());
        for record in &records {
            prop_assert_eq!(record.numeric_values.len(), roles.numeric_columns.len());
            prop_assert!(record.numeric_values.values().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn slot_averages_stay_within_range(table in table()) {
        if let Ok(processed) = process_table(&table) {
            for (_, stats) in &processed.aggregate.columns {
                let tolerance = 1e-9 * (1.0 + stats.average.abs());
                prop_assert!(stats.min <= stats.average + tolerance);
                prop_assert!(stats.average <= stats.max + tolerance);
                prop_assert!(stats.variance >= 0.0);
            }
        }
    }

    #[test]
    fn quartiles_are_ordered(values in proptest::collection::vec(-1.0e6f64..1.0e6, 1..50)) {
        let q = column_statistics(&values).quartiles.unwrap();
        prop_assert!(q.q1 <= q.median && q.median <= q.q3);
        prop_assert!(q.iqr >= 0.0);
    }

    #[test]
    fn slot_mapping_follows_numeric_column_order(
        columns in proptest::collection::vec("[A-Za-z][A-Za-z0-9 ]{0,10}", 0..7)
    ) {
        let mapping = map_parameter_slots(&columns);
        let labels = mapping.labels().into_array();
        prop_assert_eq!(labels.len(), 3);

        for slot in ParameterSlot::ALL {
            match columns.get(slot.index()) {
                Some(column) => {
                    prop_assert_eq!(mapping.label(slot), column.as_str());
                    prop_assert_eq!(mapping.column(slot), Some(column.as_str()));
                }
                None => {
                    prop_assert_eq!(mapping.label(slot), slot.placeholder());
                    prop_assert_eq!(mapping.column(slot), None);
                }
            }
        }
        prop_assert_eq!(map_parameter_slots(&columns), mapping);
    }
}
