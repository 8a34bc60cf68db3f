//! Parameter slot mapping.

use eqv_model::{EquipmentRecord, ParameterSlotMapping, PerSlot, SlotBinding, SlottedRecord};

/// Binds the first three numeric columns to the parameter slots, in order.
///
/// Slots without a column carry their placeholder label. Columns beyond
/// the third are not mapped.
pub fn map_parameter_slots(numeric_columns: &[String]) -> ParameterSlotMapping {
    let dropped = numeric_columns.len().saturating_sub(3);
    if dropped > 0 {
        tracing::debug!(dropped, "Numeric columns beyond the third are not mapped");
    }

    ParameterSlotMapping::new(PerSlot::from_fn(|slot| {
        numeric_columns
            .get(slot.index())
            .map_or_else(|| SlotBinding::placeholder(slot), |column| SlotBinding::column(column.as_str()))
    }))
}

/// Reduces records to their slot values.
///
/// Unbound slots hold `0.0`.
pub fn slot_records(records: &[EquipmentRecord], mapping: &ParameterSlotMapping) -> Vec<SlottedRecord> {
    records
        .iter()
        .map(|record| SlottedRecord {
            name: record.name.clone(),
            category: record.category.clone(),
            values: PerSlot::from_fn(|slot| mapping.column(slot).map_or(0.0, |column| record.value(column))),
        })
        .collect()
}
