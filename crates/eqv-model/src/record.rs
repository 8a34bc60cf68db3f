//! Normalized equipment rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::slots::{ParameterSlot, PerSlot};

/// Category assigned to every row when no category column was found.
pub const DEFAULT_CATEGORY: &str = "Equipment";

/// One normalized input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub name: String,
    pub category: String,
    /// Original numeric column name -> value (unparseable cells are 0.0).
    pub numeric_values: BTreeMap<String, f64>,
}

impl EquipmentRecord {
    /// Value of a numeric column, 0.0 when the column is not present.
    pub fn value(&self, column: &str) -> f64 {
        self.numeric_values.get(column).copied().unwrap_or(0.0)
    }
}

/// A record reduced to the three parameter slots, as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlottedRecord {
    pub name: String,
    pub category: String,
    pub values: PerSlot<f64>,
}

impl SlottedRecord {
    /// Value stored in a slot.
    pub fn value(&self, slot: ParameterSlot) -> f64 {
        self.values[slot]
    }
}
