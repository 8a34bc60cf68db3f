//! The three fixed parameter slots.
//!
//! Every upload's numeric columns are projected onto exactly three
//! positions. Storage, summaries and reports only ever see these slots.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize, Serializer};

/// One of the three parameter positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSlot {
    Slot1,
    Slot2,
    Slot3,
}

impl ParameterSlot {
    /// All slots in positional order.
    pub const ALL: [ParameterSlot; 3] = [Self::Slot1, Self::Slot2, Self::Slot3];

    /// Zero-based position.
    pub const fn index(self) -> usize {
        match self {
            Self::Slot1 => 0,
            Self::Slot2 => 1,
            Self::Slot3 => 2,
        }
    }

    /// Serialized key (`slot1`, `slot2`, `slot3`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Slot1 => "slot1",
            Self::Slot2 => "slot2",
            Self::Slot3 => "slot3",
        }
    }

    /// Label used when no column is bound to the slot.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Slot1 => "Parameter 1",
            Self::Slot2 => "Parameter 2",
            Self::Slot3 => "Parameter 3",
        }
    }
}

impl fmt::Display for ParameterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One value per parameter slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerSlot<T> {
    pub slot1: T,
    pub slot2: T,
    pub slot3: T,
}

impl<T> PerSlot<T> {
    /// Builds from values in slot order.
    pub fn new(values: [T; 3]) -> Self {
        let [slot1, slot2, slot3] = values;
        Self {
            slot1,
            slot2,
            slot3,
        }
    }

    /// Builds by evaluating `f` for every slot.
    pub fn from_fn(mut f: impl FnMut(ParameterSlot) -> T) -> Self {
        Self {
            slot1: f(ParameterSlot::Slot1),
            slot2: f(ParameterSlot::Slot2),
            slot3: f(ParameterSlot::Slot3),
        }
    }

    /// Applies `f` to every value.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerSlot<U> {
        PerSlot {
            slot1: f(self.slot1),
            slot2: f(self.slot2),
            slot3: f(self.slot3),
        }
    }

    /// Borrows every value.
    pub fn each_ref(&self) -> PerSlot<&T> {
        PerSlot {
            slot1: &self.slot1,
            slot2: &self.slot2,
            slot3: &self.slot3,
        }
    }

    /// Iterates over `(slot, value)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterSlot, &T)> {
        ParameterSlot::ALL.into_iter().map(move |slot| (slot, &self[slot]))
    }

    /// Values in slot order.
    pub fn into_array(self) -> [T; 3] {
        [self.slot1, self.slot2, self.slot3]
    }
}

impl<T> Index<ParameterSlot> for PerSlot<T> {
    type Output = T;

    fn index(&self, slot: ParameterSlot) -> &T {
        match slot {
            ParameterSlot::Slot1 => &self.slot1,
            ParameterSlot::Slot2 => &self.slot2,
            ParameterSlot::Slot3 => &self.slot3,
        }
    }
}

impl<T> IndexMut<ParameterSlot> for PerSlot<T> {
    fn index_mut(&mut self, slot: ParameterSlot) -> &mut T {
        match slot {
            ParameterSlot::Slot1 => &mut self.slot1,
            ParameterSlot::Slot2 => &mut self.slot2,
            ParameterSlot::Slot3 => &mut self.slot3,
        }
    }
}

/// What a single slot is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotBinding {
    /// Display label: the column name, or the slot placeholder.
    pub label: String,
    /// Source column, `None` for a padded slot.
    pub column: Option<String>,
}

impl SlotBinding {
    /// A slot bound to an input column.
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            column: Some(name),
        }
    }

    /// A padded slot carrying only its placeholder label.
    pub fn placeholder(slot: ParameterSlot) -> Self {
        Self {
            label: slot.placeholder().to_string(),
            column: None,
        }
    }
}

/// Positional association of slots to source columns.
///
/// Serializes as `{"slot1": label, "slot2": label, "slot3": label}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSlotMapping {
    bindings: PerSlot<SlotBinding>,
}

impl ParameterSlotMapping {
    pub fn new(bindings: PerSlot<SlotBinding>) -> Self {
        Self { bindings }
    }

    /// Mapping with every slot padded.
    pub fn placeholders() -> Self {
        Self::new(PerSlot::from_fn(SlotBinding::placeholder))
    }

    /// Display label of a slot.
    pub fn label(&self, slot: ParameterSlot) -> &str {
        &self.bindings[slot].label
    }

    /// Source column of a slot, if bound.
    pub fn column(&self, slot: ParameterSlot) -> Option<&str> {
        self.bindings[slot].column.as_deref()
    }

    /// Labels in slot order.
    pub fn labels(&self) -> PerSlot<&str> {
        PerSlot::from_fn(|slot| self.label(slot))
    }

    /// Bound slots with their source column, in slot order.
    pub fn bound_columns(&self) -> impl Iterator<Item = (ParameterSlot, &str)> {
        ParameterSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.column(slot).map(|column| (slot, column)))
    }

    pub fn bindings(&self) -> &PerSlot<SlotBinding> {
        &self.bindings
    }
}

impl Serialize for ParameterSlotMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.labels().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_positions() {
        for (i, slot) in ParameterSlot::ALL.into_iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_per_slot_index_and_map() {
        let mut values = PerSlot::new([1.0, 2.0, 3.0]);
        values[ParameterSlot::Slot3] = 4.0;
        let doubled = values.map(|v| v * 2.0);
        assert_eq!(doubled.into_array(), [2.0, 4.0, 8.0]);
    }

    #[test]
    fn test_mapping_serializes_labels() {
        let mapping = ParameterSlotMapping::new(PerSlot::new([
            SlotBinding::column("Flow"),
            SlotBinding::placeholder(ParameterSlot::Slot2),
            SlotBinding::placeholder(ParameterSlot::Slot3),
        ]));
        let json = serde_json::to_value(&mapping).unwrap();

        assert_eq!(json["slot1"], "Flow");
        assert_eq!(json["slot2"], "Parameter 2");
        assert_eq!(json["slot3"], "Parameter 3");
        assert_eq!(mapping.bound_columns().count(), 1);
    }
}
