//! Row normalization into typed equipment records.

use std::collections::BTreeMap;

use eqv_model::{ColumnRoles, DEFAULT_CATEGORY, EquipmentRecord, RawTable};

use crate::numeric::parse_numeric;

/// Converts every row of `table` into an [`EquipmentRecord`].
///
/// Output order and length match the input rows. The name cell is kept
/// verbatim. The category comes from the category column, or is
/// [`DEFAULT_CATEGORY`] when no category column was assigned. Numeric cells
/// that are blank or fail to parse become `0.0`.
pub fn normalize_rows(table: &RawTable, roles: &ColumnRoles) -> Vec<EquipmentRecord> {
    let name_index = table.column_index(&roles.name_column);
    let category_index = roles
        .category_column
        .as_deref()
        .and_then(|column| table.column_index(column));
    let numeric_indices: Vec<(&str, Option<usize>)> = roles
        .numeric_columns
        .iter()
        .map(|column| (column.as_str(), table.column_index(column)))
        .collect();

    let mut coerced = 0usize;
    let records: Vec<EquipmentRecord> = table
        .rows()
        .iter()
        .map(|row| {
            let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).map(String::as_str);

            let name = cell(name_index).unwrap_or_default().to_string();
            let category = match roles.category_column {
                Some(_) => cell(category_index).unwrap_or_default().to_string(),
                None => DEFAULT_CATEGORY.to_string(),
            };

            let mut numeric_values = BTreeMap::new();
            for (column, index) in &numeric_indices {
                let value = cell(*index).and_then(parse_numeric).unwrap_or_else(|| {
                    coerced += 1;
                    0.0
                });
                numeric_values.insert((*column).to_string(), value);
            }

            EquipmentRecord {
                name,
                category,
                numeric_values,
            }
        })
        .collect();

    if coerced > 0 {
        tracing::debug!(cells = coerced, "Coerced blank or malformed numeric cells to 0");
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(category: Option<&str>, numeric: &[&str]) -> ColumnRoles {
        ColumnRoles {
            name_column: "Name".into(),
            category_column: category.map(str::to_string),
            numeric_columns: numeric.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_coerces_malformed_cells() {
        let table = RawTable::from_rows(
            &["Name", "Type", "Flow"],
            &[
                &["Pump-1", "Pump", "12.5"],
                &["Pump-2", "Pump", "abc"],
                &["Pump-3", "Pump", ""],
            ],
        );
        let records = normalize_rows(&table, &roles(Some("Type"), &["Flow"]));

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].value("Flow"), 12.5);
        assert_eq!(records[1].value("Flow"), 0.0);
        assert_eq!(records[2].value("Flow"), 0.0);
        assert_eq!(records[1].numeric_values.len(), 1);
    }

    #[test]
    fn test_default_category_without_category_column() {
        let table = RawTable::from_rows(&["Name", "Flow"], &[&["Pump-1", "1"]]);
        let records = normalize_rows(&table, &roles(None, &["Flow"]));

        assert_eq!(records[0].category, DEFAULT_CATEGORY);
        assert_eq!(records[0].name, "Pump-1");
    }

    #[test]
    fn test_blank_category_cell_kept_blank() {
        let table = RawTable::from_rows(&["Name", "Type", "Flow"], &[&["Pump-1", "", "1"]]);
        let records = normalize_rows(&table, &roles(Some("Type"), &["Flow"]));

        assert_eq!(records[0].category, "");
    }

    #[test]
    fn test_preserves_row_order() {
        let table = RawTable::from_rows(
            &["Name", "Flow"],
            &[&["B", "2"], &["A", "1"], &["C", "3"]],
        );
        let names: Vec<_> = normalize_rows(&table, &roles(None, &["Flow"]))
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["B", "A", "C"]);
    }
}
