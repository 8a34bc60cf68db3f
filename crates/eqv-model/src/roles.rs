//! Column role assignment.

use serde::{Deserialize, Serialize};

/// Semantic roles inferred for the columns of one upload.
///
/// `name_column` is never listed in `numeric_columns`; a `category_column`
/// is never the name column and never numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Column holding the entity label.
    pub name_column: String,
    /// Column grouping rows into categories, if any.
    pub category_column: Option<String>,
    /// Pervasively numeric columns, in header order.
    pub numeric_columns: Vec<String>,
}

/// Column overview returned to clients so they can label parameter slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub total_columns: usize,
    pub name_column: String,
    pub category_column: Option<String>,
    pub numeric_columns: Vec<String>,
    pub all_columns: Vec<String>,
}

impl ColumnSummary {
    /// Builds the summary from classifier output and the table header.
    pub fn new(roles: &ColumnRoles, all_columns: &[String]) -> Self {
        Self {
            total_columns: all_columns.len(),
            name_column: roles.name_column.clone(),
            category_column: roles.category_column.clone(),
            numeric_columns: roles.numeric_columns.clone(),
            all_columns: all_columns.to_vec(),
        }
    }
}
