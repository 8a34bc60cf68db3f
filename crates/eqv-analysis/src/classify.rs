//! Column role classification.
//!
//! Roles are assigned from header keywords first and value distributions
//! second:
//!
//! - **Name**: the first header containing a [`NAME_KEYWORDS`] entry,
//!   otherwise the first column
//! - **Category**: the first header containing a [`CATEGORY_KEYWORDS`]
//!   entry; otherwise the first low-cardinality text column; otherwise the
//!   second column if it is not the name column
//! - **Numeric**: every remaining column whose non-blank cells all parse as
//!   finite numbers
//!
//! Keyword matching is a case-insensitive substring test, so `"Unit"` and
//! `"Flow Unit"` both match the `unit` name keyword.

use std::collections::BTreeSet;

use eqv_model::{ColumnRoles, RawTable};

use crate::error::{AnalysisError, Result};
use crate::numeric::{is_blank, is_numeric};

/// Header fragments identifying the name column.
pub const NAME_KEYWORDS: [&str; 6] = ["name", "equipment", "item", "machine", "device", "unit"];

/// Header fragments identifying the category column.
pub const CATEGORY_KEYWORDS: [&str; 5] = ["type", "category", "class", "kind", "classification"];

/// A text column counts as a category when its distinct non-blank values
/// are fewer than this share of the row count.
const CATEGORY_CARDINALITY_RATIO: f64 = 0.5;

/// Value profile of a single column.
#[derive(Debug)]
struct ColumnProfile<'a> {
    name: &'a str,
    non_blank: usize,
    distinct: usize,
    all_numeric: bool,
}

impl ColumnProfile<'_> {
    fn is_numeric(&self) -> bool {
        self.non_blank > 0 && self.all_numeric
    }

    fn is_text(&self) -> bool {
        self.non_blank > 0 && !self.all_numeric
    }
}

fn profile_column<'a>(table: &'a RawTable, column: &'a str) -> ColumnProfile<'a> {
    let mut distinct = BTreeSet::new();
    let mut non_blank = 0;
    let mut all_numeric = true;

    for value in table.column_values(column) {
        if is_blank(value) {
            continue;
        }
        non_blank += 1;
        distinct.insert(value);
        if all_numeric && !is_numeric(value) {
            all_numeric = false;
        }
    }

    ColumnProfile {
        name: column,
        non_blank,
        distinct: distinct.len(),
        all_numeric,
    }
}

fn matches_keyword(column: &str, keywords: &[&str]) -> bool {
    let lower = column.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// Infers column roles without requiring a numeric column.
///
/// # Errors
///
/// - [`AnalysisError::Classification`] if the table has no columns
/// - [`AnalysisError::EmptyInput`] if the table has no data rows
pub fn infer_roles(table: &RawTable) -> Result<ColumnRoles> {
    let columns = table.columns();
    let first = columns
        .first()
        .ok_or_else(|| AnalysisError::Classification {
            reason: "table has no columns".to_string(),
        })?;
    if table.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let name_column = columns
        .iter()
        .find(|column| matches_keyword(column, &NAME_KEYWORDS))
        .unwrap_or(first)
        .clone();

    let profiles: Vec<ColumnProfile<'_>> = columns
        .iter()
        .map(|column| profile_column(table, column))
        .collect();

    let category_column = detect_category_column(columns, &profiles, &name_column, table.row_count());

    let numeric_columns: Vec<String> = profiles
        .iter()
        .filter(|profile| profile.name != name_column)
        .filter(|profile| category_column.as_deref() != Some(profile.name))
        .filter(|profile| profile.is_numeric())
        .map(|profile| profile.name.to_string())
        .collect();

    tracing::debug!(
        name_column = %name_column,
        category_column = ?category_column,
        numeric = numeric_columns.len(),
        "Classified columns"
    );

    Ok(ColumnRoles {
        name_column,
        category_column,
        numeric_columns,
    })
}

fn detect_category_column(
    columns: &[String],
    profiles: &[ColumnProfile<'_>],
    name_column: &str,
    row_count: usize,
) -> Option<String> {
    if let Some(column) = columns
        .iter()
        .filter(|column| column.as_str() != name_column)
        .find(|column| matches_keyword(column, &CATEGORY_KEYWORDS))
    {
        return Some(column.clone());
    }

    let threshold = row_count as f64 * CATEGORY_CARDINALITY_RATIO;
    if let Some(profile) = profiles
        .iter()
        .filter(|profile| profile.name != name_column)
        .find(|profile| profile.is_text() && (profile.distinct as f64) < threshold)
    {
        return Some(profile.name.to_string());
    }

    columns
        .get(1)
        .filter(|column| column.as_str() != name_column)
        .cloned()
}

/// Classifies the columns of an upload.
///
/// Same as [`infer_roles`], but also requires at least one numeric column.
///
/// # Errors
///
/// Everything [`infer_roles`] returns, plus
/// [`AnalysisError::InsufficientData`] when no column is numeric.
pub fn classify(table: &RawTable) -> Result<ColumnRoles> {
    let roles = infer_roles(table)?;

    if roles.numeric_columns.is_empty() {
        tracing::warn!(columns = table.column_count(), "No numeric column found");
        return Err(AnalysisError::InsufficientData {
            columns: table.columns().to_vec(),
        });
    }

    Ok(roles)
}
