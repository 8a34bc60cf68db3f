//! Error types for upload analysis.

use thiserror::Error;

/// Reasons an upload is rejected by the analysis pipeline.
///
/// All variants are terminal: nothing is persisted for a rejected upload.
/// Individual malformed cells are never reported here; they are coerced
/// during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The table has a header but no data rows.
    #[error("CSV file is empty")]
    EmptyInput,

    /// Column roles could not be assigned.
    #[error("could not classify columns: {reason}")]
    Classification { reason: String },

    /// No column qualifies as numeric.
    #[error(
        "no usable numeric column: CSV must contain at least one numeric column \
         (columns: {})",
        columns.join(", ")
    )]
    InsufficientData { columns: Vec<String> },
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_lists_columns() {
        let err = AnalysisError::InsufficientData {
            columns: vec!["Name".into(), "Type".into()],
        };
        let message = err.to_string();
        assert!(message.starts_with("no usable numeric column"));
        assert!(message.ends_with("(columns: Name, Type)"));
    }
}
