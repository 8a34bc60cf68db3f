//! Report error types.

use thiserror::Error;

/// Errors raised while rendering a PDF report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A page content stream could not be encoded.
    #[error("failed to encode page {page}: {message}")]
    Encode { page: usize, message: String },

    /// The document could not be serialized.
    #[error("failed to write PDF document: {message}")]
    Write { message: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
