//! What the CLI prints when a command fails.

use eqv_store::StoreError;

/// Lines printed to stderr for a failed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub message: String,
    /// Underlying cause chain, shown when the store itself failed.
    pub detail: Option<String>,
    pub hint: Option<String>,
}

impl FailureReport {
    /// Describes `error`, preferring the store's user-facing wording.
    ///
    /// Rejected input (bad credentials, unknown dataset, ...) is reported
    /// with the store message alone. Store failures such as I/O errors also
    /// carry the full cause chain.
    pub fn from_error(error: &anyhow::Error) -> Self {
        let store_error = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<StoreError>());

        match store_error {
            Some(store_error) => Self {
                message: store_error.user_message(),
                detail: (!store_error.is_rejection()).then(|| format!("{error:#}")),
                hint: store_error.suggestion(),
            },
            None => Self {
                message: format!("{error:#}"),
                detail: None,
                hint: None,
            },
        }
    }

    /// Writes the report as `error:` / `detail:` / `hint:` lines.
    pub fn print(&self) {
        eprintln!("error: {}", self.message);
        if let Some(detail) = &self.detail {
            eprintln!("detail: {detail}");
        }
        if let Some(hint) = &self.hint {
            eprintln!("hint: {hint}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_rejection_uses_store_message() {
        let error = anyhow::Error::new(StoreError::DatasetNotFound { id: 7 });
        let report = FailureReport::from_error(&error);

        assert_eq!(report.message, "Dataset 7 not found");
        assert_eq!(report.detail, None);
        assert_eq!(report.hint.as_deref(), Some("Run `eqv list` to see your datasets."));
    }

    #[test]
    fn test_store_error_behind_context() {
        let error = Err::<(), _>(StoreError::Io {
            operation: "write",
            path: PathBuf::from("/data/store.eqv"),
            source: std::io::Error::other("disk full"),
        })
        .context("store dataset")
        .unwrap_err();
        let report = FailureReport::from_error(&error);

        assert_eq!(report.message, "Could not write the file at /data/store.eqv");
        let detail = report.detail.unwrap();
        assert!(detail.starts_with("store dataset: "));
        assert!(detail.contains("disk full"));
        assert!(report.hint.is_some());
    }

    #[test]
    fn test_other_errors_keep_their_chain() {
        let error = anyhow::anyhow!("bad header").context("read plant.csv");
        let report = FailureReport::from_error(&error);

        assert_eq!(report.message, "read plant.csv: bad header");
        assert_eq!(report.detail, None);
        assert_eq!(report.hint, None);
    }
}
