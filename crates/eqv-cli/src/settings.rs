//! User settings persisted as TOML in the platform config directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use eqv_ingest::{IngestOptions, MAX_CSV_FILE_SIZE};
use eqv_report::{DEFAULT_TABLE_ROWS, DEFAULT_TITLE, DEFAULT_TREND_ROWS, ReportOptions};
use eqv_store::{DEFAULT_RETENTION, StoreConfig};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "EquipmentInsights";
const APPLICATION: &str = "eqv";

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub report: ReportSettings,
    pub session: SessionSettings,
}

/// Where and how datasets are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Store file (default: `store.eqv` in the platform data directory).
    pub path: Option<PathBuf>,
    /// Datasets kept per account.
    pub retention: usize,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: None,
            retention: DEFAULT_RETENTION,
            max_upload_bytes: MAX_CSV_FILE_SIZE,
        }
    }
}

/// PDF report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub title: String,
    /// Rows in the equipment table.
    pub table_rows: usize,
    /// Rows in the trend charts.
    pub trend_rows: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            table_rows: DEFAULT_TABLE_ROWS,
            trend_rows: DEFAULT_TREND_ROWS,
        }
    }
}

/// Login state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Set by `login`, cleared by `logout`.
    pub active_user: Option<String>,
}

impl Settings {
    /// Load settings from a specific path.
    ///
    /// A missing file yields defaults; an unreadable one is logged and
    /// replaced by defaults.
    pub fn load_from(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        toml::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(path = %path.display(), %error, "Ignoring invalid settings file");
            Self::default()
        })
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, content).with_context(|| format!("write settings {}", path.display()))
    }

    /// Get the default config file path.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("settings.toml"))
            .unwrap_or_else(|| PathBuf::from("settings.toml"))
    }

    /// Store file to open, unless overridden on the command line.
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
                .map(|dirs| dirs.data_dir().join("store.eqv"))
                .unwrap_or_else(|| PathBuf::from("store.eqv"))
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            retention: self.store.retention.max(1),
            ..StoreConfig::default()
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            max_file_size: self.store.max_upload_bytes,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.report.title.clone(),
            table_rows: self.report.table_rows,
            trend_rows: self.report.trend_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("settings.toml");

        let mut settings = Settings::default();
        settings.session.active_user = Some("alice".into());
        settings.report.table_rows = 20;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[store]\nretention = 3\n").unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.store.retention, 3);
        assert_eq!(settings.store.max_upload_bytes, MAX_CSV_FILE_SIZE);
        assert_eq!(settings.report, ReportSettings::default());
        assert_eq!(settings.session.active_user, None);
    }

    #[test]
    fn test_missing_or_invalid_file() {
        let dir = tempdir().unwrap();
        assert_eq!(
            Settings::load_from(&dir.path().join("absent.toml")),
            Settings::default()
        );

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "store = 3").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_retention_never_zero() {
        let mut settings = Settings::default();
        settings.store.retention = 0;
        assert_eq!(settings.store_config().retention, 1);
    }
}
