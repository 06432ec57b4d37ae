use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "src/configs/logo_sync.toml";
pub const CONFIG_PATH_ENV: &str = "LOGO_SYNC_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfigFile {
    pub sync: SyncSection,
    #[serde(default)]
    pub datasets: Vec<DatasetSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSection {
    pub csv_path: String,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSection {
    pub name: Option<String>,
    pub path: String,
    pub report_skipped: Option<bool>,
}

/// One JSON company file patched during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub name: String,
    pub path: PathBuf,
    /// Print per-record skip notices and the skip summary line for this file.
    pub report_skipped: bool,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub csv_path: PathBuf,
    pub dry_run: bool,
    pub datasets: Vec<DatasetConfig>,
}

impl SyncConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sync config file: {}", path.display()))?;

        let config_file: SyncConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse sync config file: {}", path.display()))?;

        Ok(Self::from_file_sections(config_file))
    }

    /// Resolves the config path (`LOGO_SYNC_CONFIG` or the default location)
    /// and falls back to the built-in defaults when no file is there.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_or_default(&path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file_sections(file: SyncConfigFile) -> Self {
        let datasets = file
            .datasets
            .into_iter()
            .map(|section| {
                let path = PathBuf::from(section.path);
                let name = section.name.unwrap_or_else(|| dataset_name_from_path(&path));
                DatasetConfig {
                    name,
                    path,
                    report_skipped: section.report_skipped.unwrap_or(false),
                }
            })
            .collect();

        Self {
            csv_path: PathBuf::from(file.sync.csv_path),
            dry_run: file.sync.dry_run.unwrap_or(false),
            datasets,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.csv_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CSV path cannot be empty"));
        }

        if self.datasets.is_empty() {
            return Err(anyhow::anyhow!("At least one dataset must be configured"));
        }

        let mut seen = HashSet::new();
        for dataset in &self.datasets {
            if dataset.path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("Dataset '{}' has an empty path", dataset.name));
            }
            if !seen.insert(dataset.name.as_str()) {
                return Err(anyhow::anyhow!("Duplicate dataset name: {}", dataset.name));
            }
        }

        Ok(())
    }
}

fn dataset_name_from_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("logo.csv"),
            dry_run: false,
            datasets: vec![
                DatasetConfig {
                    name: "company_full.json".to_string(),
                    path: PathBuf::from("src/data/company_full.json"),
                    report_skipped: true,
                },
                DatasetConfig {
                    name: "company_short.json".to_string(),
                    path: PathBuf::from("src/data/company_short.json"),
                    report_skipped: false,
                },
            ],
        }
    }
}
