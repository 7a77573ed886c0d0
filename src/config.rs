use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    AUDIO_SUFFIX, CatalogReader, DEFAULT_BASE_URL, DEFAULT_OUTPUT_ROOT, MAX_FILENAME_LENGTH,
};
use crate::error::SfxError;
use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::orchestrator::DEFAULT_WORKERS;

pub const DEFAULT_CATALOG: &str = "BBCSoundEffects.csv";
pub const DEFAULT_CONFIG_FILE: &str = "sfx-fetch.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub workers: usize,
    pub max_filename_length: usize,
    pub output_root: Utf8PathBuf,
    pub catalog: PathBuf,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_filename_length: MAX_FILENAME_LENGTH,
            output_root: Utf8PathBuf::from(DEFAULT_OUTPUT_ROOT),
            catalog: PathBuf::from(DEFAULT_CATALOG),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SfxError> {
        if self.workers == 0 {
            return Err(SfxError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(SfxError::InvalidConfig(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.max_filename_length <= AUDIO_SUFFIX.len() {
            return Err(SfxError::InvalidConfig(format!(
                "max_filename_length must exceed {}",
                AUDIO_SUFFIX.len()
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(SfxError::InvalidConfig("base_url is empty".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn catalog_reader(&self) -> CatalogReader {
        CatalogReader::new(
            self.output_root.clone(),
            self.base_url.clone(),
            self.max_filename_length,
        )
    }
}

pub struct SettingsLoader;

impl SettingsLoader {
    pub fn resolve(path: Option<&str>) -> Result<Settings, SfxError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| SfxError::ConfigRead(config_path.clone()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Settings, SfxError> {
        let settings: Settings =
            serde_json::from_str(content).map_err(|err| SfxError::ConfigParse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}
