use std::fs::File;
use std::io::Read;
use std::path::Path;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SfxError;
use crate::sanitize::{sanitize, truncate_chars};

pub const DEFAULT_BASE_URL: &str = "https://sound-effects-media.bbcrewind.co.uk/zip/";
pub const DEFAULT_OUTPUT_ROOT: &str = "sounds";
// ecryptfs limit; most filesystems allow 255.
pub const MAX_FILENAME_LENGTH: usize = 143;
pub const AUDIO_SUFFIX: &str = ".wav";

const REQUIRED_COLUMNS: [&str; 3] = ["location", "description", "CDName"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogRecord {
    pub location: String,
    pub description: String,
    #[serde(rename = "CDName")]
    pub cd_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub index: usize,
    pub url: String,
    pub destination: Utf8PathBuf,
    pub rename_hint: String,
}

#[derive(Debug, Clone)]
pub struct CatalogReader {
    output_root: Utf8PathBuf,
    base_url: String,
    max_filename_length: usize,
}

impl Default for CatalogReader {
    fn default() -> Self {
        Self::new(
            Utf8PathBuf::from(DEFAULT_OUTPUT_ROOT),
            DEFAULT_BASE_URL.to_string(),
            MAX_FILENAME_LENGTH,
        )
    }
}

impl CatalogReader {
    pub fn new(output_root: Utf8PathBuf, base_url: String, max_filename_length: usize) -> Self {
        Self {
            output_root,
            base_url,
            max_filename_length,
        }
    }

    pub fn load(&self, path: &Path) -> Result<Vec<WorkItem>, SfxError> {
        let file = File::open(path).map_err(|err| SfxError::CatalogRead {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        self.from_reader(file)
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<WorkItem>, SfxError> {
        let mut csv = csv::ReaderBuilder::new().from_reader(reader);
        let headers = csv.headers().map_err(|err| SfxError::CatalogParse {
            row: 0,
            message: err.to_string(),
        })?;
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(SfxError::MissingColumn(column.to_string()));
            }
        }

        let mut items = Vec::new();
        let mut skipped = 0usize;
        for (index, record) in csv.deserialize::<CatalogRecord>().enumerate() {
            let record = record.map_err(|err| SfxError::CatalogParse {
                row: index as u64 + 1,
                message: err.to_string(),
            })?;
            match self.work_item(index, &record) {
                Some(item) => items.push(item),
                None => skipped += 1,
            }
        }

        info!(
            pending = items.len(),
            skipped, "catalog loaded; existing files are skipped"
        );
        Ok(items)
    }

    pub fn work_item(&self, index: usize, record: &CatalogRecord) -> Option<WorkItem> {
        let folder = sanitize(&record.cd_name);
        let description = self.short_description(&record.description);

        let destination = self.output_root.join(&record.location);
        if destination.as_std_path().exists() {
            debug!(%destination, "already present, skipping");
            return None;
        }

        let rename_hint = sanitize(&format!("BBC_{folder}_{description}{AUDIO_SUFFIX}"));
        let url = build_url(&self.base_url, &record.location);
        debug!(%url, %rename_hint, "queued");

        Some(WorkItem {
            index,
            url,
            destination,
            rename_hint,
        })
    }

    pub fn short_description(&self, description: &str) -> String {
        let max_description = self.max_filename_length.saturating_sub(AUDIO_SUFFIX.len());
        truncate_chars(&sanitize(description), max_description).to_string()
    }
}

pub fn build_url(base_url: &str, location: &str) -> String {
    format!("{base_url}{location}.zip?download&rename={location}")
}

pub fn load_work_items(path: &Path) -> Result<Vec<WorkItem>, SfxError> {
    CatalogReader::default().load(path)
}
