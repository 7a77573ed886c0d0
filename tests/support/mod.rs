#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Duration;

use camino::Utf8PathBuf;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use bbc_sfx_fetch::catalog::WorkItem;
use bbc_sfx_fetch::error::SfxError;
use bbc_sfx_fetch::http::Downloader;

pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Serves archives from memory; unknown URLs answer 404.
#[derive(Default)]
pub struct MockDownloader {
    archives: HashMap<String, Vec<u8>>,
    delays: HashMap<String, Duration>,
}

impl MockDownloader {
    pub fn with_archive(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), bytes);
        self
    }

    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }
}

impl Downloader for MockDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64, SfxError> {
        if let Some(delay) = self.delays.get(url) {
            std::thread::sleep(*delay);
        }
        let bytes = self.archives.get(url).ok_or_else(|| SfxError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })?;
        std::fs::write(destination, bytes).map_err(|err| SfxError::Filesystem(err.to_string()))?;
        Ok(bytes.len() as u64)
    }
}

pub fn work_item(root: &Utf8PathBuf, index: usize, location: &str) -> WorkItem {
    WorkItem {
        index,
        url: format!("https://mock.invalid/zip/{location}.zip"),
        destination: root.join(location),
        rename_hint: format!("BBC_Test_{location}"),
    }
}

pub fn utf8_root(temp: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().join("sounds")).unwrap()
}
