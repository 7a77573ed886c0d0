use std::fs;
use std::path::Path;

use camino::Utf8PathBuf;
use tracing::{debug, info, warn};

use crate::archive::extract_audio;
use crate::catalog::WorkItem;
use crate::error::SfxError;
use crate::http::Downloader;

#[derive(Debug)]
pub struct Outcome {
    pub index: usize,
    pub url: String,
    pub destination: Utf8PathBuf,
    pub result: Result<(), SfxError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&SfxError> {
        self.result.as_ref().err()
    }
}

pub struct FetchUnit<D: Downloader> {
    downloader: D,
}

impl<D: Downloader> FetchUnit<D> {
    pub fn new(downloader: D) -> Self {
        Self { downloader }
    }

    pub fn process(&self, item: &WorkItem) -> Outcome {
        info!(url = %item.url, destination = %item.destination, "starting download");
        let result = self.fetch_and_place(item);
        match &result {
            Ok(()) => debug!(destination = %item.destination, "placed"),
            Err(err) => warn!(destination = %item.destination, error = %err, "item failed"),
        }
        Outcome {
            index: item.index,
            url: item.url.clone(),
            destination: item.destination.clone(),
            result,
        }
    }

    fn fetch_and_place(&self, item: &WorkItem) -> Result<(), SfxError> {
        let destination = item.destination.as_std_path();
        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| SfxError::Filesystem(err.to_string()))?;

        // Removed on drop, whether or not extraction succeeds.
        let download = tempfile::Builder::new()
            .prefix(".sfx-download")
            .suffix(".zip")
            .tempfile_in(parent)
            .map_err(|err| SfxError::Filesystem(err.to_string()))?;
        let bytes = self.downloader.download(&item.url, download.path())?;
        debug!(bytes, url = %item.url, "archive downloaded");

        let member = extract_audio(download.path(), destination)?;
        debug!(%member, rename_hint = %item.rename_hint, "extracted");
        Ok(())
    }
}
