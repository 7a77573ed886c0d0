use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::error::SfxError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub trait Downloader: Send + Sync {
    fn download(&self, url: &str, destination: &Path) -> Result<u64, SfxError>;
}

#[derive(Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Result<Self, SfxError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, SfxError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("bbc-sfx-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SfxError::Http(err.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| SfxError::Http(err.to_string()))?;

        Ok(Self { client })
    }

    fn write_response_to_file(
        &self,
        url: &str,
        mut response: reqwest::blocking::Response,
        destination: &Path,
    ) -> Result<u64, SfxError> {
        if !response.status().is_success() {
            return Err(SfxError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let mut file =
            File::create(destination).map_err(|err| SfxError::Filesystem(err.to_string()))?;
        // Body read errors surface here as io errors; they are transport failures.
        std::io::copy(&mut response, &mut file).map_err(|err| SfxError::Http(err.to_string()))
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64, SfxError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| SfxError::Http(err.to_string()))?;
        self.write_response_to_file(url, response, destination)
    }
}
