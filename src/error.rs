use std::path::PathBuf;

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SfxError {
    #[error("failed to read catalog at {path}: {message}")]
    #[diagnostic(help("pass the catalog location with --catalog"))]
    CatalogRead { path: PathBuf, message: String },

    #[error("catalog is missing required column: {0}")]
    MissingColumn(String),

    #[error("malformed catalog row {row}: {message}")]
    CatalogParse { row: u64, message: String },

    #[error("download request failed: {0}")]
    Http(String),

    #[error("server returned status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("archive error: {0}")]
    Archive(String),

    #[error("no audio member found in downloaded archive")]
    NoAudioMember,

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid setting: {0}")]
    InvalidConfig(String),

    #[error("failed to encode report: {0}")]
    ReportEncode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Catalog,
    Network,
    Archive,
    Filesystem,
    Config,
    Output,
}

impl SfxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SfxError::CatalogRead { .. }
            | SfxError::MissingColumn(_)
            | SfxError::CatalogParse { .. } => ErrorKind::Catalog,
            SfxError::Http(_) | SfxError::HttpStatus { .. } => ErrorKind::Network,
            SfxError::Archive(_) | SfxError::NoAudioMember => ErrorKind::Archive,
            SfxError::Filesystem(_) => ErrorKind::Filesystem,
            SfxError::ConfigRead(_) | SfxError::ConfigParse(_) | SfxError::InvalidConfig(_) => {
                ErrorKind::Config
            }
            SfxError::ReportEncode(_) => ErrorKind::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(SfxError::NoAudioMember.kind(), ErrorKind::Archive);
        assert_eq!(
            SfxError::HttpStatus {
                status: 404,
                url: "https://example.invalid".to_string()
            }
            .kind(),
            ErrorKind::Network
        );
        assert_eq!(
            SfxError::ReportEncode("bad float".to_string()).kind(),
            ErrorKind::Output
        );
        assert_eq!(
            SfxError::MissingColumn("CDName".to_string()).kind(),
            ErrorKind::Catalog
        );
    }
}
