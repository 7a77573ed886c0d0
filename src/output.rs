use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::{ErrorKind, SfxError};
use crate::orchestrator::Report;

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub generated_at: String,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed_ms: u64,
    pub failures: Vec<FailureEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEntry {
    pub destination: String,
    pub url: String,
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl From<&Report> for ReportDocument {
    fn from(report: &Report) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total: report.total,
            succeeded: report.succeeded,
            failed: report.failed,
            elapsed_ms: report.elapsed.as_millis() as u64,
            failures: report
                .failures
                .iter()
                .map(|outcome| FailureEntry {
                    destination: outcome.destination.to_string(),
                    url: outcome.url.clone(),
                    kind: outcome.error().map(SfxError::kind),
                    message: outcome
                        .error()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

pub fn print_summary<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    for outcome in &report.failures {
        if let Some(err) = outcome.error() {
            writeln!(out, "{} failed with exception: {err}", outcome.destination)?;
        }
    }
    writeln!(out, "{} failures reported.", report.failed)
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn write_report(report: &Report, path: &Path) -> Result<(), SfxError> {
        let json = serde_json::to_vec_pretty(&ReportDocument::from(report))
            .map_err(|err| SfxError::ReportEncode(err.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| SfxError::Filesystem(err.to_string()))?;
        }
        fs::write(path, json).map_err(|err| SfxError::Filesystem(err.to_string()))
    }

    pub fn print_items<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
