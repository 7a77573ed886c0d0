use std::io::{self, Write};
use std::time::Duration;

use camino::Utf8PathBuf;

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        total: usize,
        workers: usize,
    },
    Finished {
        finished: usize,
        total: usize,
        destination: Utf8PathBuf,
    },
    Failed {
        failed: usize,
        destination: Utf8PathBuf,
        message: String,
    },
    Completed {
        elapsed: Duration,
    },
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn event(&self, _event: ProgressEvent) {}
}

pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn event(&self, event: ProgressEvent) {
        // Progress output is best effort; a closed pipe must not abort the run.
        let _ = match event {
            ProgressEvent::Started { total, workers } => writeln!(
                io::stdout(),
                "Downloading {total} samples using {workers} threads..."
            ),
            ProgressEvent::Finished {
                finished,
                total,
                destination,
            } => writeln!(io::stdout(), "({finished}/{total}) Finished {destination}"),
            ProgressEvent::Failed {
                failed,
                destination,
                message,
            } => writeln!(
                io::stderr(),
                "FAILED: {destination}\n{message}\n{failed} failed download attempts"
            ),
            ProgressEvent::Completed { elapsed } => writeln!(
                io::stdout(),
                "\nExecution completed in {:.1}s. Reporting any failures:",
                elapsed.as_secs_f64()
            ),
        };
    }
}
