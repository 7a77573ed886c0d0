use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use tracing::info;

use crate::catalog::WorkItem;
use crate::fetch::{FetchUnit, Outcome};
use crate::http::Downloader;
use crate::progress::{ProgressEvent, ProgressSink, SilentProgress};

pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Default)]
pub struct Report {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub failures: Vec<Outcome>,
    pub elapsed: Duration,
}

impl Report {
    fn record(&mut self, outcome: Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failures.push(outcome);
        }
    }
}

pub struct Orchestrator<D: Downloader> {
    unit: FetchUnit<D>,
    workers: usize,
}

impl<D: Downloader> Orchestrator<D> {
    pub fn new(unit: FetchUnit<D>, workers: usize) -> Self {
        Self {
            unit,
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn run(&self, items: Vec<WorkItem>, sink: &dyn ProgressSink) -> Report {
        let started = Instant::now();
        let total = items.len();
        info!(total, workers = self.workers, "run started");
        sink.event(ProgressEvent::Started {
            total,
            workers: self.workers,
        });

        let mut report = Report {
            total,
            ..Report::default()
        };

        let (queue_tx, queue_rx) = unbounded::<WorkItem>();
        for item in items {
            // Both ends are alive here, so sending cannot fail.
            let _ = queue_tx.send(item);
        }
        drop(queue_tx);

        let (result_tx, result_rx) = unbounded::<Outcome>();
        let pool_size = self.workers.min(total);

        thread::scope(|scope| {
            for _ in 0..pool_size {
                let queue_rx = queue_rx.clone();
                let result_tx = result_tx.clone();
                let unit = &self.unit;
                scope.spawn(move || {
                    for item in queue_rx.iter() {
                        if result_tx.send(unit.process(&item)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(result_tx);

            for outcome in result_rx.iter() {
                if outcome.is_success() {
                    sink.event(ProgressEvent::Finished {
                        finished: report.succeeded + 1,
                        total,
                        destination: outcome.destination.clone(),
                    });
                } else {
                    sink.event(ProgressEvent::Failed {
                        failed: report.failed + 1,
                        destination: outcome.destination.clone(),
                        message: outcome
                            .error()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    });
                }
                report.record(outcome);
            }
        });

        report.failures.sort_by_key(|outcome| outcome.index);
        report.elapsed = started.elapsed();
        info!(
            total,
            succeeded = report.succeeded,
            failed = report.failed,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "run finished"
        );
        sink.event(ProgressEvent::Completed {
            elapsed: report.elapsed,
        });
        report
    }
}

pub fn run_items<D: Downloader>(downloader: D, items: Vec<WorkItem>, workers: usize) -> Report {
    Orchestrator::new(FetchUnit::new(downloader), workers).run(items, &SilentProgress)
}
