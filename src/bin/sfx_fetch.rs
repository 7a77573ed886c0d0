use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use bbc_sfx_fetch::config::{Settings, SettingsLoader};
use bbc_sfx_fetch::error::{ErrorKind, SfxError};
use bbc_sfx_fetch::fetch::FetchUnit;
use bbc_sfx_fetch::http::HttpDownloader;
use bbc_sfx_fetch::orchestrator::Orchestrator;
use bbc_sfx_fetch::output::{JsonOutput, print_summary};
use bbc_sfx_fetch::progress::ConsoleProgress;

#[derive(Parser)]
#[command(name = "sfx-fetch")]
#[command(about = "Download and unpack every sample listed in the BBC Sound Effects catalog")]
#[command(version, author)]
struct Cli {
    #[arg(long, help = "CSV catalog with location, description and CDName columns")]
    catalog: Option<PathBuf>,

    #[arg(long, help = "Directory receiving the extracted audio files")]
    output: Option<Utf8PathBuf>,

    #[arg(long, help = "Number of parallel downloads")]
    workers: Option<usize>,

    #[arg(long, help = "JSON settings file (defaults to sfx-fetch.json when present)")]
    config: Option<String>,

    #[arg(long, help = "Per-request timeout in seconds")]
    timeout: Option<u64>,

    #[arg(long, help = "Write a JSON report of the run to this path")]
    report: Option<PathBuf>,

    #[arg(long, help = "Print the pending work items and exit")]
    dry_run: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<SfxError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SfxError) -> u8 {
    match error.kind() {
        ErrorKind::Catalog | ErrorKind::Config => 2,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = apply_overrides(SettingsLoader::resolve(cli.config.as_deref())?, &cli);
    settings.validate()?;

    let items = settings.catalog_reader().load(&settings.catalog)?;

    if cli.dry_run {
        JsonOutput::print_items(&items).into_diagnostic()?;
        return Ok(());
    }

    let downloader = HttpDownloader::with_timeout(settings.timeout())?;
    let orchestrator = Orchestrator::new(FetchUnit::new(downloader), settings.workers);
    let report = orchestrator.run(items, &ConsoleProgress);

    print_summary(&report, &mut io::stdout()).into_diagnostic()?;
    if let Some(path) = &cli.report {
        JsonOutput::write_report(&report, path)?;
    }
    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(catalog) = &cli.catalog {
        settings.catalog = catalog.clone();
    }
    if let Some(output) = &cli.output {
        settings.output_root = output.clone();
    }
    if let Some(workers) = cli.workers {
        settings.workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = timeout;
    }
    settings
}
