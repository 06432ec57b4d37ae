use anyhow::{Context, Result};
use config::{DatasetConfig, SyncConfig};
use models::LogoMap;
use processor::{CsvLoader, LogoPatcher, PatchReport};
use report::SyncReporter;
use std::io::{self, Write};
use storage::DatasetStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod models;
mod processor;
mod report;
mod storage;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = SyncConfig::load().context("Failed to load sync configuration")?;
    info!(
        "Syncing logos from {} into {} dataset(s){}",
        config.csv_path.display(),
        config.datasets.len(),
        if config.dry_run { " (dry run)" } else { "" }
    );

    let stdout = io::stdout();
    let mut reporter = SyncReporter::new(stdout.lock());
    run(&config, &mut reporter)?;

    Ok(())
}

/// Loads the CSV once, then patches each dataset in turn.
fn run<W: Write>(config: &SyncConfig, reporter: &mut SyncReporter<W>) -> Result<Vec<PatchReport>> {
    let logos = CsvLoader::new().load_file(&config.csv_path)?;
    if logos.is_empty() {
        warn!("{} has no entries, nothing will be updated", config.csv_path.display());
    }
    let patcher = LogoPatcher::new();

    let mut reports = Vec::with_capacity(config.datasets.len());
    for dataset in &config.datasets {
        let report = process_dataset(dataset, &logos, &patcher, config.dry_run, reporter)
            .with_context(|| format!("Failed to update {}", dataset.name))?;
        reports.push(report);
    }

    reporter.summary(&logos)?;
    Ok(reports)
}

fn process_dataset<W: Write>(
    dataset: &DatasetConfig,
    logos: &LogoMap,
    patcher: &LogoPatcher,
    dry_run: bool,
    reporter: &mut SyncReporter<W>,
) -> Result<PatchReport> {
    reporter.dataset_started(dataset)?;

    let store = DatasetStore::new(&dataset.path);
    let mut records = store.load()?;

    let report = patcher.patch_records(&mut records, logos);
    reporter.record_notices(dataset, &report)?;

    if dry_run {
        warn!("Dry run: leaving {} untouched", store.path().display());
    } else {
        store.save(&records)?;
    }

    reporter.dataset_finished(dataset, &report)?;
    Ok(report)
}
