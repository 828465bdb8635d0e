//! Run command: fetch and analyze in one pass.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use cot_core::{AppConfig, ReportSource};
use cot_data::CsvStorage;

use super::analyze::{analyze_records, FeatureArgs};
use super::fetch::{fetch_records, FetchArgs};
use crate::source::HttpReportSource;

/// Arguments for the run command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub fetch: FetchArgs,

    #[command(flatten)]
    pub features: FeatureArgs,

    /// Skip writing the records CSV
    #[arg(long, default_value = "false")]
    pub no_save: bool,
}

/// Fetches records from `source`, optionally saves them, then analyzes them.
///
/// # Errors
/// Returns an error if an output file cannot be written.
pub async fn run_with_source(
    source: &dyn ReportSource,
    config: &AppConfig,
    save: bool,
) -> Result<()> {
    let records = fetch_records(source, config).await;
    if records.is_empty() {
        tracing::info!("No records found for specified instruments.");
        return Ok(());
    }

    if save {
        CsvStorage::write_records_file(&config.output.records_path, &records)
            .with_context(|| format!("Failed to write {}", config.output.records_path))?;
    }

    analyze_records(&records, config)
}

/// Runs the full pipeline.
///
/// # Errors
/// Returns an error if configuration is invalid or an output file cannot be written.
pub async fn run_pipeline(args: RunArgs) -> Result<()> {
    let config = args
        .features
        .apply(args.fetch.apply(super::load_config(args.fetch.config.as_deref())?))?;
    let source = HttpReportSource::new(Duration::from_secs(args.fetch.timeout_secs))?;

    run_with_source(&source, &config, !args.no_save).await
}
