//! Fetch command.
//!
//! Downloads the configured report pages, extracts one record per
//! instrument block and writes the allow-listed records to CSV.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use cot_core::{AppConfig, ReportSource};
use cot_data::{CsvStorage, Record, RecordFilter};

use crate::pipeline::collect_records;
use crate::source::HttpReportSource;

/// Arguments for the fetch command.
#[derive(Args, Debug, Clone, Default)]
pub struct FetchArgs {
    /// Config file path (defaults to config/Config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output CSV path (overrides output.records_path)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report page URL; repeat to fetch several (overrides sources.urls)
    #[arg(long = "url")]
    pub urls: Vec<String>,

    /// Instrument name to keep; repeat for several (overrides filter.instruments)
    #[arg(long = "instrument")]
    pub instruments: Vec<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,
}

impl FetchArgs {
    /// Applies command-line overrides on top of `config`.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(output) = &self.output {
            config.output.records_path = output.clone();
        }
        if !self.urls.is_empty() {
            config.sources.urls = self.urls.clone();
        }
        if !self.instruments.is_empty() {
            config.filter.instruments = self.instruments.clone();
        }
        config
    }
}

/// Collects records for `config` from `source`, returning them without writing.
pub async fn fetch_records(source: &dyn ReportSource, config: &AppConfig) -> Vec<Record> {
    let filter = RecordFilter::new(config.filter.instruments.iter().cloned());

    tracing::info!(
        source = source.name(),
        sources = config.sources.urls.len(),
        instruments = filter.len(),
        "Fetching reports"
    );

    let outcome = collect_records(source, &config.sources.urls, &filter).await;
    if !outcome.failures.is_empty() {
        tracing::warn!(
            failed = outcome.failures.len(),
            "Some report pages could not be collected"
        );
    }
    outcome.records
}

/// Collects records and writes them to `output.records_path`.
///
/// Nothing is written when no record survives the instrument filter.
/// Returns the number of records written.
///
/// # Errors
/// Returns an error if the CSV cannot be written.
pub async fn fetch_to_csv(source: &dyn ReportSource, config: &AppConfig) -> Result<usize> {
    let records = fetch_records(source, config).await;

    if records.is_empty() {
        tracing::info!("No records found for specified instruments.");
        return Ok(0);
    }

    CsvStorage::write_records_file(&config.output.records_path, &records)
        .with_context(|| format!("Failed to write {}", config.output.records_path))?;
    println!("CSV written to {}", config.output.records_path);

    Ok(records.len())
}

/// Runs the fetch command.
///
/// # Errors
/// Returns an error if configuration is invalid, the HTTP client cannot be
/// created or the CSV cannot be written.
pub async fn run_fetch(args: FetchArgs) -> Result<()> {
    let config = args.apply(super::load_config(args.config.as_deref())?);
    let source = HttpReportSource::new(Duration::from_secs(args.timeout_secs))?;
    fetch_to_csv(&source, &config).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let args = FetchArgs {
            output: Some("out/records.csv".to_string()),
            urls: vec!["https://example.com/report.htm".to_string()],
            instruments: vec!["EURO FX".to_string()],
            ..FetchArgs::default()
        };
        let config = args.apply(AppConfig::default());
        assert_eq!(config.output.records_path, "out/records.csv");
        assert_eq!(config.sources.urls, vec!["https://example.com/report.htm"]);
        assert_eq!(config.filter.instruments, vec!["EURO FX"]);
    }

    #[test]
    fn no_overrides_keep_config() {
        let config = FetchArgs::default().apply(AppConfig::default());
        assert_eq!(config, AppConfig::default());
    }
}
