//! Analyze command.
//!
//! Loads extracted records, derives positioning features and prints the
//! sentiment table, optionally exporting the full enriched table.

use anyhow::{Context, Result};
use clap::Args;
use cot_core::{AppConfig, Partition};
use cot_data::{CsvStorage, Record};

use crate::pipeline::build_features;
use crate::report::Reporter;

/// Feature parameter overrides shared by `analyze` and `run`.
#[derive(Args, Debug, Clone, Default)]
pub struct FeatureArgs {
    /// Rolling-mean window in rows (overrides features.ma_window)
    #[arg(long)]
    pub ma_window: Option<usize>,

    /// Z-score lookback in rows (overrides features.z_lookback)
    #[arg(long)]
    pub z_lookback: Option<usize>,

    /// Signal z-score threshold (overrides features.z_thresh)
    #[arg(long)]
    pub z_thresh: Option<f64>,

    /// Statistics grouping: table or instrument (overrides features.partition)
    #[arg(long)]
    pub partition: Option<Partition>,

    /// Export the enriched table to this CSV path (overrides output.features_path)
    #[arg(long)]
    pub export: Option<String>,
}

impl FeatureArgs {
    /// Applies overrides and re-validates the result.
    ///
    /// # Errors
    /// Returns an error if an override leaves the parameters out of range.
    pub fn apply(&self, mut config: AppConfig) -> Result<AppConfig> {
        if let Some(ma_window) = self.ma_window {
            config.features.ma_window = ma_window;
        }
        if let Some(z_lookback) = self.z_lookback {
            config.features.z_lookback = z_lookback;
        }
        if let Some(z_thresh) = self.z_thresh {
            config.features.z_thresh = z_thresh;
        }
        if let Some(partition) = self.partition {
            config.features.partition = partition;
        }
        if let Some(export) = &self.export {
            config.output.features_path = Some(export.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Records CSV produced by `fetch`
    pub csv: String,

    /// Config file path (defaults to config/Config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(flatten)]
    pub features: FeatureArgs,
}

/// Derives features for `records` and reports them.
///
/// # Errors
/// Returns an error if the export file cannot be written.
pub fn analyze_records(records: &[Record], config: &AppConfig) -> Result<()> {
    let table = build_features(records, &config.features);
    print!("{}", Reporter::render(&table));

    if table.is_empty() {
        return Ok(());
    }
    if let Some(path) = &config.output.features_path {
        Reporter::export_csv(path, &table)?;
        println!("Exported feature table to {path}");
    }
    Ok(())
}

/// Runs the analyze command.
///
/// # Errors
/// Returns an error if configuration is invalid, the CSV cannot be read,
/// or the export fails.
pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config = args
        .features
        .apply(super::load_config(args.config.as_deref())?)?;
    let records = CsvStorage::read_records_file(&args.csv)
        .with_context(|| format!("Failed to read records from {}", args.csv))?;

    tracing::info!(path = %args.csv, count = records.len(), "Loaded records");
    analyze_records(&records, &config)
}
