//! CLI commands for the commitments-of-traders pipeline.

pub mod analyze;
pub mod fetch;
pub mod run;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use fetch::{fetch_records, fetch_to_csv, run_fetch, FetchArgs};
pub use run::{run_pipeline, run_with_source, RunArgs};

use anyhow::Result;
use cot_core::{AppConfig, ConfigLoader};

/// Loads the configuration file, or the default location when none is given.
pub(crate) fn load_config(path: Option<&str>) -> Result<AppConfig> {
    match path {
        Some(path) => ConfigLoader::load_from(path),
        None => ConfigLoader::load(),
    }
}
