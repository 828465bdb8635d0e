//! Collection and analysis stages.
//!
//! Each report page is handled on its own: a page that cannot be fetched or
//! read is reported and skipped while the others are still collected.

use anyhow::{Context, Result};
use cot_core::{FeatureConfig, ReportSource};
use cot_data::{
    extract_preformatted, split_blocks, Record, RecordExtractor, RecordFilter, SeriesBuilder,
};
use cot_signals::{FeatureEngine, FeatureTable};

/// A report page that could not be collected.
#[derive(Debug)]
pub struct SourceFailure {
    pub url: String,
    pub error: anyhow::Error,
}

/// Records gathered from every page, in page then block order.
#[derive(Debug, Default)]
pub struct CollectOutcome {
    pub records: Vec<Record>,
    pub failures: Vec<SourceFailure>,
}

/// Fetches, extracts and filters every page in `urls`.
pub async fn collect_records(
    source: &dyn ReportSource,
    urls: &[String],
    filter: &RecordFilter,
) -> CollectOutcome {
    let mut outcome = CollectOutcome::default();

    for url in urls {
        match collect_page(source, url, filter).await {
            Ok(records) => {
                tracing::info!(url = %url, count = records.len(), "Collected records");
                outcome.records.extend(records);
            }
            Err(error) => {
                tracing::warn!(url = %url, "Skipping report: {:#}", error);
                outcome.failures.push(SourceFailure {
                    url: url.clone(),
                    error,
                });
            }
        }
    }

    outcome
}

async fn collect_page(
    source: &dyn ReportSource,
    url: &str,
    filter: &RecordFilter,
) -> Result<Vec<Record>> {
    let html = source
        .fetch_html(url)
        .await
        .with_context(|| format!("Error fetching {url} via {}", source.name()))?;
    let text = extract_preformatted(&html).with_context(|| format!("Error reading {url}"))?;

    let blocks = split_blocks(&text);
    let extracted = RecordExtractor::extract_all(blocks.iter().copied());
    tracing::debug!(
        url = %url,
        blocks = blocks.len(),
        extracted = extracted.len(),
        "Extracted report blocks"
    );

    Ok(filter.apply(extracted))
}

/// Orders `records` into a series and derives its features.
#[must_use]
pub fn build_features(records: &[Record], config: &FeatureConfig) -> FeatureTable {
    let table = SeriesBuilder::build(records);
    tracing::info!(
        rows = table.len(),
        instruments = table.instruments().len(),
        "Built series table"
    );
    FeatureEngine::new(config.clone()).compute(&table)
}
