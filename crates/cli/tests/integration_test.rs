use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use cot_cli::commands::{fetch_to_csv, run_with_source};
use cot_cli::{build_features, collect_records, Reporter};
use cot_core::{AppConfig, FeatureConfig, ReportSource};
use cot_data::{Category, CsvStorage, RecordFilter};
use cot_signals::{FeatureTable, TradeSignal};

const USD_INDEX: &str = "USD INDEX - ICE FUTURES U.S.";

struct FakeSource {
    pages: HashMap<String, Result<String, String>>,
}

impl FakeSource {
    fn new(pages: &[(&str, Result<String, String>)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, page)| (url.to_string(), page.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl ReportSource for FakeSource {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("404 Not Found")),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn block(instrument: &str, code: &str, date: &str, commitments: &str, changes: &str) -> String {
    format!(
        "{instrument}                                   Code-{code}\n\
FUTURES ONLY POSITIONS AS OF {date}\n\
(CONTRACTS OF U.S. DOLLAR INDEX X $1000)              OPEN INTEREST:       31,518\n\
COMMITMENTS\n\
{commitments}\n\
\n\
CHANGES FROM 01/01/25 (CHANGE IN OPEN INTEREST:        212)\n\
{changes}\n\
\n\
PERCENT OF OPEN INTEREST FOR EACH CATEGORY OF TRADERS\n\
     60.1       20.3      4.1       14.2       55.0       78.4       79.4       21.6       20.6\n\
\n\
NUMBER OF TRADERS IN EACH CATEGORY (TOTAL TRADERS:    91)\n\
       40         25       12         10         20         60         50\n"
    )
}

fn page(blocks: &[String]) -> String {
    format!(
        "<html><body><pre>Commitments of Traders - Futures Only\n\n{}</pre></body></html>",
        blocks.join("\n\n")
    )
}

fn usd_week(date: &str, com_long: u32, com_short: u32, chg_long: i32, chg_short: i32) -> String {
    block(
        USD_INDEX,
        "098662",
        date,
        &format!("   18,939      6,318      712      {com_long}      {com_short}     19,751     7,100      1,234      1,500"),
        &format!("      321       -118       15      {chg_long}      {chg_short}        222       -97        -10         5"),
    )
}

fn gold_block() -> String {
    block(
        "GOLD - COMMODITY EXCHANGE INC.",
        "088691",
        "06/10/25",
        " 1 2 3 4 5 6 7 8 9",
        " 0 0 0 0 0 0 0 0 0",
    )
}

fn config_for(url: &str, records_path: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.sources.urls = vec![url.to_string()];
    config.filter.instruments = vec![USD_INDEX.to_string()];
    config.output.records_path = records_path.to_string_lossy().into_owned();
    config
}

#[tokio::test]
async fn failing_source_does_not_block_others() {
    let good = page(&[usd_week("06/10/25", 100, 80, 0, 0), gold_block()]);
    let source = FakeSource::new(&[
        ("https://down.example/a.htm", Err("connection reset".to_string())),
        ("https://up.example/b.htm", Ok(good)),
    ]);
    let urls = vec![
        "https://down.example/a.htm".to_string(),
        "https://up.example/b.htm".to_string(),
        "https://missing.example/c.htm".to_string(),
    ];
    let filter = RecordFilter::new([USD_INDEX]);

    let outcome = collect_records(&source, &urls, &filter).await;

    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].instrument, USD_INDEX);
    assert_eq!(outcome.records[0].code, "098662");
    assert_eq!(outcome.records[0].open_interest.as_deref(), Some("31518"));

    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[0].url, "https://down.example/a.htm");
    let message = format!("{:#}", outcome.failures[0].error);
    assert!(message.contains("https://down.example/a.htm"));
    assert!(message.contains("connection reset"));
    assert_eq!(outcome.failures[1].url, "https://missing.example/c.htm");
}

#[tokio::test]
async fn fetch_writes_nothing_when_no_instrument_matches() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("data").join("records.csv");
    let source = FakeSource::new(&[("https://r.example/p.htm", Ok(page(&[gold_block()])))]);
    let config = config_for("https://r.example/p.htm", &records_path);

    let written = fetch_to_csv(&source, &config).await.unwrap();

    assert_eq!(written, 0);
    assert!(!records_path.exists());
}

#[tokio::test]
async fn fetch_writes_matching_records() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("data").join("records.csv");
    let body = page(&[usd_week("06/10/25", 100, 80, 0, 0), gold_block()]);
    let source = FakeSource::new(&[("https://r.example/p.htm", Ok(body))]);
    let config = config_for("https://r.example/p.htm", &records_path);

    let written = fetch_to_csv(&source, &config).await.unwrap();

    assert_eq!(written, 1);
    let loaded = CsvStorage::read_records_file(&records_path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].instrument, USD_INDEX);
}

#[tokio::test]
async fn run_succeeds_without_output_when_no_instrument_matches() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("records.csv");
    let source = FakeSource::new(&[("https://r.example/p.htm", Ok(page(&[gold_block()])))]);
    let config = config_for("https://r.example/p.htm", &records_path);

    run_with_source(&source, &config, true).await.unwrap();

    assert!(!records_path.exists());
}

#[tokio::test]
async fn page_without_preformatted_text_is_a_failure() {
    let source = FakeSource::new(&[(
        "https://x.example/r.htm",
        Ok("<html><body>Scheduled maintenance</body></html>".to_string()),
    )]);
    let outcome = collect_records(
        &source,
        &["https://x.example/r.htm".to_string()],
        &RecordFilter::new([USD_INDEX]),
    )
    .await;

    assert!(outcome.records.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert!(format!("{:#}", outcome.failures[0].error).contains("<pre>"));
}

#[tokio::test]
async fn consecutive_weeks_give_net_and_delta_positioning() {
    let body = page(&[
        usd_week("06/10/25", 110, 70, 10, -10),
        usd_week("06/03/25", 100, 80, 0, 0),
    ]);
    let source = FakeSource::new(&[("https://r.example/p.htm", Ok(body))]);
    let outcome = collect_records(
        &source,
        &["https://r.example/p.htm".to_string()],
        &RecordFilter::new([USD_INDEX]),
    )
    .await;
    assert_eq!(outcome.records.len(), 2);

    let table = build_features(&outcome.records, &FeatureConfig::default());
    let rows = table.rows();

    assert_eq!(rows[0].series.commitments.value(Category::ComLong), Some(100.0));
    assert_eq!(rows[0].features.net_com, Some(20.0));
    assert_eq!(rows[1].features.net_com, Some(40.0));
    assert_eq!(rows[1].features.delta_net_com, Some(20.0));

    // identical percent rows give no spread, so no z-score and no signal
    assert_eq!(rows[1].features.z_com, None);
    assert_eq!(rows[1].features.signal, TradeSignal::Flat);

    assert_eq!(rows[1].series.traders.value(Category::ComLong), Some(10.0));
    assert!((rows[1].features.avg_com_long_per_trader - 11.0).abs() < f64::EPSILON);
}

#[test]
fn records_and_features_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let records_path = dir.path().join("data").join("records.csv");
    let features_path = dir.path().join("features.csv");

    let text = format!(
        "{}\n\n{}",
        usd_week("06/03/25", 100, 80, 0, 0),
        usd_week("06/10/25", 110, 70, 10, -10)
    );
    let records = cot_data::RecordExtractor::extract_all(cot_data::split_blocks(&text));
    assert_eq!(records.len(), 2);

    CsvStorage::write_records_file(&records_path, &records).unwrap();
    let loaded = CsvStorage::read_records_file(&records_path).unwrap();
    assert_eq!(loaded, records);

    let table = build_features(&loaded, &FeatureConfig::default());
    Reporter::export_csv(&features_path, &table).unwrap();

    let exported = std::fs::read_to_string(&features_path).unwrap();
    let mut lines = exported.lines();
    assert_eq!(
        lines.next().unwrap(),
        FeatureTable::column_names().join(",")
    );
    assert_eq!(lines.count(), 2);
}
