//! Field extraction from a free-text report block.
//!
//! A block is the section of a report for one instrument. Its layout is
//! meant for reading, not parsing: column spacing drifts between reports,
//! sections may be missing, and figures carry thousands separators. Each
//! section is located independently, so a missing section never prevents
//! extraction of the ones after it.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Category, CategoryValues, Record};

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static extraction pattern compiles")
}

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^(.+?)\s+Code-(\d+)"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"AS OF\s+(\d{2}/\d{2}/\d{2})"));
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"\(CONTRACTS OF\s+(.+?)\)"));
static OPEN_INTEREST_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"OPEN INTEREST:\s*([\d,]+)"));
static TOTAL_TRADERS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"TOTAL TRADERS:\s*(\d+)"));

// Each section heading is followed, on the next non-blank line, by its figure row.
static COMMITMENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s)COMMITMENTS.*?\n\s*([-\d, ]+)"));
static CHANGES_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s)CHANGES FROM.*?\n\s*([-\d, ]+)"));
static PERCENT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s)PERCENT OF OPEN INTEREST.*?\n\s*([-\d.\s]+)"));
static TRADERS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?s)NUMBER OF TRADERS.*?\n\s*([\d\s]+)"));

static SIGNED_INT_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"-?\d[\d,]*"));
static DECIMAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"-?\d+\.\d+|-?\d+"));
static UNSIGNED_TOKEN: LazyLock<Regex> = LazyLock::new(|| compile(r"\d+"));

/// Removes thousands separators from a numeric token.
#[must_use]
pub fn strip_separators(token: &str) -> String {
    token.replace(',', "")
}

/// Turns report blocks into [`Record`]s.
pub struct RecordExtractor;

impl RecordExtractor {
    /// Extracts one block.
    ///
    /// Returns `None` only when the block has no `<instrument> Code-<digits>`
    /// header; every other missing piece is left empty.
    #[must_use]
    pub fn extract(block: &str) -> Option<Record> {
        let Some(header) = HEADER_RE.captures(block) else {
            tracing::debug!(
                preview = %block.lines().next().unwrap_or_default(),
                "Skipping block without instrument header"
            );
            return None;
        };
        let instrument = header.get(1)?.as_str().trim().to_string();
        let code = header.get(2)?.as_str().to_string();

        let date = first_group(&DATE_RE, block).unwrap_or_default().to_string();
        let unit = first_group(&UNIT_RE, block)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let open_interest = first_group(&OPEN_INTEREST_RE, block)
            .map(strip_separators)
            .filter(|s| !s.is_empty());
        let total_traders = first_group(&TOTAL_TRADERS_RE, block).map(ToString::to_string);

        let commitments = section_tokens(block, &COMMITMENTS_RE, &SIGNED_INT_TOKEN);
        let changes = section_tokens(block, &CHANGES_RE, &SIGNED_INT_TOKEN);
        let percents = section_tokens(block, &PERCENT_RE, &DECIMAL_TOKEN);

        let mut traders = section_tokens(block, &TRADERS_RE, &UNSIGNED_TOKEN);
        // Some layouts repeat the total trader count at the head of the row.
        if traders.first().is_some_and(|first| Some(first) == total_traders.as_ref()) {
            traders.remove(0);
        }

        Some(Record {
            instrument,
            code,
            date,
            unit,
            open_interest,
            total_traders,
            commitments: CategoryValues::from_positional(&Category::ALL, commitments),
            changes: CategoryValues::from_positional(&Category::ALL, changes),
            percents: CategoryValues::from_positional(&Category::ALL, percents),
            traders: CategoryValues::from_positional(&Category::TRADER_BEARING, traders),
        })
    }

    /// Extracts every block that carries a header, preserving order.
    pub fn extract_all<'a, I>(blocks: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a str>,
    {
        blocks.into_iter().filter_map(Self::extract).collect()
    }
}

fn first_group<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn section_tokens(block: &str, section: &Regex, token: &Regex) -> Vec<String> {
    first_group(section, block)
        .map(|row| {
            token
                .find_iter(row)
                .map(|m| strip_separators(m.as_str()))
                .collect()
        })
        .unwrap_or_default()
}
