//! Instrument allow-list filtering.

use std::collections::HashSet;

use crate::models::Record;

/// Keeps records whose instrument name is on the allow-list, compared exactly.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    allowed: HashSet<String>,
}

impl RecordFilter {
    pub fn new<I, S>(instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: instruments.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.allowed.contains(&record.instrument)
    }

    /// Filters `records`, preserving their order.
    pub fn apply<I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut dropped = 0usize;
        let kept: Vec<Record> = records
            .into_iter()
            .filter(|r| {
                let keep = self.matches(r);
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        tracing::debug!(kept = kept.len(), dropped, "Applied instrument filter");
        kept
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
