//! Flat record extracted from one report block.

use super::category::{Category, CategoryValues};

/// One instrument's figures for one report date.
///
/// Numeric fields keep their textual form with thousands separators
/// removed; typing happens when records are assembled into a series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub instrument: String,
    /// Numeric exchange code from the `Code-` marker.
    pub code: String,
    /// `MM/DD/YY` token, empty when the block has none.
    pub date: String,
    /// Contract unit description, empty when absent.
    pub unit: String,
    pub open_interest: Option<String>,
    pub total_traders: Option<String>,
    pub commitments: CategoryValues<String>,
    pub changes: CategoryValues<String>,
    pub percents: CategoryValues<String>,
    /// Only [`Category::TRADER_BEARING`] entries are ever set.
    pub traders: CategoryValues<String>,
}

const IDENTITY_COLUMNS: [&str; 6] = [
    "instrument",
    "code",
    "date",
    "unit",
    "open_interest",
    "total_traders",
];

impl Record {
    /// Flat column names in their stable output order.
    #[must_use]
    pub fn column_names() -> Vec<String> {
        let mut columns: Vec<String> = IDENTITY_COLUMNS.iter().map(|c| c.to_string()).collect();
        for category in Category::ALL {
            columns.push(format!("commit_{}", category.label()));
            columns.push(format!("change_{}", category.label()));
            columns.push(format!("percent_{}", category.label()));
        }
        for category in Category::TRADER_BEARING {
            columns.push(format!("traders_{}", category.label()));
        }
        columns
    }

    /// Flat values aligned with [`Record::column_names`]; missing values are empty.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        fn cell(v: Option<&String>) -> String {
            v.cloned().unwrap_or_default()
        }

        let mut row = vec![
            self.instrument.clone(),
            self.code.clone(),
            self.date.clone(),
            self.unit.clone(),
            cell(self.open_interest.as_ref()),
            cell(self.total_traders.as_ref()),
        ];
        for category in Category::ALL {
            row.push(cell(self.commitments.get(category)));
            row.push(cell(self.changes.get(category)));
            row.push(cell(self.percents.get(category)));
        }
        for category in Category::TRADER_BEARING {
            row.push(cell(self.traders.get(category)));
        }
        row
    }

    /// Rebuilds a record from named flat fields.
    ///
    /// `field` returns the cell for a column name; absent or blank cells
    /// become missing values.
    pub fn from_fields<'a, F>(field: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let text = |name: &str| -> Option<String> {
            field(name)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };

        let mut record = Record {
            instrument: text("instrument").unwrap_or_default(),
            code: text("code").unwrap_or_default(),
            date: text("date").unwrap_or_default(),
            unit: text("unit").unwrap_or_default(),
            open_interest: text("open_interest"),
            total_traders: text("total_traders"),
            ..Record::default()
        };

        for category in Category::ALL {
            let label = category.label();
            record
                .commitments
                .set(category, text(&format!("commit_{label}")));
            record.changes.set(category, text(&format!("change_{label}")));
            record.percents.set(category, text(&format!("percent_{label}")));
        }
        for category in Category::TRADER_BEARING {
            record
                .traders
                .set(category, text(&format!("traders_{}", category.label())));
        }

        record
    }
}
