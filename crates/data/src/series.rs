//! Chronological series assembly.
//!
//! Records arrive as text. Building a series types every numeric field,
//! parses the report date and orders rows by it.

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, CategoryValues, Record};

/// A typed, date-ordered view of one [`Record`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesRow {
    pub instrument: String,
    pub code: String,
    pub date: Option<NaiveDate>,
    pub unit: String,
    pub open_interest: Option<f64>,
    pub total_traders: Option<f64>,
    pub commitments: CategoryValues<f64>,
    pub changes: CategoryValues<f64>,
    pub percents: CategoryValues<f64>,
    pub traders: CategoryValues<f64>,
}

impl SeriesRow {
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let coerce = |v: &String| coerce_numeric(v);
        Self {
            instrument: record.instrument.clone(),
            code: record.code.clone(),
            date: parse_report_date(&record.date),
            unit: record.unit.clone(),
            open_interest: record.open_interest.as_deref().and_then(coerce_numeric),
            total_traders: record.total_traders.as_deref().and_then(coerce_numeric),
            commitments: record.commitments.map(coerce),
            changes: record.changes.map(coerce),
            percents: record.percents.map(coerce),
            traders: record.traders.map(coerce),
        }
    }
}

impl SeriesRow {
    /// Flat values aligned with [`Record::column_names`].
    ///
    /// Dates are written as `YYYY-MM-DD`; missing values are empty.
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        fn cell(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }

        let mut row = vec![
            self.instrument.clone(),
            self.code.clone(),
            self.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            self.unit.clone(),
            cell(self.open_interest),
            cell(self.total_traders),
        ];
        for category in Category::ALL {
            row.push(cell(self.commitments.value(category)));
            row.push(cell(self.changes.value(category)));
            row.push(cell(self.percents.value(category)));
        }
        for category in Category::TRADER_BEARING {
            row.push(cell(self.traders.value(category)));
        }
        row
    }
}

/// Rows sorted ascending by date; rows without a date come last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesTable {
    rows: Vec<SeriesRow>,
}

impl SeriesTable {
    #[must_use]
    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct instruments in order of first appearance.
    #[must_use]
    pub fn instruments(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.instrument.as_str()) {
                seen.push(&row.instrument);
            }
        }
        seen
    }
}

pub struct SeriesBuilder;

impl SeriesBuilder {
    /// Types and orders `records`.
    ///
    /// The sort is stable: rows sharing a date, and rows without one, keep
    /// their arrival order.
    pub fn build<'a, I>(records: I) -> SeriesTable
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut rows: Vec<SeriesRow> = records.into_iter().map(SeriesRow::from_record).collect();

        let undated = rows.iter().filter(|r| r.date.is_none()).count();
        if undated > 0 {
            tracing::warn!(undated, "Rows without a parsable report date sort last");
        }

        rows.sort_by_key(|r| (r.date.is_none(), r.date));
        SeriesTable { rows }
    }
}

/// Converts a report cell to a number.
///
/// Every character other than digits, `.` and `-` is discarded first; an
/// empty remainder, or one that still does not parse, is missing.
#[must_use]
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parses a `MM/DD/YY` report date.
///
/// Two-digit years 69-99 fall in the 1900s and 00-68 in the 2000s, the
/// POSIX `%y` pivot.
#[must_use]
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw, "%m/%d/%y").ok()?;
    // chrono pivots at 70
    if date.year() == 2069 {
        return date.with_year(1969);
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(instrument: &str, date: &str) -> Record {
        Record {
            instrument: instrument.to_string(),
            date: date.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn coerce_strips_stray_characters() {
        assert_eq!(coerce_numeric("123,456"), Some(123_456.0));
        assert_eq!(coerce_numeric(" -1,234 "), Some(-1_234.0));
        assert_eq!(coerce_numeric("58.2%"), Some(58.2));
        assert_eq!(coerce_numeric("$1,000.50"), Some(1_000.5));
    }

    #[test]
    fn coerce_empty_is_missing_not_zero() {
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("n/a"), None);
        assert_eq!(coerce_numeric(",,,"), None);
    }

    #[test]
    fn coerce_unparsable_remainder_is_missing() {
        assert_eq!(coerce_numeric("1-2"), None);
        assert_eq!(coerce_numeric("1.2.3"), None);
        assert_eq!(coerce_numeric("-"), None);
    }

    #[test]
    fn two_digit_years_follow_report_century() {
        assert_eq!(
            parse_report_date("06/10/25"),
            NaiveDate::from_ymd_opt(2025, 6, 10)
        );
        assert_eq!(
            parse_report_date("12/29/98"),
            NaiveDate::from_ymd_opt(1998, 12, 29)
        );
    }

    #[test]
    fn century_pivot_sits_between_68_and_69() {
        assert_eq!(
            parse_report_date("01/02/69"),
            NaiveDate::from_ymd_opt(1969, 1, 2)
        );
        assert_eq!(
            parse_report_date("01/02/68"),
            NaiveDate::from_ymd_opt(2068, 1, 2)
        );
        assert_eq!(
            parse_report_date("01/02/70"),
            NaiveDate::from_ymd_opt(1970, 1, 2)
        );
    }

    #[test]
    fn bad_dates_are_missing() {
        assert_eq!(parse_report_date(""), None);
        assert_eq!(parse_report_date("13/01/25"), None);
        assert_eq!(parse_report_date("2025-06-10"), None);
    }

    #[test]
    fn rows_sorted_by_date_with_stable_ties() {
        let records = vec![
            record("B", "01/14/25"),
            record("A", "01/07/25"),
            record("C", "01/14/25"),
            record("D", "01/07/25"),
        ];
        let table = SeriesBuilder::build(&records);
        let order: Vec<_> = table.rows().iter().map(|r| r.instrument.as_str()).collect();
        assert_eq!(order, ["A", "D", "B", "C"]);
    }

    #[test]
    fn undated_rows_are_kept_and_sort_last() {
        let records = vec![
            record("X", "bad"),
            record("A", "02/04/25"),
            record("Y", ""),
            record("B", "01/07/25"),
        ];
        let table = SeriesBuilder::build(&records);
        let order: Vec<_> = table.rows().iter().map(|r| r.instrument.as_str()).collect();
        assert_eq!(order, ["B", "A", "X", "Y"]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn numeric_fields_are_typed() {
        let mut r = record("A", "01/07/25");
        r.open_interest = Some("277180".to_string());
        r.commitments
            .set(Category::ComLong, Some("66,048".to_string()));
        r.percents.set(Category::ComLong, Some("23.8".to_string()));
        r.traders.set(Category::ComLong, Some("".to_string()));

        let row = SeriesRow::from_record(&r);
        assert_eq!(row.open_interest, Some(277_180.0));
        assert_eq!(row.commitments.value(Category::ComLong), Some(66_048.0));
        assert_eq!(row.percents.value(Category::ComLong), Some(23.8));
        assert_eq!(row.traders.value(Category::ComLong), None);
    }

    #[test]
    fn flat_row_aligns_with_record_columns() {
        let mut r = record("A", "01/07/25");
        r.commitments
            .set(Category::ComLong, Some("1,100".to_string()));
        let row = SeriesRow::from_record(&r).to_row();
        let columns = Record::column_names();
        assert_eq!(row.len(), columns.len());
        assert_eq!(row[2], "2025-01-07");
        let idx = columns.iter().position(|c| c == "commit_com_long").unwrap();
        assert_eq!(row[idx], "1100");
        assert_eq!(row[4], "");
    }

    #[test]
    fn instruments_in_first_appearance_order() {
        let records = vec![
            record("B", "01/07/25"),
            record("A", "01/07/25"),
            record("B", "01/14/25"),
        ];
        let table = SeriesBuilder::build(&records);
        assert_eq!(table.instruments(), ["B", "A"]);
    }
}
