//! Console and CSV output of the enriched table.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cot_data::{CsvStorage, DataError};
use cot_signals::{FeatureRow, FeatureTable};

/// Columns shown on the console.
pub const CONSOLE_COLUMNS: [&str; 11] = [
    "date",
    "instrument",
    "net_com",
    "pct_net_com",
    "z_com",
    "scale_com",
    "bias_com",
    "bias_noncom",
    "bias_nonrep",
    "signal",
    "dominant_bias",
];

const MISSING: &str = "-";

pub struct Reporter;

impl Reporter {
    /// Renders the console projection as a fixed-width table.
    #[must_use]
    pub fn render(table: &FeatureTable) -> String {
        if table.is_empty() {
            return "nothing to do\n".to_string();
        }

        let cells: Vec<Vec<String>> = table.rows().iter().map(console_cells).collect();
        let widths: Vec<usize> = CONSOLE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, header)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = CONSOLE_COLUMNS.iter().map(|c| c.to_string()).collect();
        let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);

        let mut output = String::new();
        output.push_str(&format_line(&header, &widths));
        output.push('\n');
        output.push_str(&"-".repeat(total_width));
        output.push('\n');
        for row in &cells {
            output.push_str(&format_line(row, &widths));
            output.push('\n');
        }
        output
    }

    /// Writes every series and derived column with a header row.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_csv<W: Write>(writer: W, table: &FeatureTable) -> Result<(), DataError> {
        CsvStorage::write_table(writer, &FeatureTable::column_names(), table.to_rows())
    }

    /// # Errors
    /// Returns error if the file cannot be created or writing fails
    pub fn export_csv(path: impl AsRef<Path>, table: &FeatureTable) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        Self::write_csv(file, table)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = table.len(), "Exported feature table");
        Ok(())
    }
}

fn format_line(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn console_cells(row: &FeatureRow) -> Vec<String> {
    fn fixed(v: Option<f64>, decimals: usize) -> String {
        v.map(|x| format!("{x:.decimals$}"))
            .unwrap_or_else(|| MISSING.to_string())
    }
    fn text<T: ToString>(v: Option<T>) -> String {
        v.map(|x| x.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }

    let f = &row.features;
    vec![
        text(row.series.date.map(|d| d.format("%Y-%m-%d"))),
        row.series.instrument.clone(),
        fixed(f.net_com, 0),
        fixed(f.pct_net.com, 1),
        fixed(f.z_com, 2),
        text(f.scale.com),
        text(f.bias.com),
        text(f.bias.noncom),
        text(f.bias.nonrep),
        f.signal.to_string(),
        f.dominant_bias.to_string(),
    ]
}
