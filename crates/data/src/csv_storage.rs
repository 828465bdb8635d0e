use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer};

use crate::error::DataError;
use crate::models::Record;

pub struct CsvStorage;

impl CsvStorage {
    /// Writes records with a header row in [`Record::column_names`] order.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<(), DataError> {
        Self::write_table(
            writer,
            &Record::column_names(),
            records.iter().map(Record::to_row),
        )
    }

    /// Writes an arbitrary table: one header row, then `rows`.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_table<W, I>(writer: W, header: &[String], rows: I) -> Result<(), DataError>
    where
        W: Write,
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut writer = Writer::from_writer(writer);
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads records by header name, so column order in the file does not matter.
    ///
    /// # Errors
    /// Returns error if the data is not valid CSV or has no `instrument` column
    pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DataError> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns: HashMap<String, usize> = reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect();
        if !columns.contains_key("instrument") {
            return Err(DataError::MissingColumn("instrument".to_string()));
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            records.push(Record::from_fields(|name| {
                columns.get(name).and_then(|&i| row.get(i))
            }));
        }
        Ok(records)
    }

    /// # Errors
    /// Returns error if the file cannot be created or writing fails
    pub fn write_records_file(path: impl AsRef<Path>, records: &[Record]) -> Result<(), DataError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Self::write_records(file, records)?;
        tracing::info!(path = %path.display(), count = records.len(), "Wrote records CSV");
        Ok(())
    }

    /// # Errors
    /// Returns error if the file cannot be opened or parsed
    pub fn read_records_file(path: impl AsRef<Path>) -> Result<Vec<Record>, DataError> {
        let file = File::open(path.as_ref())?;
        Self::read_records(file)
    }
}
