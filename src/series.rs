//! Daily time series types and their CSV representation.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::{fs::File, io::BufWriter, path::Path};

/// Page views observed on a single day.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Record {
    pub date: NaiveDate,
    pub value: i64,
}

/// Sequence of daily records, kept in the order they were loaded.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Series {
    records: Vec<Record>,
}

impl Series {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|rec| rec.value as f64)
    }

    /// Return a new series holding only the records accepted by `keep`.
    pub fn filter<F: Fn(&Record) -> bool>(&self, keep: F) -> Self {
        let records = self.records.iter().filter(|&rec| keep(rec)).copied().collect();
        Self { records }
    }

    /// Read a series from a CSV file with a header row.
    ///
    /// The `date` column becomes the index and the first other column is
    /// taken as the value column, whatever its header says.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, lacks a `date` or value
    /// column, or contains a row that cannot be parsed.
    pub fn read_csv<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let mut reader =
            csv::Reader::from_path(file).with_context(|| format!("failed to open {file:?}"))?;

        let headers = reader.headers().context("failed to read header row")?.clone();
        let i_date = headers
            .iter()
            .position(|h| h.trim() == "date")
            .context("missing 'date' column")?;
        let i_value = (0..headers.len())
            .find(|&idx| idx != i_date)
            .context("missing value column")?;
        log::debug!("using column {:?} as value", &headers[i_value]);

        let mut records = Vec::new();
        for (i_row, row) in reader.records().enumerate() {
            // Data rows start on line 2, after the header.
            let line = i_row + 2;
            let row = row.with_context(|| format!("failed to read line {line}"))?;

            let date = row.get(i_date).context("missing date")?;
            let date = parse_date(date).with_context(|| format!("invalid date on line {line}"))?;

            let value = row.get(i_value).context("missing value")?;
            let value =
                parse_value(value).with_context(|| format!("invalid value on line {line}"))?;

            records.push(Record { date, value });
        }

        Ok(Self { records })
    }

    /// Write the series as a `date,value` CSV file.
    pub fn write_csv<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = file.as_ref();
        let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        // An empty series still gets its header row.
        if self.is_empty() {
            writer
                .write_record(["date", "value"])
                .context("failed to write header row")?;
        }
        for rec in &self.records {
            writer.serialize(rec).context("failed to serialize record")?;
        }

        writer.flush().context("failed to flush writer stream")?;

        Ok(())
    }
}

fn parse_date(field: &str) -> Result<NaiveDate> {
    let field = field.trim();
    if let Ok(date) = NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(field, "%Y-%m-%d %H:%M:%S") {
        return Ok(date_time.date());
    }
    bail!("expected YYYY-MM-DD, but got {field:?}")
}

fn parse_value(field: &str) -> Result<i64> {
    let field = field.trim();
    if let Ok(value) = field.parse::<i64>() {
        return Ok(value);
    }
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.trunc() as i64),
        _ => bail!("expected a number, but got {field:?}"),
    }
}
