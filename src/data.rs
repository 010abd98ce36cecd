use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::str::FromStr;

use anyhow::Result;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::journal::{JournalEntry, MonthKey, Reference, Schedule, ScheduleRow};

/// Number of lead-in rows in the schedule file before the real header.
const HEADER_SKIP_ROWS: usize = 2;
/// Source header label of the item-name column.
const ITEM_COLUMN: &str = "Items";
/// Source header label of the invoice reference column.
const REFERENCE_COLUMN: &str = "Invoice number";
/// Item-name marker of the trailing summary row, which is not an item.
const SUMMARY_ROW_MARKER: &str = "Balance";

/// Date rendering used in the output artifact and the console echo.
const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("schedule file '{0}' not found")]
    NotFound(String),
    #[error("failed to read schedule: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse schedule: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed schedule: missing header row")]
    MissingHeader,
    #[error("malformed schedule: missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("malformed schedule: no month columns (e.g. 'May-24') in header")]
    NoMonthColumns,
}

/// Loads the prepayment schedule from a CSV file.
pub fn load_schedule(file_path: &str) -> Result<Schedule, LoadError> {
    let file = File::open(file_path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(file_path.to_string())
        } else {
            LoadError::Io(err)
        }
    })?;

    read_schedule(file)
}

/// Reads a prepayment schedule from any CSV stream.
///
/// The expected layout is the one the finance export produces: two
/// ignored lead-in rows, then a header row naming the item column
/// (`Items`), the reference column (`Invoice number`) and one or more
/// month columns (`Jan-24`, `Feb-24`, ...), then one row per prepayment
/// item. An `Invoice amount` column may be present but plays no part in
/// amortization. A trailing `Balance` summary row is dropped.
pub fn read_schedule<R: Read>(reader: R) -> Result<Schedule, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader.records().skip(HEADER_SKIP_ROWS);
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(LoadError::MissingHeader),
    };

    let item_index = column_index(&header, ITEM_COLUMN)?;
    let reference_index = column_index(&header, REFERENCE_COLUMN)?;

    let mut month_columns = Vec::new();
    for (index, label) in header.iter().enumerate() {
        if let Some(month) = MonthKey::parse_label(label) {
            month_columns.push((index, month));
        }
    }
    if month_columns.is_empty() {
        return Err(LoadError::NoMonthColumns);
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record?;

        let item_name = record.get(item_index).unwrap_or("");
        if item_name.is_empty() {
            debug!("skipping row without an item name");
            continue;
        }
        if item_name == SUMMARY_ROW_MARKER {
            debug!("dropping '{SUMMARY_ROW_MARKER}' summary row");
            continue;
        }

        let reference = Reference::parse(record.get(reference_index).unwrap_or(""));

        let mut monthly_amounts = HashMap::new();
        for &(index, month) in &month_columns {
            // Blank or unparseable cells mean no amortization that month.
            let amount = record
                .get(index)
                .and_then(|cell| Decimal::from_str(cell).ok())
                .unwrap_or(Decimal::ZERO);
            monthly_amounts.insert(month, amount);
        }

        rows.push(ScheduleRow::new(item_name.to_string(), reference, monthly_amounts));
    }

    let months = month_columns.into_iter().map(|(_, month)| month).collect();
    let schedule = Schedule::new(rows, months);
    debug!("loaded {} schedule rows", schedule.rows().len());

    Ok(schedule)
}

fn column_index(header: &csv::StringRecord, name: &'static str) -> Result<usize, LoadError> {
    header
        .iter()
        .position(|label| label == name)
        .ok_or(LoadError::MissingColumn(name))
}

/// Row shape of the output artifact, one per journal entry.
#[derive(Debug, Serialize)]
pub struct EntryRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Reference")]
    pub reference: String,
    #[serde(rename = "Account")]
    pub account: &'static str,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
}

impl From<&JournalEntry> for EntryRecord {
    fn from(entry: &JournalEntry) -> Self {
        EntryRecord {
            date: entry.date().format(DATE_FORMAT).to_string(),
            description: entry.description().clone(),
            reference: entry.reference().to_string(),
            account: entry.account().code(),
            amount: entry.amount(),
        }
    }
}

/// Serializes the generated entries as CSV.
pub fn write_entries<W: Write>(writer: W, entries: &[JournalEntry]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for entry in entries {
        let record: EntryRecord = entry.into();
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;

    Ok(())
}

/// Writes the output artifact for a run, named after the target month.
/// Returns the path written to.
pub fn export_csv(entries: &[JournalEntry], target_month: MonthKey) -> Result<String> {
    let output_path = format!("accounting_entries_{target_month}.csv");
    write_entries(File::create(&output_path)?, entries)?;

    Ok(output_path)
}

/// Echoes the generated entries to the console as a plain table.
pub fn print_entries(entries: &[JournalEntry]) {
    let description_width = entries
        .iter()
        .map(|entry| entry.description().len())
        .max()
        .unwrap_or(0)
        .max("Description".len());

    println!("--- Generated accounting entries ---");
    println!(
        "{:<10} {:<description_width$} {:>9} {:>7} {:>12}",
        "Date", "Description", "Reference", "Account", "Amount"
    );
    for entry in entries {
        println!(
            "{} {:<description_width$} {:>9} {:>7} {:>12}",
            entry.date().format(DATE_FORMAT),
            entry.description(),
            entry.reference().to_string(),
            entry.account().code(),
            entry.amount(),
        );
    }
}
