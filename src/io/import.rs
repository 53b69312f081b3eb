use anyhow::Result;
use chrono::NaiveDate;
use std::io::Read;

use crate::domain::{parse_cents, ExpenseId, ExpenseRecord};

use super::CSV_HEADER;

/// Error found on one line of an exported CSV file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "line {}: {}: {}", self.line, field, self.error),
            None => write!(f, "line {}: {}", self.line, self.error),
        }
    }
}

impl std::error::Error for ReadError {}

/// Read expenses back from the CSV export format.
///
/// Dates carry no time of day in the export, so records come back dated at
/// midnight UTC. Stops at the first malformed line.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let matches_header = headers.len() == CSV_HEADER.len()
        && headers
            .iter()
            .zip(CSV_HEADER)
            .all(|(found, expected)| found.trim() == expected);
    if !matches_header {
        return Err(ReadError {
            line: 1,
            field: None,
            error: format!("unexpected header: {:?}", headers),
        }
        .into());
    }

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // +2 for header and 0-indexing

        let row = result.map_err(|e| ReadError {
            line,
            field: None,
            error: format!("CSV parse error: {}", e),
        })?;

        let field_error = |field: &str, error: String| ReadError {
            line,
            field: Some(field.to_string()),
            error,
        };

        let id = row
            .get(0)
            .unwrap_or("")
            .trim()
            .parse::<ExpenseId>()
            .map_err(|e| field_error("ID", format!("Invalid id: {}", e)))?;
        let amount_cents = parse_cents(row.get(1).unwrap_or(""))
            .map_err(|e| field_error("Amount", format!("Invalid amount: {}", e)))?;
        let category = row.get(2).unwrap_or("").to_string();
        let date = NaiveDate::parse_from_str(row.get(3).unwrap_or("").trim(), "%Y-%m-%d")
            .map_err(|e| field_error("Date", format!("Invalid date: {}", e)))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| field_error("Date", "Invalid time of day".to_string()))?
            .and_utc();

        records.push(ExpenseRecord::new(id, amount_cents, category, date));
    }

    Ok(records)
}
