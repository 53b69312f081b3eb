use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{ExpenseRecord, Ledger};

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 4] = ["ID", "Amount", "Category", "Date"];

/// Full ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub next_id: u64,
    pub expenses: Vec<ExpenseRecord>,
}

/// Output format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` files get a JSON snapshot, everything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Export expenses to CSV format. Returns the number of rows written.
pub fn export_csv<W: Write>(ledger: &Ledger, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    let mut count = 0;
    for record in ledger.iter() {
        csv_writer.write_record(&[
            record.id.to_string(),
            record.formatted_amount(),
            record.category.clone(),
            record.formatted_date(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Export the whole ledger as a JSON snapshot
pub fn export_json<W: Write>(ledger: &Ledger, mut writer: W) -> Result<LedgerSnapshot> {
    let snapshot = LedgerSnapshot {
        version: env!("CARGO_PKG_VERSION").to_string(),
        exported_at: Utc::now(),
        next_id: ledger.next_id(),
        expenses: ledger.list().to_vec(),
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    writer.write_all(json.as_bytes())?;
    writer.flush()?;

    Ok(snapshot)
}

/// Create or truncate `path` and export the ledger into it.
/// Everything is flushed to disk before returning.
pub fn export_to_path(ledger: &Ledger, path: &Path, format: ExportFormat) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let count = match format {
        ExportFormat::Csv => export_csv(ledger, &mut writer)?,
        ExportFormat::Json => export_json(ledger, &mut writer)?.expenses.len(),
    };

    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush export")?;
    file.sync_all().context("Failed to sync export to disk")?;

    Ok(count)
}
