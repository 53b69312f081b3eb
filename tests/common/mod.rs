// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use expense_tracker::application::ExpenseTracker;
use expense_tracker::cli::Menu;
use std::path::PathBuf;
use tempfile::TempDir;

/// Clock pinned to a known instant so dates are deterministic
pub fn fixed_clock() -> DateTime<Utc> {
    parse_date("2024-03-15")
}

/// Helper to create a tracker dated by the fixed clock
pub fn test_tracker() -> ExpenseTracker {
    ExpenseTracker::with_clock(fixed_clock)
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Drive the menu with scripted input and return everything it printed.
pub fn run_menu(
    tracker: &mut ExpenseTracker,
    script: &[&str],
    export_path: PathBuf,
) -> Result<String> {
    let mut input = script.join("\n");
    input.push('\n');
    run_menu_bytes(tracker, input.as_bytes(), export_path)
}

/// Drive the menu with raw input bytes, which need not be valid UTF-8.
pub fn run_menu_bytes(
    tracker: &mut ExpenseTracker,
    input: &[u8],
    export_path: PathBuf,
) -> Result<String> {
    let mut output = Vec::new();
    Menu::new(input, &mut output, export_path).run(tracker)?;
    Ok(String::from_utf8(output)?)
}

/// Temporary directory plus a path inside it for export targets
pub fn temp_export(file_name: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(file_name);
    Ok((temp_dir, path))
}
