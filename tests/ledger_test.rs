mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{parse_date, test_tracker};
use expense_tracker::application::AppError;
use expense_tracker::domain::{ExpenseId, ExpenseRecord, Ledger, YearMonth};

#[test]
fn test_adding_n_expenses_yields_distinct_increasing_ids() {
    let mut tracker = test_tracker();

    for i in 0..10 {
        tracker.add_expense(100 + i, "misc");
    }

    let ids: Vec<ExpenseId> = tracker.list_expenses().iter().map(|r| r.id).collect();
    assert_eq!(ids, (0..10).collect::<Vec<ExpenseId>>());
}

#[test]
fn test_delete_removes_exactly_one_and_preserves_others() {
    let mut tracker = test_tracker();
    tracker.add_expense(1000, "rent");
    tracker.add_expense(550, "food");
    tracker.add_expense(225, "coffee");
    tracker.add_expense(4000, "travel");
    let before: Vec<ExpenseRecord> = tracker.list_expenses().to_vec();

    let removed = tracker.delete_expense(2).unwrap();

    assert_eq!(removed, before[2]);
    let expected: Vec<ExpenseRecord> = before
        .iter()
        .filter(|r| r.id != 2)
        .cloned()
        .collect();
    assert_eq!(tracker.list_expenses(), expected.as_slice());
}

#[test]
fn test_update_changes_only_target_record() {
    let mut ledger = Ledger::new();
    ledger.add(1000, "rent", parse_date("2024-01-01"));
    ledger.add(550, "food", parse_date("2024-01-02"));
    let untouched = ledger.list()[0].clone();

    ledger
        .update(1, 600, "groceries", parse_date("2024-02-20"))
        .unwrap();

    assert_eq!(ledger.list()[0], untouched);
    let updated = &ledger.list()[1];
    assert_eq!(updated.id, 1);
    assert_eq!(updated.amount_cents, 600);
    assert_eq!(updated.category, "groceries");
    assert_eq!(updated.formatted_date(), "2024-02-20");
}

#[test]
fn test_update_unknown_id_leaves_ledger_unchanged() {
    let mut tracker = test_tracker();
    tracker.add_expense(1000, "rent");
    let before = tracker.list_expenses().to_vec();

    let result = tracker.update_expense(5, 1, "x");

    assert!(matches!(result, Err(AppError::ExpenseNotFound(5))));
    assert_eq!(tracker.list_expenses(), before.as_slice());
}

#[test]
fn test_update_with_negative_amount_is_rejected() {
    let mut tracker = test_tracker();
    tracker.add_expense(1000, "rent");

    let err = tracker.update_expense(0, -250, "rent").unwrap_err();

    assert!(matches!(err, AppError::NegativeAmount(-250)));
    assert_eq!(err.to_string(), "Amount cannot be negative: -2.50");
    assert_eq!(tracker.list_expenses()[0].amount_cents, 1000);
}

#[test]
fn test_totals() -> Result<()> {
    let mut tracker = test_tracker();
    assert_eq!(tracker.total_expenses()?, 0);

    tracker.add_expense(1000, "food");
    tracker.add_expense(550, "transit");
    tracker.add_expense(225, "food");

    assert_eq!(tracker.total_expenses()?, 1775);
    assert_eq!(tracker.category_total("food")?, 1225);
    Ok(())
}

#[test]
fn test_month_filter_returns_matching_records_in_order() {
    let mut ledger = Ledger::new();
    ledger.add(100, "a", parse_date("2024-03-01"));
    ledger.add(200, "b", parse_date("2024-03-15"));
    ledger.add(300, "c", parse_date("2024-04-01"));

    let month: YearMonth = "2024-03".parse().unwrap();
    let records = ledger.month_filter(month);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].formatted_date(), "2024-03-01");
    assert_eq!(records[1].formatted_date(), "2024-03-15");
}

#[test]
fn test_month_report_separates_month_and_overall_totals() -> Result<()> {
    let mut tracker = test_tracker();
    tracker.add_expense(2000, "rent");
    tracker.add_expense(500, "food");

    let report = tracker.month_report("2024-03".parse()?)?;
    assert_eq!(report.count(), 2);
    assert_eq!(report.month_total, 2500);
    assert_eq!(report.overall_total, 2500);

    let other = tracker.month_report("2024-02".parse()?)?;
    assert!(other.is_empty());
    assert_eq!(other.month_total, 0);
    assert_eq!(other.overall_total, 2500);
    Ok(())
}

#[test]
fn test_overflowing_total_is_an_error() {
    let mut tracker = test_tracker();
    tracker.add_expense(9_000_000_000_000_000_000, "a");
    tracker.add_expense(9_000_000_000_000_000_000, "b");

    let err = tracker.total_expenses().unwrap_err();
    assert!(matches!(err, AppError::TotalOverflow));
    assert_eq!(err.to_string(), "Total is too large to compute");
    assert_eq!(tracker.category_total("a").unwrap(), 9_000_000_000_000_000_000);
    assert!(tracker.month_report("2024-03".parse().unwrap()).is_err());
}

#[test]
fn test_add_update_delete_scenario() -> Result<()> {
    let mut tracker = test_tracker();

    tracker.add_expense(2000, "rent");
    tracker.add_expense(500, "food");
    tracker.update_expense(1, 750, "snacks")?;
    tracker.delete_expense(0)?;

    let expenses = tracker.list_expenses();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, 1);
    assert_eq!(expenses[0].amount_cents, 750);
    assert_eq!(expenses[0].category, "snacks");
    assert_eq!(expenses[0].day(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

    Ok(())
}
