use crate::domain::{Cents, ExpenseRecord, YearMonth};

/// Expenses recorded in one calendar month.
///
/// Carries both the total for the month and the total of the whole ledger
/// so callers can show each under its own label.
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub month: YearMonth,
    pub expenses: Vec<ExpenseRecord>,
    pub month_total: Cents,
    pub overall_total: Cents,
}

impl MonthReport {
    pub fn count(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
