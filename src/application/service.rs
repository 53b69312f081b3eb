use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    checked_sum, Cents, ExpenseId, ExpenseRecord, Ledger, LedgerError, YearMonth,
};
use crate::io::{export_to_path, ExportFormat};

use super::{AppError, MonthReport};

/// Source of the timestamp stamped on new and updated expenses.
pub type Clock = fn() -> DateTime<Utc>;

/// Application service providing high-level operations for the expense ledger.
/// This is the primary interface for any client (menu, tests, etc.).
pub struct ExpenseTracker {
    ledger: Ledger,
    clock: Clock,
}

/// Result of an export
#[derive(Debug)]
pub struct ExportResult {
    pub format: ExportFormat,
    pub count: usize,
}

impl Default for ExpenseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseTracker {
    /// Create an empty tracker dated by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty tracker with a custom clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            ledger: Ledger::new(),
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Mutations
    // ========================

    /// Record a new expense dated now.
    pub fn add_expense(&mut self, amount_cents: Cents, category: &str) -> ExpenseRecord {
        let date = (self.clock)();
        let id = self.ledger.add(amount_cents, category, date);
        info!(id, amount_cents, category, "expense added");
        ExpenseRecord::new(id, amount_cents, category, date)
    }

    /// Overwrite an existing expense. The date is reset to now.
    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        amount_cents: Cents,
        category: &str,
    ) -> Result<ExpenseRecord, AppError> {
        match self.ledger.update(id, amount_cents, category, (self.clock)()) {
            Ok(record) => {
                info!(id, amount_cents, category, "expense updated");
                Ok(record.clone())
            }
            Err(err) => {
                match &err {
                    LedgerError::NegativeAmount(_) => {
                        warn!(id, amount_cents, "rejected update with negative amount")
                    }
                    LedgerError::NotFound(_) => warn!(id, "update of unknown expense"),
                    LedgerError::TotalOverflow => {}
                }
                Err(err.into())
            }
        }
    }

    /// Remove an expense.
    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<ExpenseRecord, AppError> {
        match self.ledger.delete(id) {
            Some(record) => {
                info!(id, "expense deleted");
                Ok(record)
            }
            None => {
                warn!(id, "delete of unknown expense");
                Err(AppError::ExpenseNotFound(id))
            }
        }
    }

    // ========================
    // Queries
    // ========================

    /// All expenses in insertion order.
    pub fn list_expenses(&self) -> &[ExpenseRecord] {
        self.ledger.list()
    }

    pub fn total_expenses(&self) -> Result<Cents, AppError> {
        let total = self.ledger.total().inspect_err(|_| warn!("ledger total overflowed"))?;
        debug!(total, count = self.ledger.len(), "computed total");
        Ok(total)
    }

    pub fn category_total(&self, category: &str) -> Result<Cents, AppError> {
        let total = self
            .ledger
            .category_total(category)
            .inspect_err(|_| warn!(category, "category total overflowed"))?;
        debug!(total, category, "computed category total");
        Ok(total)
    }

    /// Expenses of one month, with the month total and the overall total.
    pub fn month_report(&self, month: YearMonth) -> Result<MonthReport, AppError> {
        let expenses: Vec<ExpenseRecord> =
            self.ledger.month_filter(month).into_iter().cloned().collect();
        let month_total = checked_sum(expenses.iter().map(|r| r.amount_cents))
            .ok_or(AppError::TotalOverflow)
            .inspect_err(|_| warn!(%month, "month total overflowed"))?;
        let overall_total = self.total_expenses()?;
        debug!(%month, count = expenses.len(), month_total, "built month report");

        Ok(MonthReport {
            month,
            expenses,
            month_total,
            overall_total,
        })
    }

    // ========================
    // Export
    // ========================

    /// Write every expense to `path`, creating or truncating the file.
    /// The format follows the file extension.
    pub fn export(&self, path: &Path) -> Result<ExportResult, AppError> {
        let format = ExportFormat::from_path(path);
        match export_to_path(&self.ledger, path, format) {
            Ok(count) => {
                info!(path = %path.display(), ?format, count, "ledger exported");
                Ok(ExportResult { format, count })
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "export failed");
                Err(AppError::Export {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}
