use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{format_cents, Cents};

pub type ExpenseId = u64;

/// A single expense entry in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Assigned by the ledger, never reused after deletion
    pub id: ExpenseId,
    /// Amount in cents
    pub amount_cents: Cents,
    /// Free-text label (e.g., "food", "rent")
    pub category: String,
    /// When the expense was recorded or last updated
    pub date: DateTime<Utc>,
}

impl ExpenseRecord {
    pub fn new(
        id: ExpenseId,
        amount_cents: Cents,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount_cents,
            category: category.into(),
            date,
        }
    }

    /// Calendar day of the record, the granularity used for display and filtering.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Amount rendered with two decimals.
    pub fn formatted_amount(&self) -> String {
        format_cents(self.amount_cents)
    }

    /// Day rendered as `YYYY-MM-DD`.
    pub fn formatted_date(&self) -> String {
        self.day().format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_create_expense() {
        let date = Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap();
        let record = ExpenseRecord::new(3, 1250, "food", date);

        assert_eq!(record.id, 3);
        assert_eq!(record.amount_cents, 1250);
        assert_eq!(record.category, "food");
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_formatting_truncates_time_of_day() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap();
        let record = ExpenseRecord::new(0, 300, "transit", date);

        assert_eq!(record.formatted_amount(), "3.00");
        assert_eq!(record.formatted_date(), "2024-01-02");
    }
}
