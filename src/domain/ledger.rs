use chrono::{DateTime, Utc};

use super::{checked_sum, Cents, ExpenseId, ExpenseRecord, YearMonth};

/// In-memory expense ledger.
///
/// Records keep their insertion order. Ids come from a counter that only
/// moves forward, so an id is never handed out twice even after deletion.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    next_id: ExpenseId,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new expense and return its id.
    pub fn add(
        &mut self,
        amount_cents: Cents,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> ExpenseId {
        let id = self.next_id;
        self.records
            .push(ExpenseRecord::new(id, amount_cents, category, date));
        self.next_id += 1;
        id
    }

    /// Overwrite amount, category and date of the expense with the given id.
    /// The ledger is left untouched on error.
    pub fn update(
        &mut self,
        id: ExpenseId,
        amount_cents: Cents,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Result<&ExpenseRecord, LedgerError> {
        if amount_cents < 0 {
            return Err(LedgerError::NegativeAmount(amount_cents));
        }

        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(LedgerError::NotFound(id))?;

        record.amount_cents = amount_cents;
        record.category = category.into();
        record.date = date;
        Ok(record)
    }

    /// Remove the expense with the given id, preserving the order of the rest.
    pub fn delete(&mut self, id: ExpenseId) -> Option<ExpenseRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// All expenses in insertion order.
    pub fn list(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next added expense will receive.
    pub fn next_id(&self) -> ExpenseId {
        self.next_id
    }

    /// Sum of every expense in the ledger.
    pub fn total(&self) -> Result<Cents, LedgerError> {
        self.total_where(|_| true)
    }

    /// Sum of the expenses matching the predicate.
    pub fn total_where<P>(&self, mut predicate: P) -> Result<Cents, LedgerError>
    where
        P: FnMut(&ExpenseRecord) -> bool,
    {
        checked_sum(
            self.records
                .iter()
                .filter(|r| predicate(r))
                .map(|r| r.amount_cents),
        )
        .ok_or(LedgerError::TotalOverflow)
    }

    /// Sum of the expenses in a category (case-insensitive).
    pub fn category_total(&self, category: &str) -> Result<Cents, LedgerError> {
        let category = category.trim();
        self.total_where(|r| r.category.eq_ignore_ascii_case(category))
    }

    /// Expenses dated within the given calendar month, in insertion order.
    pub fn month_filter(&self, month: YearMonth) -> Vec<&ExpenseRecord> {
        self.records
            .iter()
            .filter(|r| month.contains(&r.date))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    NegativeAmount(Cents),
    NotFound(ExpenseId),
    TotalOverflow,
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::NegativeAmount(amount) => {
                write!(
                    f,
                    "Amount cannot be negative ({})",
                    super::format_cents(*amount)
                )
            }
            LedgerError::NotFound(id) => write!(f, "No expense with ID {}", id),
            LedgerError::TotalOverflow => write!(f, "Total is too large to compute"),
        }
    }
}

impl std::error::Error for LedgerError {}
