use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{
    format_cents, Cents, ExpenseId, LedgerError, ParseCentsError, ParseMonthError,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Amount cannot be negative: {}", amount(.0))]
    NegativeAmount(Cents),

    #[error("Total is too large to compute")]
    TotalOverflow,

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseCentsError),

    #[error("Invalid expense ID '{0}'")]
    InvalidId(String),

    #[error("Input is not valid UTF-8")]
    InvalidInput,

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Invalid month: {0}")]
    InvalidMonth(#[from] ParseMonthError),

    #[error("Failed to export to {}: {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NegativeAmount(amount) => AppError::NegativeAmount(amount),
            LedgerError::NotFound(id) => AppError::ExpenseNotFound(id),
            LedgerError::TotalOverflow => AppError::TotalOverflow,
        }
    }
}

fn amount(cents: &Cents) -> String {
    format_cents(*cents)
}
