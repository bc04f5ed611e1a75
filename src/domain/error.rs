//! Domain Error Types
//!
//! Validation failures raised by the caller layer before a transfer
//! transaction is opened.

use thiserror::Error;

use super::{AmountError, Currency, CurrencyError};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Zero, negative, unparsable or oversized amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error(transparent)]
    UnsupportedCurrency(#[from] CurrencyError),

    /// Transfer to same account while the policy rejects it
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    /// Account currency differs from the requested one
    #[error("Account {account_id} currency mismatch: {found} vs {expected}")]
    CurrencyMismatch {
        account_id: i64,
        expected: Currency,
        found: Currency,
    },

    #[error("Invalid pagination: {0}")]
    InvalidPage(String),
}

impl DomainError {
    pub fn currency_mismatch(account_id: i64, expected: Currency, found: Currency) -> Self {
        Self::CurrencyMismatch {
            account_id,
            expected,
            found,
        }
    }
}
