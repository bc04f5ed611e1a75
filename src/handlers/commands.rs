//! Command definitions
//!
//! Commands carry unvalidated caller input into the handlers.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Smallest page a list endpoint returns
pub const MIN_PAGE_SIZE: i64 = 5;

/// Largest page a list endpoint returns
pub const MAX_PAGE_SIZE: i64 = 10;

// =========================================================================
// CreateUserCommand
// =========================================================================

/// Command to register an account owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl CreateUserCommand {
    pub fn new(username: String, full_name: String, email: String) -> Self {
        Self {
            username,
            full_name,
            email,
        }
    }
}

// =========================================================================
// UpdateUserCommand
// =========================================================================

/// Command to change a user's profile; `None` leaves a field as it is
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserCommand {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserCommand {
    pub fn new(username: String, full_name: Option<String>, email: Option<String>) -> Self {
        Self {
            username,
            full_name,
            email,
        }
    }
}

// =========================================================================
// CreateAccountCommand
// =========================================================================

/// Command to open an account for an existing user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountCommand {
    pub owner: String,
    /// ISO 4217 code, checked against the supported set
    pub currency: String,
}

impl CreateAccountCommand {
    pub fn new(owner: String, currency: String) -> Self {
        Self { owner, currency }
    }
}

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move money between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    pub from_account_id: i64,
    pub to_account_id: i64,
    /// Minor currency units; must be positive
    pub amount: i64,
    /// Both accounts must hold this currency
    pub currency: String,
}

impl TransferCommand {
    pub fn new(from_account_id: i64, to_account_id: i64, amount: i64, currency: String) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
            currency,
        }
    }
}

// =========================================================================
// Pagination
// =========================================================================

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_id: i64,
    pub page_size: i64,
}

impl Page {
    pub fn new(page_id: i64, page_size: i64) -> Self {
        Self { page_id, page_size }
    }

    /// Validate and convert to `(limit, offset)`
    pub fn limit_offset(&self) -> Result<(i64, i64), DomainError> {
        if self.page_id < 1 {
            return Err(DomainError::InvalidPage(format!(
                "page_id must be at least 1 (got {})",
                self.page_id
            )));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(DomainError::InvalidPage(format!(
                "page_size must be between {} and {} (got {})",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.page_size
            )));
        }

        let offset = (self.page_id - 1)
            .checked_mul(self.page_size)
            .ok_or_else(|| {
                DomainError::InvalidPage(format!("page_id {} is out of range", self.page_id))
            })?;

        Ok((self.page_size, offset))
    }
}
