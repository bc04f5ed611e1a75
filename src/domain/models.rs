//! Ledger records
//!
//! Row types for the four ledger tables and the aggregate returned by a
//! transfer. Balances and amounts are integers in minor currency units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Currency;

/// Owner of one or more accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Balance-holding account.
///
/// Only the transfer engine changes `balance` after creation, and accounts
/// are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: i64,
    #[sqlx(try_from = "String")]
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
}

/// Immutable ledger line against one account.
///
/// Negative amounts are debits, positive amounts credits. Entries are always
/// written in pairs that sum to zero under the same `transfer_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    pub id: i64,
    pub transfer_id: i64,
    pub account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn is_debit(&self) -> bool {
        self.amount < 0
    }
}

/// Immutable record of one funds movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transfer {
    pub id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// Everything one committed transfer produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub transfer: Transfer,
    pub from_entry: Entry,
    pub to_entry: Entry,
    pub from_account: Account,
    pub to_account: Account,
}

impl TransferResult {
    /// The two entries offset each other and belong to `transfer`.
    pub fn is_balanced(&self) -> bool {
        self.from_entry.amount + self.to_entry.amount == 0
            && self.from_entry.transfer_id == self.transfer.id
            && self.to_entry.transfer_id == self.transfer.id
            && self.from_entry.account_id == self.transfer.from_account_id
            && self.to_entry.account_id == self.transfer.to_account_id
    }
}
