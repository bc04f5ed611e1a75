//! Store Errors
//!
//! Error types for query and transaction operations.

/// PostgreSQL SQLSTATE for a detected deadlock
const DEADLOCK_DETECTED: &str = "40P01";

/// PostgreSQL SQLSTATE for a serialization failure
const SERIALIZATION_FAILURE: &str = "40001";

/// PostgreSQL SQLSTATE for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for a unique constraint violation
const UNIQUE_VIOLATION: &str = "23505";

/// Errors that can occur in the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Statement, connection or commit failure, surfaced verbatim
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The unit of work failed and so did the rollback that followed it
    #[error("Transaction error: {cause}, Rollback error: {rollback}")]
    Rollback {
        #[source]
        cause: Box<StoreError>,
        rollback: sqlx::Error,
    },

    /// The commit task ended without reporting the store's decision
    #[error("Commit interrupted: {0}")]
    CommitInterrupted(String),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    /// A debit would leave the account below zero
    #[error("Insufficient funds in account {account_id}: balance would be {balance}")]
    InsufficientFunds { account_id: i64, balance: i64 },

    /// Transfer amount must be strictly positive
    #[error("Invalid transfer amount: {0}")]
    InvalidAmount(i64),
}

impl StoreError {
    fn sqlstate(&self) -> Option<String> {
        match self {
            StoreError::Database(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|code| code.into_owned())
            }
            StoreError::Rollback { cause, .. } => cause.sqlstate(),
            _ => None,
        }
    }

    /// Deadlock or serialization failure; the whole operation may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.sqlstate().as_deref(),
            Some(DEADLOCK_DETECTED) | Some(SERIALIZATION_FAILURE)
        )
    }

    /// A referenced row (account, user, transfer) does not exist.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }

    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(UNIQUE_VIOLATION)
    }

    /// The rollback after a failed unit of work also failed.
    pub fn is_rollback_failure(&self) -> bool {
        matches!(self, StoreError::Rollback { .. })
    }
}
