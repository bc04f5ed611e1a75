//! Query Layer
//!
//! Single-statement operations over the ledger tables. A `Queries` handle
//! borrows one connection, so every statement issued through a handle
//! obtained from `Store::exec_tx` runs inside that transaction.

use serde::{Deserialize, Serialize};
use sqlx::PgConnection;

use crate::domain::{Account, Currency, Entry, Transfer, User};

use super::StoreError;

const ACCOUNT_COLUMNS: &str = "id, owner, balance, currency, created_at";
const ENTRY_COLUMNS: &str = "id, transfer_id, account_id, amount, created_at";
const TRANSFER_COLUMNS: &str = "id, from_account_id, to_account_id, amount, created_at";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserParams {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// Fields left as `None` keep their stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserParams {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountParams {
    pub owner: String,
    pub balance: i64,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAccountsParams {
    pub owner: String,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Transfers where `from_account_id` sent OR `to_account_id` received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransfersParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryParams {
    pub transfer_id: i64,
    pub account_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntriesParams {
    pub account_id: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Signed delta to add to one account's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAccountBalanceParams {
    pub id: i64,
    pub amount: i64,
}

/// Query handle bound to a single connection or transaction
pub struct Queries<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> Queries<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn create_user(&mut self, arg: &CreateUserParams) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, full_name, email)
            VALUES ($1, $2, $3)
            RETURNING username, full_name, email, created_at
            "#,
        )
        .bind(&arg.username)
        .bind(&arg.full_name)
        .bind(&arg.email)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&mut self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, full_name, email, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    pub async fn update_user(
        &mut self,
        arg: &UpdateUserParams,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                email = COALESCE($3, email)
            WHERE username = $1
            RETURNING username, full_name, email, created_at
            "#,
        )
        .bind(&arg.username)
        .bind(arg.full_name.as_deref())
        .bind(arg.email.as_deref())
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(user)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    pub async fn create_account(
        &mut self,
        arg: &CreateAccountParams,
    ) -> Result<Account, StoreError> {
        let sql = format!(
            "INSERT INTO accounts (owner, balance, currency) VALUES ($1, $2, $3) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(&arg.owner)
            .bind(arg.balance)
            .bind(arg.currency.as_str())
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(account)
    }

    pub async fn get_account(&mut self, id: i64) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(account)
    }

    pub async fn list_accounts(
        &mut self,
        arg: &ListAccountsParams,
    ) -> Result<Vec<Account>, StoreError> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE owner = $1 ORDER BY id LIMIT $2 OFFSET $3",
            ACCOUNT_COLUMNS
        );
        let accounts = sqlx::query_as::<_, Account>(&sql)
            .bind(&arg.owner)
            .bind(arg.limit)
            .bind(arg.offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(accounts)
    }

    /// Atomically add `amount` to the balance and return the updated row.
    ///
    /// The UPDATE takes the row lock and reads the current balance in the same
    /// statement, so concurrent adjustments queue behind each other instead of
    /// racing on a stale read.
    pub async fn add_account_balance(
        &mut self,
        arg: AddAccountBalanceParams,
    ) -> Result<Account, StoreError> {
        let sql = format!(
            "UPDATE accounts SET balance = balance + $2 WHERE id = $1 RETURNING {}",
            ACCOUNT_COLUMNS
        );
        sqlx::query_as::<_, Account>(&sql)
            .bind(arg.id)
            .bind(arg.amount)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(StoreError::AccountNotFound(arg.id))
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    pub async fn create_transfer(
        &mut self,
        arg: &CreateTransferParams,
    ) -> Result<Transfer, StoreError> {
        let sql = format!(
            "INSERT INTO transfers (from_account_id, to_account_id, amount) VALUES ($1, $2, $3) RETURNING {}",
            TRANSFER_COLUMNS
        );
        let transfer = sqlx::query_as::<_, Transfer>(&sql)
            .bind(arg.from_account_id)
            .bind(arg.to_account_id)
            .bind(arg.amount)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(transfer)
    }

    pub async fn get_transfer(&mut self, id: i64) -> Result<Option<Transfer>, StoreError> {
        let sql = format!("SELECT {} FROM transfers WHERE id = $1", TRANSFER_COLUMNS);
        let transfer = sqlx::query_as::<_, Transfer>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(transfer)
    }

    pub async fn list_transfers(
        &mut self,
        arg: &ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        let sql = format!(
            r#"
            SELECT {} FROM transfers
            WHERE from_account_id = $1 OR to_account_id = $2
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
            TRANSFER_COLUMNS
        );
        let transfers = sqlx::query_as::<_, Transfer>(&sql)
            .bind(arg.from_account_id)
            .bind(arg.to_account_id)
            .bind(arg.limit)
            .bind(arg.offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(transfers)
    }

    // =========================================================================
    // Entries
    // =========================================================================

    pub async fn create_entry(&mut self, arg: &CreateEntryParams) -> Result<Entry, StoreError> {
        let sql = format!(
            "INSERT INTO entries (transfer_id, account_id, amount) VALUES ($1, $2, $3) RETURNING {}",
            ENTRY_COLUMNS
        );
        let entry = sqlx::query_as::<_, Entry>(&sql)
            .bind(arg.transfer_id)
            .bind(arg.account_id)
            .bind(arg.amount)
            .fetch_one(&mut *self.conn)
            .await?;

        Ok(entry)
    }

    pub async fn get_entry(&mut self, id: i64) -> Result<Option<Entry>, StoreError> {
        let sql = format!("SELECT {} FROM entries WHERE id = $1", ENTRY_COLUMNS);
        let entry = sqlx::query_as::<_, Entry>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(entry)
    }

    pub async fn list_entries(
        &mut self,
        arg: &ListEntriesParams,
    ) -> Result<Vec<Entry>, StoreError> {
        let sql = format!(
            "SELECT {} FROM entries WHERE account_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
            ENTRY_COLUMNS
        );
        let entries = sqlx::query_as::<_, Entry>(&sql)
            .bind(arg.account_id)
            .bind(arg.limit)
            .bind(arg.offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(entries)
    }

    /// Net of all entries ever written against an account
    pub async fn sum_entries(&mut self, account_id: i64) -> Result<i64, StoreError> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)::BIGINT FROM entries WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(total)
    }
}
