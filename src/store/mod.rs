//! Store module
//!
//! PostgreSQL persistence for the ledger: the query layer, the transaction
//! coordinator and the transfer engine built on them.

mod error;
pub mod queries;
mod transfer;
mod tx;

use sqlx::PgPool;

use crate::domain::{Account, Entry, Transfer, User};

pub use error::StoreError;
pub use queries::{
    AddAccountBalanceParams, CreateAccountParams, CreateEntryParams, CreateTransferParams,
    CreateUserParams, ListAccountsParams, ListEntriesParams, ListTransfersParams, Queries,
    UpdateUserParams,
};
pub use transfer::{ordered_balance_updates, TransferTxParams};

/// Connection-pooled access to the ledger.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Reads and inserts outside a transfer use a pooled connection directly.
    // Balance changes only happen through `transfer_tx`.

    pub async fn create_user(&self, arg: &CreateUserParams) -> Result<User, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).create_user(arg).await
    }

    pub async fn get_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).get_user(username).await
    }

    pub async fn update_user(&self, arg: &UpdateUserParams) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).update_user(arg).await
    }

    pub async fn create_account(&self, arg: &CreateAccountParams) -> Result<Account, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).create_account(arg).await
    }

    pub async fn get_account(&self, id: i64) -> Result<Option<Account>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).get_account(id).await
    }

    pub async fn list_accounts(&self, arg: &ListAccountsParams) -> Result<Vec<Account>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).list_accounts(arg).await
    }

    pub async fn get_transfer(&self, id: i64) -> Result<Option<Transfer>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).get_transfer(id).await
    }

    pub async fn list_transfers(
        &self,
        arg: &ListTransfersParams,
    ) -> Result<Vec<Transfer>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).list_transfers(arg).await
    }

    pub async fn get_entry(&self, id: i64) -> Result<Option<Entry>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).get_entry(id).await
    }

    pub async fn list_entries(&self, arg: &ListEntriesParams) -> Result<Vec<Entry>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).list_entries(arg).await
    }

    pub async fn sum_entries(&self, account_id: i64) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        Queries::new(&mut *conn).sum_entries(account_id).await
    }
}
