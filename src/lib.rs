//! simple_bank Library
//!
//! Ledger backend: accounts, transfers and double-entry records on
//! PostgreSQL, with a transfer engine that stays deadlock-free under
//! concurrent load.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod seed;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{Account, Amount, AmountError, Currency, DomainError, Entry, SelfTransferPolicy};
pub use domain::{Transfer, TransferResult, User};
pub use error::{AppError, AppResult};
pub use store::{Store, StoreError, TransferTxParams};
