//! Domain module
//!
//! Core ledger types and caller-side validation rules.

pub mod amount;
pub mod currency;
pub mod error;
pub mod models;
pub mod policy;

pub use amount::{Amount, AmountError, MAX_AMOUNT};
pub use currency::{Currency, CurrencyError};
pub use error::DomainError;
pub use models::{Account, Entry, Transfer, TransferResult, User};
pub use policy::SelfTransferPolicy;
