//! Command Handlers module
//!
//! Caller-side validation in front of the store: input checks, existence
//! and currency checks, and the self-transfer policy.

mod commands;
mod transfer_handler;
mod update_user_handler;
mod user_handler;

#[cfg(test)]
mod tests;

pub use commands::*;
pub use transfer_handler::TransferHandler;
pub use update_user_handler::UpdateUserHandler;
pub use user_handler::{CreateAccountHandler, CreateUserHandler};
