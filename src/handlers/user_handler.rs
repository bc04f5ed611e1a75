//! User and Account Creation Handlers
//!
//! Register owners and open zero-balance accounts for them.

use crate::domain::{Account, Currency, DomainError, User};
use crate::error::{AppError, AppResult};
use crate::store::{CreateAccountParams, CreateUserParams, Store};

use super::{CreateAccountCommand, CreateUserCommand};

/// Handler for user creation
pub struct CreateUserHandler {
    store: Store,
}

impl CreateUserHandler {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Check the command without touching the database
    pub fn validate(command: &CreateUserCommand) -> AppResult<()> {
        let username_ok = !command.username.is_empty()
            && command
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !username_ok {
            return Err(AppError::InvalidRequest(
                "username must be non-empty and contain only letters, digits or underscores"
                    .to_string(),
            ));
        }

        validate_full_name(&command.full_name)?;
        validate_email(&command.email)
    }

    pub async fn execute(&self, command: CreateUserCommand) -> AppResult<User> {
        Self::validate(&command)?;

        let params = CreateUserParams {
            username: command.username,
            full_name: command.full_name,
            email: command.email,
        };

        let user = self.store.create_user(&params).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists(format!("user {}", params.username))
            } else {
                e.into()
            }
        })?;

        tracing::info!(username = %user.username, "User created");
        Ok(user)
    }
}

/// Handler for account creation
pub struct CreateAccountHandler {
    store: Store,
}

impl CreateAccountHandler {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn execute(&self, command: CreateAccountCommand) -> AppResult<Account> {
        let currency: Currency = command.currency.parse().map_err(DomainError::from)?;

        if self.store.get_user(&command.owner).await?.is_none() {
            return Err(AppError::UserNotFound(command.owner));
        }

        let params = CreateAccountParams {
            owner: command.owner,
            balance: 0,
            currency,
        };

        let account = self.store.create_account(&params).await.map_err(|e| {
            if e.is_unique_violation() {
                AppError::AlreadyExists(format!("{} account for {}", currency, params.owner))
            } else if e.is_foreign_key_violation() {
                AppError::UserNotFound(params.owner.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(
            account_id = account.id,
            owner = %account.owner,
            currency = %account.currency,
            "Account created"
        );
        Ok(account)
    }
}

pub(super) fn validate_full_name(full_name: &str) -> AppResult<()> {
    if full_name.trim().is_empty() {
        return Err(AppError::InvalidRequest("full_name is required".to_string()));
    }
    Ok(())
}

pub(super) fn validate_email(email: &str) -> AppResult<()> {
    if !email.contains('@') {
        return Err(AppError::InvalidRequest(format!("invalid email: {}", email)));
    }
    Ok(())
}
