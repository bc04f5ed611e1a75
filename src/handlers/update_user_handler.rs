//! Update User Handler
//!
//! Partial profile updates: full name and email.

use crate::domain::User;
use crate::error::{AppError, AppResult};
use crate::store::{Store, UpdateUserParams};

use super::user_handler::{validate_email, validate_full_name};
use super::UpdateUserCommand;

/// Handler for user profile updates
pub struct UpdateUserHandler {
    store: Store,
}

impl UpdateUserHandler {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// At least one field must change, and every given field must be valid
    pub fn validate(command: &UpdateUserCommand) -> AppResult<()> {
        if command.full_name.is_none() && command.email.is_none() {
            return Err(AppError::InvalidRequest(
                "nothing to update: provide full_name or email".to_string(),
            ));
        }

        if let Some(full_name) = &command.full_name {
            validate_full_name(full_name)?;
        }
        if let Some(email) = &command.email {
            validate_email(email)?;
        }

        Ok(())
    }

    pub async fn execute(&self, command: UpdateUserCommand) -> AppResult<User> {
        Self::validate(&command)?;

        let params = UpdateUserParams {
            username: command.username,
            full_name: command.full_name,
            email: command.email,
        };

        let user = self
            .store
            .update_user(&params)
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::AlreadyExists(format!(
                        "email {}",
                        params.email.as_deref().unwrap_or_default()
                    ))
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| AppError::UserNotFound(params.username.clone()))?;

        tracing::info!(username = %user.username, "User updated");
        Ok(user)
    }
}
