//! Transfer Handler
//!
//! Validates a transfer request and hands it to the transfer engine.

use crate::domain::{Account, Amount, Currency, DomainError, SelfTransferPolicy, TransferResult};
use crate::error::{AppError, AppResult};
use crate::store::{Store, TransferTxParams};

use super::TransferCommand;

/// Handler for transfers between accounts
pub struct TransferHandler {
    store: Store,
    self_transfer: SelfTransferPolicy,
}

impl TransferHandler {
    pub fn new(store: Store, self_transfer: SelfTransferPolicy) -> Self {
        Self {
            store,
            self_transfer,
        }
    }

    /// Checks that need no database access: amount, currency, self-transfer
    pub fn validate(&self, command: &TransferCommand) -> Result<(Amount, Currency), DomainError> {
        let amount = Amount::new(command.amount)?;
        let currency: Currency = command.currency.parse()?;

        if !self
            .self_transfer
            .permits(command.from_account_id, command.to_account_id)
        {
            return Err(DomainError::SameAccountTransfer);
        }

        Ok((amount, currency))
    }

    /// Execute the transfer command
    pub async fn execute(&self, command: TransferCommand) -> AppResult<TransferResult> {
        let (amount, currency) = self.validate(&command)?;

        self.valid_account(command.from_account_id, currency).await?;
        self.valid_account(command.to_account_id, currency).await?;

        let result = self
            .store
            .transfer_tx(TransferTxParams {
                from_account_id: command.from_account_id,
                to_account_id: command.to_account_id,
                amount: amount.value(),
            })
            .await?;

        tracing::info!(
            transfer_id = result.transfer.id,
            from_account_id = result.transfer.from_account_id,
            to_account_id = result.transfer.to_account_id,
            amount = result.transfer.amount,
            currency = %currency,
            "Transfer completed"
        );

        Ok(result)
    }

    /// Account must exist and hold the requested currency
    async fn valid_account(&self, account_id: i64, currency: Currency) -> AppResult<Account> {
        let account = self
            .store
            .get_account(account_id)
            .await?
            .ok_or(AppError::AccountNotFound(account_id))?;

        if account.currency != currency {
            return Err(DomainError::currency_mismatch(account_id, currency, account.currency).into());
        }

        Ok(account)
    }
}
