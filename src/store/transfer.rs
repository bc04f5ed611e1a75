//! Transfer Orchestrator
//!
//! Moves money between two accounts: one transfer row, two offsetting
//! entries and two balance updates, all in a single transaction.

use serde::{Deserialize, Serialize};

use crate::domain::TransferResult;

use super::queries::{AddAccountBalanceParams, CreateEntryParams, CreateTransferParams};
use super::{Store, StoreError};

/// Input for `Store::transfer_tx`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// The two balance updates of a transfer, in the order their rows are locked.
///
/// The account with the smaller id is always updated first, whichever side of
/// the transfer it is on. Every transaction therefore locks any pair of
/// accounts in the same order and no wait cycle can form. For a self-transfer
/// the credit goes first so the balance never dips in between.
pub fn ordered_balance_updates(arg: &TransferTxParams) -> [AddAccountBalanceParams; 2] {
    let debit = AddAccountBalanceParams {
        id: arg.from_account_id,
        amount: -arg.amount,
    };
    let credit = AddAccountBalanceParams {
        id: arg.to_account_id,
        amount: arg.amount,
    };

    if arg.from_account_id < arg.to_account_id {
        [debit, credit]
    } else {
        [credit, debit]
    }
}

impl Store {
    /// Perform a transfer from one account to another.
    ///
    /// All-or-nothing: on any error nothing from this attempt is persisted.
    /// A deadlock or serialization failure reported by the database can be
    /// detected with `StoreError::is_retryable` and the call repeated.
    pub async fn transfer_tx(&self, arg: TransferTxParams) -> Result<TransferResult, StoreError> {
        if arg.amount <= 0 {
            return Err(StoreError::InvalidAmount(arg.amount));
        }

        let result = self
            .exec_tx(move |mut q| {
                Box::pin(async move {
                    let transfer = q
                        .create_transfer(&CreateTransferParams {
                            from_account_id: arg.from_account_id,
                            to_account_id: arg.to_account_id,
                            amount: arg.amount,
                        })
                        .await?;

                    let from_entry = q
                        .create_entry(&CreateEntryParams {
                            transfer_id: transfer.id,
                            account_id: arg.from_account_id,
                            amount: -arg.amount,
                        })
                        .await?;

                    let to_entry = q
                        .create_entry(&CreateEntryParams {
                            transfer_id: transfer.id,
                            account_id: arg.to_account_id,
                            amount: arg.amount,
                        })
                        .await?;

                    let [first, second] = ordered_balance_updates(&arg);
                    let first_account = q.add_account_balance(first).await?;
                    let second_account = q.add_account_balance(second).await?;

                    let (from_account, to_account) = if arg.from_account_id == arg.to_account_id {
                        (second_account.clone(), second_account)
                    } else if first.id == arg.from_account_id {
                        (first_account, second_account)
                    } else {
                        (second_account, first_account)
                    };

                    if from_account.balance < 0 {
                        return Err(StoreError::InsufficientFunds {
                            account_id: from_account.id,
                            balance: from_account.balance,
                        });
                    }

                    Ok::<_, StoreError>(TransferResult {
                        transfer,
                        from_entry,
                        to_entry,
                        from_account,
                        to_account,
                    })
                })
            })
            .await;

        match &result {
            Ok(res) => tracing::debug!(
                transfer_id = res.transfer.id,
                from_account_id = arg.from_account_id,
                to_account_id = arg.to_account_id,
                amount = arg.amount,
                "Transfer committed"
            ),
            Err(e) => tracing::warn!(
                from_account_id = arg.from_account_id,
                to_account_id = arg.to_account_id,
                amount = arg.amount,
                error = %e,
                retryable = e.is_retryable(),
                "Transfer rolled back"
            ),
        }

        result
    }
}
