//! Transaction Coordinator
//!
//! Runs a unit of work against a transaction-bound `Queries` handle and
//! commits or rolls back depending on its outcome.

use futures::future::BoxFuture;
use sqlx::{Postgres, Transaction};

use super::{Queries, Store, StoreError};

impl Store {
    /// Run `work` inside one database transaction.
    ///
    /// - `Ok` from `work` commits; a commit failure is returned as-is.
    /// - `Err` from `work` rolls back and returns the original error, or a
    ///   `StoreError::Rollback` carrying both errors if the rollback fails.
    ///
    /// No retries happen here. Dropping the returned future before `work`
    /// finishes rolls the transaction back when the connection returns to
    /// the pool.
    pub async fn exec_tx<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'q> FnOnce(Queries<'q>) -> BoxFuture<'q, Result<T, StoreError>> + Send,
    {
        let mut tx = self.pool.begin().await?;

        let outcome = work(Queries::new(&mut *tx)).await;

        match outcome {
            Ok(value) => {
                commit(tx).await?;
                Ok(value)
            }
            Err(err) => match tx.rollback().await {
                Ok(()) => Err(err),
                Err(rollback) => {
                    tracing::error!(
                        error = %err,
                        rollback_error = %rollback,
                        "Rollback failed after transaction error"
                    );
                    Err(StoreError::Rollback {
                        cause: Box::new(err),
                        rollback,
                    })
                }
            },
        }
    }
}

/// Commit on a detached task so the store's decision is always awaited, even
/// if the caller stops polling once the commit has been sent.
async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), StoreError> {
    tokio::spawn(async move { tx.commit().await })
        .await
        .map_err(|e| StoreError::CommitInterrupted(e.to_string()))??;

    Ok(())
}
