use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// A unit of work failed inside the store.
///
/// Opaque: the driver error is logged where it happens and never reaches
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Transaction failed within session")]
pub struct SessionError;

/// Future returned by a session body. Borrows the transaction it runs on.
pub type SessionFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>;

/// Runs closures inside a single transaction drawn from the shared pool.
#[derive(Debug, Clone)]
pub struct SessionScope {
    db: DatabaseConnection,
}

impl SessionScope {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Execute `body` in its own transaction.
    ///
    /// Commits when `body` succeeds. Any error from `body`, from `BEGIN` or
    /// from `COMMIT` rolls the transaction back and yields [`SessionError`].
    /// The pooled connection goes back to the pool on every path: the
    /// transaction is consumed by commit/rollback, or dropped (which rolls
    /// back) if either of those fails.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if any statement or the commit fails.
    pub async fn with_session<F, T>(&self, body: F) -> Result<T, SessionError>
    where
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> SessionFuture<'c, T> + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to begin transaction");
            SessionError
        })?;

        let outcome = body(&txn).await;

        match outcome {
            Ok(value) => {
                txn.commit().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to commit transaction");
                    SessionError
                })?;
                Ok(value)
            }
            Err(e) => {
                tracing::error!(error = %e, "Session failed, rolling back");
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(SessionError)
            }
        }
    }
}
