//! ViewScope - lifetime of the view that requested an async operation.
//!
//! Operations started through a scope resolve to `OperationError::Cancelled`
//! once the scope is closed, and a result that arrives after closing is
//! dropped rather than applied.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::ports::OperationError;

/// Cancellation handle tied to a view's lifetime. Clones share state.
#[derive(Debug, Clone)]
pub struct ViewScope {
    closed: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    /// Creates an open scope.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            closed: Arc::new(tx),
        }
    }

    /// Closes the scope, cancelling every operation running under it.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    /// True until `close` is called.
    pub fn is_active(&self) -> bool {
        !*self.closed.borrow()
    }

    /// Resolves once the scope is closed.
    pub async fn closed(&self) {
        let mut rx = self.closed.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Runs an operation under this scope.
    ///
    /// Returns `Cancelled` if the scope is already closed, closes while the
    /// operation is pending, or closed by the time it completed.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, OperationError>
    where
        F: Future<Output = Result<T, OperationError>>,
    {
        if !self.is_active() {
            return Err(OperationError::Cancelled);
        }

        let outcome = tokio::select! {
            biased;
            _ = self.closed() => Err(OperationError::Cancelled),
            outcome = operation => outcome,
        };

        if !self.is_active() {
            return Err(OperationError::Cancelled);
        }
        outcome
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn open_scope_passes_results_through() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { Ok::<_, OperationError>(7) }).await, Ok(7));

        let failed = scope
            .run(async { Err::<(), _>(OperationError::failed("op", "boom")) })
            .await;
        assert_eq!(failed, Err(OperationError::failed("op", "boom")));
    }

    #[tokio::test]
    async fn closed_scope_refuses_new_work() {
        let scope = ViewScope::new();
        scope.close();

        assert!(!scope.is_active());
        assert_eq!(
            scope.run(async { Ok::<_, OperationError>(1) }).await,
            Err(OperationError::Cancelled)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closing_cancels_pending_operation() {
        let scope = ViewScope::new();
        let closer = scope.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            closer.close();
        });

        let result = scope
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, OperationError>(())
            })
            .await;

        assert_eq!(result, Err(OperationError::Cancelled));
    }

    #[tokio::test]
    async fn closed_resolves_after_close() {
        let scope = ViewScope::new();
        let waiter = {
            let scope = scope.clone();
            tokio::spawn(async move { scope.closed().await })
        };

        scope.close();

        waiter.await.unwrap();
    }
}
