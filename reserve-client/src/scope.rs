//! Request scope
//!
//! Every view that loads data owns a [`RequestScope`]. Starting a new load
//! cancels the previous one, and a result is handed back only while its
//! [`Ticket`] is still the latest. Dropping the scope cancels everything
//! still in flight.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};

/// Proof of which load a result belongs to
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct Inner {
    root: CancellationToken,
    generation: AtomicU64,
    current: Mutex<CancellationToken>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// Cancellation scope for the loads of one view
#[derive(Debug, Clone)]
pub struct RequestScope {
    inner: Arc<Inner>,
}

impl Default for RequestScope {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestScope {
    pub fn new() -> Self {
        let root = CancellationToken::new();
        let current = root.child_token();
        Self {
            inner: Arc::new(Inner {
                root,
                generation: AtomicU64::new(0),
                current: Mutex::new(current),
            }),
        }
    }

    /// Starts a new load, superseding the previous one
    pub fn begin(&self) -> Ticket {
        let token = self.inner.root.child_token();
        let previous = match self.inner.current.lock() {
            Ok(mut current) => std::mem::replace(&mut *current, token.clone()),
            Err(poisoned) => std::mem::replace(&mut *poisoned.into_inner(), token.clone()),
        };
        previous.cancel();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { generation, token }
    }

    /// Whether a result carrying `ticket` may still be applied
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        !ticket.token.is_cancelled()
            && self.inner.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Cancels whatever is in flight; later loads still work
    pub fn cancel_pending(&self) {
        let _ = self.begin();
    }

    /// Cancels everything, now and later
    pub fn close(&self) {
        self.inner.root.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.root.is_cancelled()
    }

    /// Runs `fut` as the latest load of this scope.
    ///
    /// Returns `ClientError::Cancelled` if a newer load started or the scope
    /// was closed before `fut` finished.
    pub async fn run<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let ticket = self.begin();
        let result = tokio::select! {
            biased;
            _ = ticket.token.cancelled() => return Err(ClientError::Cancelled),
            result = fut => result,
        };
        if !self.is_current(&ticket) {
            tracing::debug!(generation = ticket.generation, "Discarding stale result");
            return Err(ClientError::Cancelled);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_begin_supersedes_previous() {
        let scope = RequestScope::new();
        let first = scope.begin();
        assert!(scope.is_current(&first));

        let second = scope.begin();
        assert!(first.is_cancelled());
        assert!(!scope.is_current(&first));
        assert!(scope.is_current(&second));
        assert!(second.generation() > first.generation());
    }

    #[tokio::test]
    async fn test_newer_load_wins() {
        let scope = RequestScope::new();

        let slow = {
            let scope = scope.clone();
            tokio::spawn(async move {
                scope
                    .run(async {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        Ok("old")
                    })
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let fast = scope.run(async { Ok("new") }).await;

        assert_eq!(fast.unwrap(), "new");
        assert!(matches!(slow.await.unwrap(), Err(ClientError::Cancelled)));
    }

    #[tokio::test]
    async fn test_close_cancels_everything() {
        let scope = RequestScope::new();
        scope.close();
        let result = scope.run(async { Ok(1) }).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(scope.is_closed());
    }

    #[tokio::test]
    async fn test_drop_cancels_outstanding_tickets() {
        let scope = RequestScope::new();
        let ticket = scope.begin();
        drop(scope);
        assert!(ticket.is_cancelled());
    }
}
