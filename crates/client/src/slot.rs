//! Latest-wins guard for in-flight requests.
//!
//! Rapid refilters can put several loads of the same collection in
//! flight at once, and a slow stale response must never overwrite a
//! fresher one. Each load runs under a token claimed from its slot;
//! claiming the slot cancels whoever held it before.

use std::future::Future;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

/// One logical request lane (e.g. "the browse listing").
#[derive(Debug)]
pub struct RequestSlot {
    current: Mutex<CancellationToken>,
}

impl Default for RequestSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestSlot {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(CancellationToken::new()),
        }
    }

    /// Run `fut` as the lane's newest call, cancelling the previous one.
    ///
    /// Returns `Ok(None)` when a later call claimed the lane before this
    /// one finished; the winner returns `Ok(Some(value))`. Errors from
    /// `fut` pass through untouched.
    pub async fn run<T, E, F>(&self, fut: F) -> Result<Option<T>, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let token = self.claim();
        tokio::select! {
            _ = token.cancelled() => Ok(None),
            result = fut => result.map(Some),
        }
    }

    /// Cancel the in-flight call, if any, and install a fresh token.
    fn claim(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let previous = {
            let mut current = self.current.lock().expect("request slot lock poisoned");
            std::mem::replace(&mut *current, fresh.clone())
        };
        previous.cancel();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_newer_call_supersedes_older() {
        let slot = Arc::new(RequestSlot::new());
        let (_tx, rx) = tokio::sync::oneshot::channel::<()>();

        let stale = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move {
                slot.run(async move {
                    let _ = rx.await; // pends until the test ends
                    Ok::<_, String>(1)
                })
                .await
            })
        };
        tokio::task::yield_now().await;

        let fresh = slot.run(async { Ok::<_, String>(2) }).await;
        assert_eq!(fresh, Ok(Some(2)));
        assert_eq!(stale.await.unwrap(), Ok(None));
    }

    #[tokio::test]
    async fn test_sequential_calls_all_land() {
        let slot = RequestSlot::new();
        assert_eq!(slot.run(async { Ok::<_, String>(1) }).await, Ok(Some(1)));
        assert_eq!(slot.run(async { Ok::<_, String>(2) }).await, Ok(Some(2)));
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let slot = RequestSlot::new();
        let out: Result<Option<i32>, String> =
            slot.run(async { Err("boom".to_string()) }).await;
        assert_eq!(out, Err("boom".to_string()));
    }
}
