//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap every external call of a tick with a deadline
//! - Map expiry onto the caller's own error type
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - The timed-out future is dropped, cancelling the call

use std::future::Future;
use std::time::Duration;

/// Run `fut` with a deadline of `limit`. On expiry `on_timeout(limit)`
/// becomes the error.
pub async fn with_deadline<F, T, E, G>(limit: Duration, fut: F, on_timeout: G) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    G: FnOnce(Duration) -> E,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum CallError {
        Failed,
        TimedOut(Duration),
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_call_maps_to_timeout() {
        let result: Result<(), CallError> = with_deadline(
            Duration::from_secs(1),
            async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            },
            CallError::TimedOut,
        )
        .await;
        assert_eq!(result, Err(CallError::TimedOut(Duration::from_secs(1))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_inner_result_passes_through() {
        let ok: Result<u8, CallError> =
            with_deadline(Duration::from_secs(1), async { Ok(7) }, CallError::TimedOut).await;
        assert_eq!(ok, Ok(7));

        let err: Result<u8, CallError> = with_deadline(
            Duration::from_secs(1),
            async { Err(CallError::Failed) },
            CallError::TimedOut,
        )
        .await;
        assert_eq!(err, Err(CallError::Failed));
    }
}
