/// Resilience patterns for outbound calls
///
/// Calls that leave the process (token validation against identity-service,
/// readiness probes) run under a bounded wait.
///
/// # Example: gRPC call with a deadline
///
/// ```rust,no_run
/// use resilience::{with_timeout_result, CallError};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let result = with_timeout_result(Duration::from_secs(2), async {
///         // Your gRPC call here
///         Ok::<_, String>(())
///     })
///     .await;
///
///     if let Err(CallError::Elapsed(after)) = result {
///         eprintln!("gave up after {after:?}");
///     }
/// }
/// ```
pub mod timeout;

pub use timeout::{with_timeout, with_timeout_result, CallError, TimeoutError, DEFAULT_CALL_TIMEOUT};
