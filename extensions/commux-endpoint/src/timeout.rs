use commux::{BoxError, CommandExecutor};
use std::time::Duration;
use tracing::warn;

/// Puts a deadline on every call made through the wrapped executor.
///
/// A call that misses the deadline is dropped on the caller's side and
/// rejected with `timed out after <ms>ms`.
#[derive(Debug, Clone)]
pub struct TimeoutExecutor<E> {
    inner: E,
    timeout: Duration,
}

impl<E> TimeoutExecutor<E> {
    pub fn new(inner: E, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

#[async_trait::async_trait]
impl<E> CommandExecutor for TimeoutExecutor<E>
where
    E: CommandExecutor,
{
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        match tokio::time::timeout(self.timeout, self.inner.execute(command, payload)).await {
            Ok(result) => result,
            Err(_) => {
                let millis = self.timeout.as_millis();
                warn!(command, timeout_ms = millis as u64, "command timed out");
                Err(format!("timed out after {millis}ms").into())
            }
        }
    }
}
