use std::future::Future;
use std::sync::Arc;

/// Boxed error type used across the executor boundary.
///
/// Executors may fail with anything; the dispatch primitive only ever looks at
/// the error's `Display` output.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The opaque boundary that routes a named command and its payload to
/// whatever actually implements it.
///
/// An executor is blind to RPC semantics. It receives the literal command
/// name chosen by the caller and the already-encoded request bytes, and it
/// hands back the response bytes (or an error). Routing by `command` is
/// entirely the executor's business; callers never register names up front.
///
/// Implementations must tolerate concurrent invocations. They may serialize,
/// interleave or parallelize the underlying work as they see fit.
#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError>;
}

#[async_trait::async_trait]
impl<E> CommandExecutor for Arc<E>
where
    E: CommandExecutor + ?Sized,
{
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        (**self).execute(command, payload).await
    }
}

/// Adapts an async closure into a `CommandExecutor`.
///
/// Mostly useful for stubbing the backend in tests:
///
/// ```rust,no_run
/// use commux::executor_fn;
///
/// let echo = executor_fn(|_command, payload| async move { Ok(payload) });
/// ```
pub struct FnExecutor<F> {
    handler: F,
}

/// Wraps `handler` so it can be used wherever a `CommandExecutor` is expected.
pub fn executor_fn<F, Fut>(handler: F) -> FnExecutor<F>
where
    F: Fn(String, Vec<u8>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
{
    FnExecutor { handler }
}

#[async_trait::async_trait]
impl<F, Fut> CommandExecutor for FnExecutor<F>
where
    F: Fn(String, Vec<u8>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
{
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        (self.handler)(command.to_owned(), payload).await
    }
}
