use crate::{CommandExecutor, DispatchError, TypeDescriptor};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// The generic dispatch primitive shared by every generated client.
///
/// A `CommandClient` owns nothing but a handle to the command executor.
/// Each call is independent: nothing is stored between issuing a command and
/// receiving its result, so one instance may be shared freely between
/// concurrent callers (it is cheap to clone as well).
///
/// Generated clients wrap one of these and narrow [`CommandClient::dispatch`]
/// to each method's request and response types.
#[derive(Clone)]
pub struct CommandClient {
    executor: Arc<dyn CommandExecutor>,
}

impl CommandClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<dyn CommandExecutor> {
        &self.executor
    }

    /// Performs one typed call over the command channel.
    ///
    /// The request is encoded with `request_type`, shipped to the executor
    /// under `command`, and the returned bytes are decoded with
    /// `response_type`. A failure at any of these steps is reported as a
    /// [`DispatchError`] tagged with `command`.
    ///
    /// There is no retry and no timeout here; the executor (or the caller)
    /// owns those policies.
    pub async fn dispatch<Req, Res>(
        &self,
        command: &str,
        request_type: &TypeDescriptor<Req>,
        response_type: &TypeDescriptor<Res>,
        request: Req,
    ) -> Result<Res, DispatchError> {
        let request_bytes = request_type.encode(&request).map_err(|e| {
            error!(command, request_type = request_type.name(), "request encoding failed: {e}");
            DispatchError::new(command, e)
        })?;

        let response_bytes = self.dispatch_command(command, request_bytes).await?;

        response_type.decode(&response_bytes).map_err(|e| {
            error!(command, response_type = response_type.name(), "response decoding failed: {e}");
            DispatchError::new(command, e)
        })
    }

    /// Sends already-encoded bytes under `command` and returns the raw reply.
    ///
    /// This is the escape hatch for commands the generated client has no
    /// typed method for. It shares the error contract of
    /// [`CommandClient::dispatch`].
    pub async fn dispatch_command(
        &self,
        command: &str,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, DispatchError> {
        debug!(command, request_len = payload.len(), "dispatching command");

        match self.executor.execute(command, payload).await {
            Ok(response) => {
                debug!(command, response_len = response.len(), "command completed");
                Ok(response)
            }
            Err(e) => {
                error!(command, "command failed: {e}");
                Err(DispatchError::new(command, e))
            }
        }
    }
}

impl fmt::Debug for CommandClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandClient").finish_non_exhaustive()
    }
}
