use crate::{BoxError, CommandExecutor, DispatchError};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static GLOBAL_EXECUTOR: OnceCell<Arc<dyn CommandExecutor>> = OnceCell::new();

/// Installs the process-wide executor used by generated singletons.
///
/// Only the first installation takes effect; later attempts fail and leave
/// the original executor in place. Tests that need their own backend should
/// construct a client with `new(executor)` instead of going through the
/// singleton.
pub fn install_global_executor(executor: Arc<dyn CommandExecutor>) -> Result<(), DispatchError> {
    GLOBAL_EXECUTOR.set(executor).map_err(|_| {
        DispatchError::new(
            "install_global_executor",
            "a global command executor is already installed",
        )
    })
}

pub fn global_executor_installed() -> bool {
    GLOBAL_EXECUTOR.get().is_some()
}

/// Forwards every command to the executor registered with
/// [`install_global_executor`].
///
/// The lookup happens per call, so a singleton built on top of this may be
/// created before the executor is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalExecutor;

#[async_trait::async_trait]
impl CommandExecutor for GlobalExecutor {
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        match GLOBAL_EXECUTOR.get() {
            Some(executor) => executor.execute(command, payload).await,
            None => Err("no global command executor installed".into()),
        }
    }
}
