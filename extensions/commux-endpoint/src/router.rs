use crate::error::EndpointError;
use commux::{BoxError, CommandExecutor, TypeDescriptor};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub type CommandHandler =
    Arc<dyn Fn(Vec<u8>) -> BoxFuture<'static, Result<Vec<u8>, BoxError>> + Send + Sync>;

/// Routes commands to handlers registered by name.
///
/// The router is itself a [`CommandExecutor`], so a generated client can be
/// pointed straight at it for in-process use, or it can sit behind a
/// [`ChannelExecutor`](crate::ChannelExecutor) bridge.
///
/// Cloning a router is cheap; clones share the same handler table.
#[derive(Clone, Default)]
pub struct CommandRouter {
    handlers: Arc<RwLock<HashMap<String, CommandHandler>>>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler working on raw request/response bytes.
    pub async fn register<F, Fut>(
        &self,
        command: impl Into<String>,
        handler: F,
    ) -> Result<(), EndpointError>
    where
        F: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<u8>, BoxError>> + Send + 'static,
    {
        let command = command.into();

        match self.handlers.write().await.entry(command) {
            Entry::Occupied(entry) => Err(EndpointError::DuplicateCommand(entry.key().clone())),
            Entry::Vacant(entry) => {
                debug!(command = %entry.key(), "registered command handler");
                let wrapped = move |payload: Vec<u8>| handler(payload).boxed();
                entry.insert(Arc::new(wrapped));
                Ok(())
            }
        }
    }

    /// Registers a handler over decoded values.
    ///
    /// The request is decoded with `request_type` before the handler runs and
    /// the handler's result is encoded with `response_type`.
    pub async fn register_typed<Req, Res, F, Fut>(
        &self,
        command: impl Into<String>,
        request_type: &TypeDescriptor<Req>,
        response_type: &TypeDescriptor<Res>,
        handler: F,
    ) -> Result<(), EndpointError>
    where
        Req: Send + 'static,
        Res: Send + 'static,
        F: Fn(Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Res, BoxError>> + Send + 'static,
    {
        let request_type = *request_type;
        let response_type = *response_type;
        let handler = Arc::new(handler);

        self.register(command, move |payload: Vec<u8>| {
            let handler = handler.clone();
            async move {
                let request = request_type
                    .decode(&payload)
                    .map_err(|e| BoxError::from(format!("failed to decode request: {e}")))?;
                let response = handler(request).await?;
                response_type.encode(&response)
            }
        })
        .await
    }

    /// Names of all registered commands, sorted.
    pub async fn commands(&self) -> Vec<String> {
        let mut commands: Vec<String> = self.handlers.read().await.keys().cloned().collect();
        commands.sort();
        commands
    }
}

#[async_trait::async_trait]
impl CommandExecutor for CommandRouter {
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        let handler = self.handlers.read().await.get(command).cloned();

        match handler {
            Some(handler) => handler(payload).await,
            None => {
                warn!(command, "no handler registered for command");
                Err(format!("unknown command: {command}").into())
            }
        }
    }
}

impl std::fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRouter").finish_non_exhaustive()
    }
}
