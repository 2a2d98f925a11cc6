use commux::{BoxError, CommandEnvelope, CommandExecutor};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

const CHANNEL_CLOSED: &str = "command channel closed";

/// One call in flight over a [`ChannelExecutor`] bridge.
#[derive(Debug)]
pub struct CommandRequest {
    pub envelope: CommandEnvelope,
    pub reply: oneshot::Sender<Result<Vec<u8>, BoxError>>,
}

/// Executor that ships every call to another task over a bounded channel.
///
/// The receiving half is usually handed to [`serve_commands`]. Senders wait
/// for capacity once `buffer` calls are queued; a `buffer` of zero is treated
/// as one.
#[derive(Debug, Clone)]
pub struct ChannelExecutor {
    sender: mpsc::Sender<CommandRequest>,
}

impl ChannelExecutor {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<CommandRequest>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self { sender }, receiver)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[async_trait::async_trait]
impl CommandExecutor for ChannelExecutor {
    async fn execute(&self, command: &str, payload: Vec<u8>) -> Result<Vec<u8>, BoxError> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(CommandRequest {
                envelope: CommandEnvelope::new(command, payload),
                reply,
            })
            .await
            .map_err(|_| BoxError::from(CHANNEL_CLOSED))?;

        response.await.map_err(|_| BoxError::from(CHANNEL_CLOSED))?
    }
}

/// Serves calls arriving over a [`ChannelExecutor`] bridge until every sender
/// is dropped.
///
/// Each call runs on its own task, so a slow command does not hold up the
/// ones queued behind it.
pub async fn serve_commands<E>(mut receiver: mpsc::Receiver<CommandRequest>, executor: E)
where
    E: CommandExecutor + Clone + 'static,
{
    while let Some(CommandRequest { envelope, reply }) = receiver.recv().await {
        let executor = executor.clone();

        tokio::spawn(async move {
            let result = executor
                .execute(&envelope.command, envelope.payload)
                .await;

            if reply.send(result).is_err() {
                debug!(command = %envelope.command, "caller dropped before reply");
            }
        });
    }

    debug!("command channel closed; serving loop exiting");
}
