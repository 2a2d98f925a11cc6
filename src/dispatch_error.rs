use std::fmt;

/// The single error kind surfaced by a failed dispatch.
///
/// Whatever went wrong (encoding the request, the executor rejecting the
/// command, or decoding the response) is normalized into the name of the
/// command that failed and a human-readable cause. Callers tell one failing
/// RPC from another by [`DispatchError::command`] alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    command: String,
    cause: String,
}

impl DispatchError {
    pub fn new(command: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self {
            command: command.into(),
            cause: cause.to_string(),
        }
    }

    /// The literal command name the failing call was issued with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Description of the underlying failure.
    pub fn cause(&self) -> &str {
        &self.cause
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to execute command '{}': {}",
            self.command, self.cause
        )
    }
}

impl std::error::Error for DispatchError {}
