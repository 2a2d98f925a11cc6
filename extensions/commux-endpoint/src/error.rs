use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// A handler is already registered under this command name.
    DuplicateCommand(String),
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::DuplicateCommand(command) => write!(
                f,
                "a handler for command '{}' is already registered",
                command
            ),
        }
    }
}

impl std::error::Error for EndpointError {}
