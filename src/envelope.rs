use bitcode::{Decode, Encode};

/// The only information that crosses the boundary to a command executor: a
/// command name and an opaque payload.
///
/// Bridges that need to ship a call somewhere else (another task, another
/// process) move this value as a unit.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
pub struct CommandEnvelope {
    pub command: String,
    pub payload: Vec<u8>,
}

impl CommandEnvelope {
    pub fn new(command: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            command: command.into(),
            payload,
        }
    }

    /// Serializes the envelope for byte-oriented bridges.
    pub fn to_bytes(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Inverse of [`CommandEnvelope::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }
}
