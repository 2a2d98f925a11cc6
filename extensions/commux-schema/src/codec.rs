use serde::{Deserialize, Serialize};

/// Names the encode/decode pair a message type travels with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Codec {
    /// The type derives `bitcode::Encode` and `bitcode::Decode`.
    Bitcode,
    /// The value is a `Vec<u8>` that crosses the channel unchanged.
    Raw,
    /// Paths to a pair of free functions:
    /// `fn(&T) -> Result<Vec<u8>, BoxError>` and
    /// `fn(&[u8]) -> Result<T, BoxError>`.
    Custom { encode: String, decode: String },
}
