use std::fmt;
use std::io;

/// A fatal problem found while loading or generating from a schema.
///
/// Generation never skips a method it cannot handle; it stops with one of
/// these instead.
#[derive(Debug)]
pub enum SchemaError {
    /// Two methods of one service share a name (and therefore a command).
    DuplicateMethod { service: String, method: String },
    /// A method references a type that has no encode/decode pair.
    MissingCodec {
        service: String,
        method: String,
        type_name: String,
    },
    /// One type identity was declared with two different definitions.
    ConflictingType { service: String, type_name: String },
    /// A type using the raw codec declares a Rust type other than `Vec<u8>`.
    RawTypeMismatch {
        service: String,
        type_name: String,
        rust_type: String,
    },
    /// A schema document references a type that is not declared.
    UnknownType {
        service: String,
        method: String,
        type_name: String,
    },
    /// Stripping the `Service` suffix left nothing to name the singleton after.
    DegenerateSingletonName { service: String },
    /// A name cannot be turned into a Rust identifier.
    InvalidIdentifier { service: String, name: String },
    /// Two distinct schema names map to the same generated identifier.
    NameCollision {
        service: String,
        identifier: String,
        first: String,
        second: String,
    },
    /// The schema document is not valid JSON for the expected layout.
    Parse(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateMethod { service, method } => {
                write!(f, "service '{service}' declares method '{method}' more than once")
            }
            SchemaError::MissingCodec {
                service,
                method,
                type_name,
            } => write!(
                f,
                "method '{service}.{method}' references type '{type_name}' which has no codec"
            ),
            SchemaError::ConflictingType { service, type_name } => write!(
                f,
                "service '{service}' uses type '{type_name}' with conflicting definitions"
            ),
            SchemaError::RawTypeMismatch {
                service,
                type_name,
                rust_type,
            } => write!(
                f,
                "service '{service}': raw type '{type_name}' must be 'Vec<u8>', not '{rust_type}'"
            ),
            SchemaError::UnknownType {
                service,
                method,
                type_name,
            } => write!(
                f,
                "method '{service}.{method}' references undeclared type '{type_name}'"
            ),
            SchemaError::DegenerateSingletonName { service } => write!(
                f,
                "service '{service}' yields an empty singleton name once the 'Service' suffix is removed"
            ),
            SchemaError::InvalidIdentifier { service, name } => write!(
                f,
                "service '{service}': '{name}' cannot be used as a Rust identifier"
            ),
            SchemaError::NameCollision {
                service,
                identifier,
                first,
                second,
            } => write!(
                f,
                "service '{service}': '{first}' and '{second}' both map to identifier '{identifier}'"
            ),
            SchemaError::Parse(e) => write!(f, "invalid schema document: {e}"),
            SchemaError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SchemaError::Parse(e) => Some(e),
            SchemaError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Parse(e)
    }
}

impl From<io::Error> for SchemaError {
    fn from(e: io::Error) -> Self {
        SchemaError::Io(e)
    }
}
