mod build_error;
pub use build_error::BuildError;
mod builder;
pub use builder::{Builder, GeneratedFile, configure};
mod emitter;
pub use emitter::{EmitOptions, generate_client};
pub mod naming;

// Re-exposed so build scripts only need this crate
pub use commux_schema::{
    Codec, MethodDescriptor, SchemaDocument, SchemaError, ServiceDescription, TypeDescriptor,
};
