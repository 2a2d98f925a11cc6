mod codec;
pub use codec::Codec;
mod type_descriptor;
pub use type_descriptor::TypeDescriptor;
mod method_descriptor;
pub use method_descriptor::MethodDescriptor;
mod service_description;
pub use service_description::ServiceDescription;
mod schema_error;
pub use schema_error::SchemaError;
pub mod document;
pub use document::SchemaDocument;
mod walker;
pub use walker::{distinct_types, walk};
