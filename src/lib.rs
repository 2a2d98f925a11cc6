mod command_client;
mod dispatch_error;
mod envelope;
mod executor;
mod global_executor;
mod type_descriptor;

pub use command_client::CommandClient;
pub use dispatch_error::DispatchError;
pub use envelope::CommandEnvelope;
pub use executor::{BoxError, CommandExecutor, FnExecutor, executor_fn};
pub use global_executor::{GlobalExecutor, global_executor_installed, install_global_executor};
pub use type_descriptor::{DecodeFn, EncodeFn, TypeDescriptor};

// Re-exported so generated clients can declare their singleton without
// depending on `once_cell` themselves.
pub use once_cell::sync::Lazy;
