mod router;
pub use router::*;

mod channel;
pub use channel::*;

mod timeout;
pub use timeout::*;

pub mod error;
