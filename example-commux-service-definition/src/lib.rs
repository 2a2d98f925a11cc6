//! Example service definitions.
//!
//! Message types live in [`messages`]; the clients in [`echo`] and
//! [`sync_space`] are generated at build time from the JSON schemas under
//! `schema/`.

pub mod messages;

/// Client for `schema/echo.json`.
pub mod echo {
    include!(concat!(env!("OUT_DIR"), "/echo.rs"));
}

/// Client for `schema/sync_space.json`.
pub mod sync_space {
    include!(concat!(env!("OUT_DIR"), "/sync_space_service.rs"));
}
