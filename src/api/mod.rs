//! API Module
//!
//! HTTP handlers and routing for the caching proxy's REST surface.
//! Data endpoints wrap the upstream NASA APIs behind the response cache;
//! the `/cache` and `/rate-limits` endpoints expose diagnostics.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
