//! Cosmic Cache - A caching proxy server for NASA open APIs
//!
//! Sits between clients and NASA's rate-limited public APIs, serving
//! repeated requests out of a TTL-keyed in-memory response cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod nasa;
pub mod policy;
pub mod ratelimit;

pub use api::AppState;
pub use config::Config;
