//! Request and Response models for the proxy API
//!
//! DTOs for query-parameter extraction and for the payloads the service
//! serializes back to clients.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    ApodQuery, DonkiQuery, EonetQuery, EpicQuery, ExoplanetsQuery, MarsPhotosQuery,
    MediaSearchQuery, NeoFeedQuery,
};
pub use responses::{Apod, ClearResponse, DonkiEvent, Exoplanet, HealthResponse};
