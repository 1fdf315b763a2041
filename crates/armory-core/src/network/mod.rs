//! Remote catalog access.
//!
//! - **CatalogGateway**: the fetch contract consumed by the definition cache
//! - **HttpGateway**: blocking HTTP implementation (requires the `api` feature)

#[cfg(feature = "api")]
mod client;
mod gateway;

#[cfg(feature = "api")]
pub use client::{DEFAULT_BASE_URL, HttpGateway};
pub use gateway::CatalogGateway;
