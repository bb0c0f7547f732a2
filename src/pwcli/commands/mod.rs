//! Command handlers.
//!
//! Each handler is generic over [`crate::client::ApiClient`] and returns
//! plain data; rendering and process exit live with the binary. Handlers
//! resolve free-text identity filters before building the main query, so
//! an ambiguous or unknown fragment never reaches the listing endpoint.

pub mod bundle;
pub mod helpers;
pub mod patch;
pub mod series;
