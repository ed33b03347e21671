//! Domain-neutral data types for mlp-deploy.
//!
//! This crate contains pure data structures shared across layers. No
//! business logic lives here - just data that errors and clients carry.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures
//! - **deploy-core**: Business logic operating on them
//! - **mlp-deploy**: CLI wiring everything together

pub mod error;
pub mod http_status;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
