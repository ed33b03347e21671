use deploy_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Errors surfaced by the CLI itself.
///
/// Core errors are flattened to strings here; the structured detail has
/// already been written to the log by the time they propagate this far.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Error from this binary's own wiring (logger, output formatting)
    #[error("Deploy Error: {message} {location}")]
    Deploy {
        message: String,
        location: ErrorLocation,
    },

    /// Error from deploy-core operations (config load, HTTP calls)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },
}

impl From<CoreError> for DeployError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        DeployError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
