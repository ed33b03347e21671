use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MetadataClientError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    /// Response body was not valid JSON.
    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    /// Non-2xx status outside the register conflict tolerance.
    #[error("Server Error: HTTP {status} - {body} {location}")]
    Server {
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },
}

impl From<url::ParseError> for MetadataClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        MetadataClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for MetadataClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        MetadataClientError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for MetadataClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        MetadataClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
