pub mod config;
pub mod metadata_client;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    MetadataClient(#[from] metadata_client::MetadataClientError),
}
