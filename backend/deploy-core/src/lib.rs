pub mod config;
pub mod error;
pub mod metadata_client;

#[cfg(test)]
mod tests;

pub const METADATA_SERVICE_HOSTNAME: &str = "backoffice.dev.api.discomax.com";
pub const METADATA_SERVICE_BASE_URL: &str = const_format::concatcp!(
    "https://",
    METADATA_SERVICE_HOSTNAME,
    "/mlp-metadata-manager/meta-manager"
);
