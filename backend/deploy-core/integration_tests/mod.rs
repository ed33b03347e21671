mod config;
mod metadata_client;
