use crate::config::{ModelConfig, ServingConfiguration};
use crate::error::metadata_client::MetadataClientError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use log::{error, info, warn};
use reqwest::Client;
use serde_json::Value;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const REGISTER_ENDPOINT: &str = "v1/models/register";
const UPDATE_ENDPOINT_PREFIX: &str = "v1/models/update";

/// Classified response of a register or update call.
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub status: HttpStatusCode,
    pub body: Value,
    pub already_registered: bool,
}

#[derive(Clone)]
pub struct MetadataClient {
    base_url: Url,
    client: Client,
}

impl MetadataClient {
    pub fn new(base_url_str: &str) -> Result<Self, MetadataClientError> {
        Self::with_timeout(base_url_str, DEFAULT_TIMEOUT_DURATION)
    }

    pub fn with_timeout(
        base_url_str: &str,
        timeout: Duration,
    ) -> Result<Self, MetadataClientError> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let base_url = if base_url_str.ends_with('/') {
            Url::parse(base_url_str)?
        } else {
            Url::parse(&format!("{base_url_str}/"))?
        };

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base_url, client })
    }

    /// Register a model with the metadata service.
    ///
    /// POSTs the full model record to `v1/models/register`. A 409 Conflict
    /// means the model is already registered and is reported as success
    /// with `already_registered` set.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataClientError`] on transport failure, a non-tolerated
    /// status, or an undecodable response body.
    pub async fn register_model(
        &self,
        config: &ModelConfig,
    ) -> Result<DeploymentOutcome, MetadataClientError> {
        let url = self.base_url.join(REGISTER_ENDPOINT)?;

        info!(
            "Registering model {} (variant: {}) at {}",
            config.model_name, config.variant, url
        );

        let response = self.client.post(url.clone()).json(config).send().await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let text = response.text().await?;

        if status.is_success() {
            return Ok(DeploymentOutcome {
                status,
                body: parse_body(&text)?,
                already_registered: false,
            });
        }

        if status.is_conflict() {
            warn!(
                "Model {} already registered, treating as success",
                config.model_id()
            );
            // Conflict bodies are free-form error text; keep them as-is.
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Ok(DeploymentOutcome {
                status,
                body,
                already_registered: true,
            });
        }

        error!(
            "Register failed at {url}: HTTP {status} ({}) - {text}",
            failure_side(status)
        );
        Err(MetadataClientError::Server {
            status,
            body: text,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Update the serving configuration of a registered model.
    ///
    /// PUTs `{"model": {"serving_configuration": ...}}` to
    /// `v1/models/update/{model_id}`. The id defaults to the composite key
    /// derived from the config.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataClientError`] on transport failure, any non-2xx
    /// status, or an undecodable response body.
    pub async fn update_model(
        &self,
        config: &ModelConfig,
        model_id: Option<&str>,
    ) -> Result<DeploymentOutcome, MetadataClientError> {
        let id = match model_id {
            Some(id) => id.to_owned(),
            None => config.model_id(),
        };

        let url = self
            .base_url
            .join(&format!("{UPDATE_ENDPOINT_PREFIX}/{id}"))?;

        info!("Updating model {} at {}", id, url);

        let response = self
            .client
            .put(url.clone())
            .json(&update_body(&config.serving_configuration))
            .send()
            .await?;

        let status = HttpStatusCode::from(response.status().as_u16());
        let text = response.text().await?;

        if status.is_success() {
            return Ok(DeploymentOutcome {
                status,
                body: parse_body(&text)?,
                already_registered: false,
            });
        }

        error!(
            "Update failed at {url}: HTTP {status} ({}) - {text}",
            failure_side(status)
        );
        Err(MetadataClientError::Server {
            status,
            body: text,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Tag a rejected status for the failure log line.
pub(crate) fn failure_side(status: HttpStatusCode) -> &'static str {
    if status.is_server_error() {
        "server error"
    } else if status.is_client_error() {
        "client error"
    } else {
        "unexpected status"
    }
}

/// Update payloads carry only the serving configuration, the one field set
/// the service allows to change after registration.
pub(crate) fn update_body(serving: &ServingConfiguration) -> Value {
    serde_json::json!({
        "model": {
            "serving_configuration": serving
        }
    })
}

pub(crate) fn parse_body(text: &str) -> Result<Value, MetadataClientError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}
