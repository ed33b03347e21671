use crate::cli::{Action, Cli};
use crate::error::DeployError;

use deploy_core::METADATA_SERVICE_BASE_URL;
use deploy_core::config::ModelConfig;
use deploy_core::error::CoreError;
use deploy_core::metadata_client::MetadataClient;

use common::ErrorLocation;

use std::panic::Location;

use log::{error, info};

/// Environment fall-back for the API base URL.
const API_URL_ENV_VAR: &str = "MODEL_API_URL";

/// Perform the requested deployment action.
///
/// Loads the model record, resolves the target base URL, then issues a
/// single register or update call and logs the classified outcome.
///
/// # Errors
///
/// Returns [`DeployError`] if the config cannot be loaded, the client
/// cannot be built, or the call fails. All failures are logged with the
/// endpoint and detail before propagating.
pub async fn run(cli: &Cli) -> Result<(), DeployError> {
    let config = load_config(cli)?;
    let base_url = resolve_base_url(cli);

    info!(
        "Deploying model {} (variant: {}) via {}",
        config.model_name, config.variant, base_url
    );

    if cli.dry_run {
        let payload = serde_json::to_string_pretty(&config).map_err(|e| DeployError::Deploy {
            message: format!("Failed to render payload: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;
        info!("Dry run - no API call will be made");
        info!("Action: {:?}", cli.action);
        info!("Payload: {payload}");
        return Ok(());
    }

    let client = MetadataClient::new(&base_url)
        .map_err(CoreError::from)
        .map_err(|e| {
            error!("Failed to build metadata client for {base_url}: {e}");
            DeployError::from(e)
        })?;

    let outcome = match cli.action {
        Action::Register => client.register_model(&config).await,
        Action::Update => client.update_model(&config, cli.model_id.as_deref()).await,
    }
    .map_err(CoreError::from)
    .map_err(|e| {
        error!(
            "{}",
            failure_summary(cli.action, &config.model_id(), &base_url, &e)
        );
        DeployError::from(e)
    })?;

    if outcome.already_registered {
        info!(
            "Model {} already registered (HTTP {}), nothing to do",
            config.model_id(),
            outcome.status
        );
    } else {
        info!(
            "Deployment succeeded: action={:?} model={} status={} response={}",
            cli.action,
            config.model_id(),
            outcome.status,
            outcome.body
        );
    }

    Ok(())
}

/// Failure log line: endpoint, payload summary (the model id), and detail.
pub(crate) fn failure_summary(
    action: Action,
    model_id: &str,
    endpoint: &str,
    error: &CoreError,
) -> String {
    format!("Deployment failed: action={action:?} model={model_id} endpoint={endpoint} error={error}")
}

/// Load the model record from `--config`, or fall back to the built-in one.
pub(crate) fn load_config(cli: &Cli) -> Result<ModelConfig, DeployError> {
    match &cli.config {
        Some(path) => ModelConfig::load(path)
            .map_err(CoreError::from)
            .map_err(|e| {
                error!("Failed to load model config: {e}");
                DeployError::from(e)
            }),
        None => {
            info!("No config file given, using built-in default model record");
            Ok(ModelConfig::default())
        }
    }
}

/// Base URL precedence: `--api-url` flag, then MODEL_API_URL, then the
/// compiled-in default.
pub(crate) fn resolve_base_url(cli: &Cli) -> String {
    if let Some(url) = &cli.api_url {
        return url.clone();
    }

    std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| METADATA_SERVICE_BASE_URL.to_string())
}
