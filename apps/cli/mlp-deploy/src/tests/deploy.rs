// Unit tests for the deploy command's config and URL resolution

use crate::cli::{Action, Cli};
use crate::commands::deploy::{failure_summary, load_config, resolve_base_url, run};

use deploy_core::error::CoreError;
use deploy_core::error::metadata_client::MetadataClientError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use clap::Parser;

/// **VALUE**: Verifies `--api-url` beats every other base URL source.
///
/// **WHY THIS MATTERS**: The flag is how operators point a manual dispatch
/// at a staging instance. If the env var or compiled-in default won, their
/// request would silently go to the wrong environment.
///
/// **BUG THIS CATCHES**: Would catch an inverted precedence order.
#[test]
fn given_api_url_flag_when_base_url_resolved_then_flag_wins() {
    // GIVEN: A CLI invocation with an explicit API URL
    let cli = Cli::try_parse_from([
        "mlp-deploy",
        "register",
        "--api-url",
        "http://staging.internal:8080",
    ])
    .unwrap();

    // WHEN: Resolving the base URL
    let url = resolve_base_url(&cli);

    // THEN: The flag value is used verbatim
    assert_eq!(url, "http://staging.internal:8080");
}

/// **VALUE**: Verifies the no-flag path resolves to an absolute http(s) URL.
///
/// **WHY THIS MATTERS**: Push-to-main runs with no flags at all; resolution
/// must land on the env var or the compiled-in metadata-manager URL, never
/// an empty string.
#[test]
fn given_no_api_url_flag_when_base_url_resolved_then_falls_back_to_default() {
    // GIVEN: A CLI invocation without --api-url
    let cli = Cli::try_parse_from(["mlp-deploy", "register"]).unwrap();

    // WHEN: Resolving the base URL
    let url = resolve_base_url(&cli);

    // THEN: Env var or compiled-in default, always an absolute URL
    assert!(url.starts_with("http"), "fall-back must be an absolute URL");
    if std::env::var("MODEL_API_URL").is_err() {
        assert_eq!(url, deploy_core::METADATA_SERVICE_BASE_URL);
    }
}

/// **VALUE**: Verifies omitting `--config` selects the built-in record.
///
/// **WHY THIS MATTERS**: The CI workflow for this repository deploys exactly
/// one hardcoded model and passes no config file. The fall-back record is
/// that deployment.
#[test]
fn given_no_config_flag_when_config_loaded_then_returns_builtin_record() {
    // GIVEN: A CLI invocation without --config
    let cli = Cli::try_parse_from(["mlp-deploy", "register"]).unwrap();

    // WHEN: Loading the config
    let config = load_config(&cli).unwrap();

    // THEN: The built-in record with the fixed composite id
    assert_eq!(config.model_id(), "CD:personalization:mlt-batch:sllim-tg-pkg-3");
}

/// **VALUE**: Verifies a bad `--config` path fails the command.
///
/// **BUG THIS CATCHES**: Would catch load errors being downgraded to the
/// built-in record.
#[test]
fn given_missing_config_file_when_config_loaded_then_returns_error() {
    let cli = Cli::try_parse_from(["mlp-deploy", "register", "--config", "/nope/model.json"])
        .unwrap();

    assert!(load_config(&cli).is_err());
}

/// **VALUE**: Verifies the failure log line names the endpoint alongside the
/// payload summary and error detail.
///
/// **WHY THIS MATTERS**: When a deploy fails, the error line is often the
/// only thing operators read. Without the endpoint they cannot tell whether
/// the call went to dev or to an overridden URL, and misdirected requests
/// look identical to service outages.
///
/// **BUG THIS CATCHES**: Would catch the endpoint (or the model id, or the
/// status detail) being dropped from the failure summary.
#[test]
fn given_failed_deployment_when_summarized_then_includes_endpoint_model_and_detail() {
    // GIVEN: A server rejection from a known endpoint
    let error = CoreError::from(MetadataClientError::Server {
        status: HttpStatusCode(500),
        body: String::from("internal error"),
        location: ErrorLocation::from(Location::caller()),
    });

    // WHEN: Building the failure log line
    let line = failure_summary(
        Action::Update,
        "CD:personalization:mlt-batch:sllim-tg-pkg-3",
        "http://staging.internal:8080",
        &error,
    );

    // THEN: Endpoint, payload summary, and detail all present
    assert!(line.contains("http://staging.internal:8080"));
    assert!(line.contains("CD:personalization:mlt-batch:sllim-tg-pkg-3"));
    assert!(line.contains("Update"));
    assert!(line.contains("500"));
    assert!(line.contains("internal error"));
}

/// **VALUE**: Verifies dry-run completes without any HTTP call.
///
/// **WHY THIS MATTERS**: Dry run exists so workflow changes can be rehearsed
/// safely. The api-url below points at nothing routable; if dry-run ever
/// started sending requests, this test would fail with an Http error.
#[tokio::test]
async fn given_dry_run_flag_when_run_then_succeeds_without_network() {
    // GIVEN: A dry-run invocation pointing at an unreachable endpoint
    let cli = Cli::try_parse_from([
        "mlp-deploy",
        "register",
        "--api-url",
        "http://127.0.0.1:1",
        "--dry-run",
    ])
    .unwrap();

    // WHEN: Running the command
    let result = run(&cli).await;

    // THEN: Succeeds without touching the endpoint
    assert!(result.is_ok());
}
