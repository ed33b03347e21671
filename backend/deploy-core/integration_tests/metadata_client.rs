// Integration tests for MetadataClient against a mock metadata service

use deploy_core::config::ModelConfig;
use deploy_core::error::metadata_client::MetadataClientError;
use deploy_core::metadata_client::MetadataClient;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEFAULT_MODEL_ID: &str = "CD:personalization:mlt-batch:sllim-tg-pkg-3";

/// **VALUE**: Verifies the register happy path: POST to the register
/// endpoint, full payload on the wire, 200 classified as success.
///
/// **WHY THIS MATTERS**: This is the exact call CI makes on push-to-main.
/// Wrong method, wrong path, or a missing payload field means every deploy
/// fails (or registers an incomplete record).
///
/// **BUG THIS CATCHES**: Would catch the method flipping to PUT, the
/// endpoint path drifting, or the payload losing identity fields.
#[tokio::test]
async fn given_200_response_when_register_called_then_succeeds_with_parsed_body() {
    // GIVEN: A mock service accepting the register call
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .and(body_partial_json(json!({
            "model_name": "mlt-batch",
            "variant": "sllim-tg-pkg-3",
            "owner_team": "personalization"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Registering the default record
    let outcome = client
        .register_model(&ModelConfig::default())
        .await
        .unwrap();

    // THEN: Success, body decoded, no conflict flag
    assert_eq!(outcome.status.0, 200);
    assert_eq!(outcome.body["status"], "success");
    assert!(!outcome.already_registered);
}

/// **VALUE**: Verifies the documented already-exists tolerance: 409 on
/// register is success with the conflict flag set.
///
/// **WHY THIS MATTERS**: Register runs on every push to main. Without the
/// tolerance, the second push after an initial registration would fail CI
/// forever even though the system is in the desired state.
///
/// **BUG THIS CATCHES**: Would catch 409 being folded back into the generic
/// server-error path.
#[tokio::test]
async fn given_409_response_when_register_called_then_tolerated_as_already_registered() {
    // GIVEN: A mock service reporting the model already exists
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error": "model already exists"})),
        )
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Registering
    let outcome = client
        .register_model(&ModelConfig::default())
        .await
        .unwrap();

    // THEN: Treated as success with the flag set
    assert!(outcome.already_registered);
    assert!(outcome.status.is_conflict());
}

/// **VALUE**: Verifies a non-tolerated error status fails register with the
/// status code and body preserved.
///
/// **BUG THIS CATCHES**: Would catch error details being dropped before they
/// reach the log line CI operators read.
#[tokio::test]
async fn given_500_response_when_register_called_then_returns_server_error() {
    // GIVEN: A mock service failing the call
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Registering
    let result = client.register_model(&ModelConfig::default()).await;

    // THEN: Server error carrying status and body
    match result.unwrap_err() {
        MetadataClientError::Server { status, body, .. } => {
            assert_eq!(status.0, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected Server error, got: {other}"),
    }
}

/// **VALUE**: Verifies 4xx statuses other than 409 are NOT tolerated on
/// register.
///
/// **WHY THIS MATTERS**: The already-exists tolerance must stay pinned to
/// 409. A 400 means the payload is malformed; swallowing it would let CI
/// report green while the service rejected the record.
///
/// **BUG THIS CATCHES**: Would catch the conflict check widening to any
/// client error.
#[tokio::test]
async fn given_400_response_when_register_called_then_returns_server_error() {
    // GIVEN: A mock service rejecting the payload
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing field"))
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Registering
    let result = client.register_model(&ModelConfig::default()).await;

    // THEN: Server error carrying the 400
    match result.unwrap_err() {
        MetadataClientError::Server { status, body, .. } => {
            assert!(status.is_client_error());
            assert_eq!(body, "missing field");
        }
        other => panic!("expected Server error, got: {other}"),
    }
}

/// **VALUE**: Verifies the update happy path: PUT to the id-keyed endpoint
/// with a serving-configuration-only body.
///
/// **WHY THIS MATTERS**: The update URL embeds the derived composite id and
/// the body must patch serving configuration only. Either drifting breaks
/// manual-dispatch updates.
///
/// **BUG THIS CATCHES**: Would catch a wrong id derivation, the method
/// flipping to POST, or the full record leaking into the patch body.
#[tokio::test]
async fn given_200_response_when_update_called_then_puts_serving_config_to_id_path() {
    // GIVEN: A mock service expecting the update call for the derived id
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/v1/models/update/{DEFAULT_MODEL_ID}")))
        .and(body_partial_json(json!({
            "model": {
                "serving_configuration": { "machine_type": "ml.c5.xlarge" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Updating without an explicit id
    let outcome = client
        .update_model(&ModelConfig::default(), None)
        .await
        .unwrap();

    // THEN: Success
    assert_eq!(outcome.status.0, 200);
    assert_eq!(outcome.body["status"], "updated");
}

/// **VALUE**: Verifies an explicit model id overrides the derived one.
///
/// **BUG THIS CATCHES**: Would catch the override being ignored in favor of
/// the composite key.
#[tokio::test]
async fn given_explicit_model_id_when_update_called_then_overrides_derived_id() {
    // GIVEN: A mock service keyed by a custom id
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/models/update/CD:personalization:other:v2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Updating with an explicit id
    let outcome = client
        .update_model(
            &ModelConfig::default(),
            Some("CD:personalization:other:v2"),
        )
        .await
        .unwrap();

    // THEN: The override path was hit (expect(1) verifies on drop)
    assert_eq!(outcome.status.0, 200);
}

/// **VALUE**: Verifies update has NO conflict tolerance: any non-2xx fails.
///
/// **WHY THIS MATTERS**: The already-exists tolerance is a register-only
/// idempotency rule. A 409 on update means something is genuinely wrong.
#[tokio::test]
async fn given_500_response_when_update_called_then_returns_server_error_with_status() {
    // GIVEN: A mock service failing the update
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/v1/models/update/{DEFAULT_MODEL_ID}")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Updating
    let result = client.update_model(&ModelConfig::default(), None).await;

    // THEN: Server error whose message carries the status code
    let err = result.unwrap_err();
    assert!(matches!(err, MetadataClientError::Server { .. }));
    assert!(format!("{err}").contains("500"));
}

/// **VALUE**: Verifies an unreachable endpoint is a clean Http error.
///
/// **WHY THIS MATTERS**: When the metadata service is down, CI must see a
/// non-zero exit with a readable message, not a panic or a hang.
///
/// **BUG THIS CATCHES**: Would catch an unwrap on the send() result.
#[tokio::test]
async fn given_unreachable_endpoint_when_register_called_then_returns_http_error() {
    // GIVEN: Nothing listening on the target port
    let client = MetadataClient::new("http://127.0.0.1:1").unwrap();

    // WHEN: Registering
    let result = client.register_model(&ModelConfig::default()).await;

    // THEN: Http error, no panic
    assert!(matches!(result, Err(MetadataClientError::Http { .. })));
}

/// **VALUE**: Verifies a response slower than the client timeout is a clean
/// Http error for both actions.
///
/// **BUG THIS CATCHES**: Would catch a client built without a timeout, which
/// would hang CI until the runner kills the job.
#[tokio::test]
async fn given_slow_response_when_deadline_passes_then_returns_http_error() {
    // GIVEN: A mock service that responds slower than the client timeout
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/v1/models/update/{DEFAULT_MODEL_ID}")))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = MetadataClient::with_timeout(&server.uri(), Duration::from_millis(50)).unwrap();
    let config = ModelConfig::default();

    // WHEN/THEN: Both actions time out with an Http error
    let register = client.register_model(&config).await;
    assert!(matches!(register, Err(MetadataClientError::Http { .. })));

    let update = client.update_model(&config, None).await;
    assert!(matches!(update, Err(MetadataClientError::Http { .. })));
}

/// **VALUE**: Verifies a success status with an undecodable body fails as a
/// Json error instead of reporting green.
///
/// **BUG THIS CATCHES**: Would catch response parsing being made lenient for
/// 2xx bodies.
#[tokio::test]
async fn given_200_with_malformed_body_when_register_called_then_returns_json_error() {
    // GIVEN: A mock service returning HTML on the success path
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let client = MetadataClient::new(&server.uri()).unwrap();

    // WHEN: Registering
    let result = client.register_model(&ModelConfig::default()).await;

    // THEN: Json error
    assert!(matches!(result, Err(MetadataClientError::Json { .. })));
}

/// **VALUE**: Verifies base URLs with and without a trailing slash hit the
/// same endpoint.
///
/// **WHY THIS MATTERS**: The compiled-in base URL has a multi-segment path.
/// `Url::join` silently drops the last segment of a slash-less base, which
/// would send every request to the wrong service prefix.
#[tokio::test]
async fn given_base_url_with_trailing_slash_when_register_called_then_hits_same_path() {
    // GIVEN: A mock service and a trailing-slash base URL
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/prefix/v1/models/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(2)
        .mount(&server)
        .await;

    let config = ModelConfig::default();

    // WHEN: Registering through both base URL spellings
    let with_slash = MetadataClient::new(&format!("{}/prefix/", server.uri())).unwrap();
    with_slash.register_model(&config).await.unwrap();

    let without_slash = MetadataClient::new(&format!("{}/prefix", server.uri())).unwrap();

    // THEN: Both hit the prefixed register path (expect(2) verifies on drop)
    without_slash.register_model(&config).await.unwrap();
}
