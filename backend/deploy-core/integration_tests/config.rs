// Integration tests for config file loading through the public API

use deploy_core::config::ModelConfig;
use deploy_core::error::config::ConfigError;

use std::path::Path;

/// **VALUE**: Verifies a valid config file loads and keeps explicit values.
///
/// **WHY THIS MATTERS**: CI passes `--config` pointing at a checked-in JSON
/// file. If loading mangles explicit values (e.g., defaults overwrite them),
/// deploys would silently register the wrong record.
///
/// **BUG THIS CATCHES**: Would catch serde attributes that apply defaults
/// over present fields, or read/parse plumbing that drops content.
#[test]
fn given_valid_config_file_when_loaded_then_returns_parsed_record() {
    // GIVEN: A valid config file on disk
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{
            "model_name": "mlt-batch",
            "variant": "sllim-tg-pkg-3",
            "owner_team": "personalization",
            "omd_business_service": "content-discovery",
            "serving_configuration": { "max_instance": 9 }
        }"#,
    )
    .unwrap();

    // WHEN: Loading it
    let config = ModelConfig::load(&path).unwrap();

    // THEN: Explicit values survive, omitted ones default
    assert_eq!(config.model_name, "mlt-batch");
    assert_eq!(config.serving_configuration.max_instance, 9);
    assert_eq!(config.serving_configuration.min_instance, 1);
}

/// **VALUE**: Verifies a missing file is a ReadError, not a silent default.
///
/// **WHY THIS MATTERS**: A typo in the `--config` path must fail the deploy.
/// Falling back to the built-in record here would deploy the wrong model
/// without anyone noticing.
///
/// **BUG THIS CATCHES**: Would catch someone porting the preferences-file
/// "missing means defaults" behavior onto explicitly-passed paths.
#[test]
fn given_missing_config_file_when_loaded_then_returns_read_error() {
    // GIVEN: A path that does not exist
    let path = Path::new("/nonexistent/model.json");

    // WHEN: Loading it
    let result = ModelConfig::load(path);

    // THEN: Should be a ReadError carrying the path
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
    assert!(format!("{err}").contains("/nonexistent/model.json"));
}

/// **VALUE**: Verifies malformed JSON is a ParseError with a reason.
///
/// **BUG THIS CATCHES**: Would catch load() swallowing parse failures.
#[test]
fn given_malformed_json_when_loaded_then_returns_parse_error() {
    // GIVEN: A file that is not valid JSON
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "{ not json").unwrap();

    // WHEN: Loading it
    let result = ModelConfig::load(&path);

    // THEN: Should be a ParseError
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies load() rejects records that parse but fail validation.
///
/// **WHY THIS MATTERS**: Validation must run at the load boundary so a bad
/// record never reaches the HTTP client.
#[test]
fn given_invalid_record_when_loaded_then_returns_validation_error() {
    // GIVEN: A parseable record with an empty variant
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(
        &path,
        r#"{
            "model_name": "mlt-batch",
            "variant": "",
            "owner_team": "personalization",
            "omd_business_service": "content-discovery"
        }"#,
    )
    .unwrap();

    // WHEN: Loading it
    let result = ModelConfig::load(&path);

    // THEN: Should be a ValidationError
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}
