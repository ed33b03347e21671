// Unit tests for the CoreError umbrella

use crate::error::CoreError;
use crate::error::config::ConfigError;
use crate::error::metadata_client::MetadataClientError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

/// **VALUE**: Verifies ConfigError converts into CoreError transparently.
///
/// **WHY THIS MATTERS**: CoreError is the single error type callers outside
/// this crate wrap (the CLI flattens it into its exit-code mapping). If the
/// `#[from]` conversion or the transparent Display broke, failure messages
/// would lose the config detail operators need.
///
/// **BUG THIS CATCHES**: Would catch a removed `#[from]` attribute or a
/// Display wrapper that prefixes/truncates the inner message.
#[test]
fn given_config_error_when_wrapped_in_core_error_then_display_is_transparent() {
    // GIVEN: A validation error
    let inner = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("variant cannot be empty"),
    };
    let inner_text = format!("{inner}");

    // WHEN: Converting through the umbrella
    let core = CoreError::from(inner);

    // THEN: Display passes through unchanged
    assert_eq!(format!("{core}"), inner_text);
    assert!(matches!(core, CoreError::Config(_)));
}

/// **VALUE**: Verifies MetadataClientError converts into CoreError and keeps
/// the status code and body in its message.
///
/// **BUG THIS CATCHES**: Would catch the Server variant losing its detail on
/// the way to the CLI's log line.
#[test]
fn given_server_error_when_wrapped_in_core_error_then_keeps_status_and_body() {
    // GIVEN: A server rejection
    let inner = MetadataClientError::Server {
        status: HttpStatusCode(500),
        body: String::from("internal error"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Converting through the umbrella
    let core = CoreError::from(inner);

    // THEN: Status and body survive in the message
    let formatted = format!("{core}");
    assert!(formatted.contains("500"));
    assert!(formatted.contains("internal error"));
    assert!(matches!(core, CoreError::MetadataClient(_)));
}
