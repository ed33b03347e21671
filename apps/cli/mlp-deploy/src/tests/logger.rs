// Unit tests for logger initialization
// Only idempotency is tested here: once the process-global logger is set,
// later calls short-circuit, so an invalid-directory case cannot be
// exercised reliably in the same test binary.

use crate::logger::initialize;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Logger initialization can be reached from multiple
/// code paths (main, tests). If it panics or errors on the second call, the
/// process dies during startup.
///
/// **BUG THIS CATCHES**: Would catch removal of the Once or AtomicBool
/// guards, which makes fern panic when setting the global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = std::env::temp_dir().join("mlp-deploy-test-logger");
    std::fs::create_dir_all(&temp_dir).unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(&temp_dir);
    let result2 = initialize(&temp_dir);

    // THEN: Both should return Ok (second logs a warning, doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );

    // Cleanup
    std::fs::remove_dir_all(&temp_dir).ok();
}
