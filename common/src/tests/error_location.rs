use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` correctly captures file, line, and column.
///
/// **WHY THIS MATTERS**: ErrorLocation is the foundation of the entire error tracking system.
/// If it fails to capture accurate location data, ALL error messages throughout the codebase
/// lose their debugging value.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - `Location::caller()` stops being propagated correctly
/// - File path extraction breaks
/// - Line/column capture fails
#[test]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Current caller location
    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());
    let next_line = line!();

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert_eq!(
        location.line,
        next_line - 1,
        "Should capture correct line number"
    );
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies that ErrorLocation Display formatting produces the expected format.
///
/// **WHY THIS MATTERS**: Error messages are shown in CI logs. If the format breaks,
/// failures become unreadable or lose the location information that makes them traceable.
///
/// **BUG THIS CATCHES**: Would catch if:
/// - Display implementation changes format (e.g., removes brackets)
/// - File path, line, or column are missing from output
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: An ErrorLocation
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = format!("{}", location);

    // THEN: Should produce "[file:line:column]" format
    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert!(
        formatted.contains("error_location.rs"),
        "Should include filename"
    );
    assert!(
        formatted.contains(&location.line.to_string()),
        "Should include line number"
    );
}
