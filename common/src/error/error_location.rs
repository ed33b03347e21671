//! Source-location capture for error reporting.
//!
//! A failed deploy leaves behind a single log line before the process exits
//! non-zero. Every error variant in this workspace therefore carries an
//! [`ErrorLocation`] so that line points at the call site that raised the
//! error, not just at the error text.

use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location as PanicLocation;

/// File, line, and column of the call site that raised an error.
///
/// Built from [`std::panic::Location`]; pair the constructing function with
/// `#[track_caller]` so the recorded frame is the error site rather than
/// the conversion helper.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl ErrorLocation {
    pub const fn from(location: &'static PanicLocation<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl Display for ErrorLocation {
    /// Renders as `[file:line:column]`, the suffix of every error message.
    fn fmt(&self, f: &mut Formatter<'_>) -> FormatResult {
        write!(f, "[{}:{}:{}]", self.file, self.line, self.column)
    }
}
