//! Diagnostic types.

use ng_template_parser::ParseError;
use source_map::Span;

/// The source reported with every diagnostic.
pub const SOURCE: &str = "ng-template";

/// A diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The diagnostic code, e.g. `unmatched-opening-tag`.
    pub code: &'static str,
    /// The severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: String,
    /// The source location.
    pub span: Span,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Self::error(error.kind.code(), error.message(), error.span)
    }
}

/// The severity of a diagnostic.
///
/// Every recorded parse error is reported as an error; the parser has no
/// weaker findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// An error that should be fixed.
    Error,
}

impl Severity {
    /// Returns the severity as shown in human output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
        }
    }
}
