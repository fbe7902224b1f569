//! Parse error types.
//!
//! Errors are recorded, never returned: the parser always produces a complete
//! tree and reports every malformed construct it recovered from.

use source_map::Span;
use text_size::TextSize;
use thiserror::Error;

/// An error recorded while parsing a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{kind}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// The location in the source where the error occurred.
    pub span: Span,
}

impl ParseError {
    /// Creates a new parse error.
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The human-readable message, as shown in editor diagnostics.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    #[inline]
    pub fn start(&self) -> TextSize {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.span.end
    }
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseErrorKind {
    /// `<` was not followed by an ASCII letter.
    #[error("Invalid tag name")]
    InvalidTagName,

    /// A tag was not terminated by `>` or `/>`.
    #[error("Invalid tag end")]
    InvalidTagEnd,

    /// A non-void tag was written as `<name/>`.
    #[error("{name} cannot be used as self closing tag")]
    InvalidSelfClosing {
        /// The tag name.
        name: String,
    },

    /// An attribute value ran to the end of the input.
    #[error("Incomplete attribute value")]
    IncompleteAttributeValue,

    /// `=` was followed by something that cannot start a value.
    #[error("Unrecognized attribute value")]
    UnrecognizedAttributeValue,

    /// `</` was never closed by `>`.
    #[error("Incomplete closing tag")]
    IncompleteClosingTag,

    /// `{{` was never closed by `}}`.
    #[error("Unclosed interpolation")]
    UnclosedInterpolation,

    /// A closing tag arrived while a nameless or void tag was open.
    #[error("Expected closing tag named \"{expected}\"")]
    MismatchedClosingTag {
        /// The name of the tag left open.
        expected: String,
    },

    /// A closing tag arrived with nothing open.
    #[error("Unexpected closing tag")]
    UnexpectedClosingTag,

    /// A start tag was still open at the end of the input.
    #[error("Unmatched opening tag")]
    UnmatchedOpeningTag,
}

impl ParseErrorKind {
    /// A stable kebab-case identifier for this kind of error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::InvalidTagName => "invalid-tag-name",
            ParseErrorKind::InvalidTagEnd => "invalid-tag-end",
            ParseErrorKind::InvalidSelfClosing { .. } => "invalid-self-closing",
            ParseErrorKind::IncompleteAttributeValue => "incomplete-attribute-value",
            ParseErrorKind::UnrecognizedAttributeValue => "unrecognized-attribute-value",
            ParseErrorKind::IncompleteClosingTag => "incomplete-closing-tag",
            ParseErrorKind::UnclosedInterpolation => "unclosed-interpolation",
            ParseErrorKind::MismatchedClosingTag { .. } => "mismatched-closing-tag",
            ParseErrorKind::UnexpectedClosingTag => "unexpected-closing-tag",
            ParseErrorKind::UnmatchedOpeningTag => "unmatched-opening-tag",
        }
    }
}
