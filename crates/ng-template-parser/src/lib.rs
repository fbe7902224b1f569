//! AngularJS template parser for ng-template-check.
//!
//! This crate provides an error-tolerant parser for HTML templates with
//! directive attributes and `{{ }}` interpolations:
//! - Character scanner
//! - Recursive descent parser with stack-based tag matching
//! - Arena AST with exact byte spans for every node
//! - Position and selector queries for editor tooling
//!
//! # Example
//!
//! ```
//! use ng_template_parser::{parse, NodeKind};
//! use text_size::TextSize;
//!
//! let source = r#"<input ng-model="ctrl.name">
//! <p>Hello {{ ctrl.name }}</p>"#;
//!
//! let result = parse(source);
//! assert!(result.errors.is_empty());
//!
//! let id = result.ast.node_at_position(TextSize::from(10)).unwrap();
//! assert!(matches!(result.ast[id].kind, NodeKind::Attribute(_)));
//! assert_eq!(result.ast[id].name(), Some("ng-model"));
//! ```

mod ast;
mod error;
mod names;
mod parser;
mod query;
mod scanner;

pub use ast::*;
pub use error::{ParseError, ParseErrorKind};
pub use names::{camel_to_kebab, kebab_to_camel, short_name};
pub use query::InterpolationInfo;
pub use scanner::Scanner;
pub use source_map::Span;

/// Options for parsing templates.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Emit a `trace` event for every node produced.
    pub trace: bool,
}

/// Node counts gathered while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseStats {
    /// Start tags, including tags with an invalid name.
    pub open_tags: usize,
    pub close_tags: usize,
    /// Tags written `<x/>` and void elements.
    pub self_closing_tags: usize,
    pub attributes: usize,
    pub comments: usize,
    pub interpolations: usize,
    /// Text runs, including the empty node for trailing whitespace.
    pub text_nodes: usize,
}

impl ParseStats {
    /// Every node counted, the root excluded.
    pub fn total_nodes(&self) -> usize {
        self.open_tags
            + self.close_tags
            + self.self_closing_tags
            + self.attributes
            + self.comments
            + self.interpolations
            + self.text_nodes
    }
}

/// The result of parsing a template.
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed tree.
    pub ast: TemplateAst,
    /// Errors encountered during parsing, in the order they were found.
    pub errors: Vec<ParseError>,
    pub stats: ParseStats,
}

/// Parses a template into an AST.
///
/// Parsing never fails. Malformed markup becomes a best-effort node plus an
/// entry in [`ParseResult::errors`].
pub fn parse(source: &str) -> ParseResult {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a template with custom options.
pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseResult {
    parser::Parser::new(source, options).parse()
}
