//! Recursive descent parser for templates.
//!
//! The parser keeps an explicit stack of open tags instead of recursing into
//! children. Each call to [`Parser::find_next_child`] produces one node, which
//! is appended to the tag on top of the stack; start tags are pushed and
//! matching end tags pop.

use crate::ast::*;
use crate::error::{ParseError, ParseErrorKind};
use crate::scanner::{is_attribute_name_char, is_tag_name_char, is_tag_name_start, Scanner};
use crate::{ParseOptions, ParseResult, ParseStats};
use smol_str::SmolStr;
use source_map::Span;
use text_size::TextSize;

/// The template parser.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    /// The tree under construction.
    ast: TemplateAst,
    /// Parse errors collected during parsing.
    errors: Vec<ParseError>,
    stats: ParseStats,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    /// Creates a new parser.
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            ast: TemplateAst::new(source),
            errors: Vec::new(),
            stats: ParseStats::default(),
            options,
        }
    }

    /// Scans the whole source into a tree.
    pub fn parse(mut self) -> ParseResult {
        let mut stack = vec![NodeId::ROOT];

        while let Some(child) = self.find_next_child() {
            let top = stack.last().copied().unwrap_or(NodeId::ROOT);
            self.ast.append_child(top, child);

            if self.options.trace {
                let node = &self.ast[child];
                tracing::trace!(
                    kind = node.kind_name(),
                    start = u32::from(node.span.start),
                    end = u32::from(node.span.end),
                    depth = stack.len(),
                    "scanned node"
                );
            }

            match self.ast[child].kind {
                NodeKind::StartTag(_) => stack.push(child),
                NodeKind::EndTag(_) => self.close_tag(&mut stack, child),
                _ => {}
            }
        }

        // Anything still open never saw its end tag.
        while stack.len() > 1 {
            if let Some(unmatched) = stack.pop() {
                let span = self.ast[unmatched].span;
                self.error(ParseErrorKind::UnmatchedOpeningTag, span);
            }
        }

        tracing::debug!(
            len = self.scanner.source().len(),
            nodes = self.stats.total_nodes(),
            errors = self.errors.len(),
            "parsed template"
        );

        ParseResult {
            ast: self.ast,
            errors: self.errors,
            stats: self.stats,
        }
    }

    /// Applies an end tag to the open-tag stack.
    ///
    /// Only a name match pops. A mismatch is reported only while a nameless or
    /// void tag is on top; any other mismatched end tag is left as a child of
    /// the open tag, which stays open.
    fn close_tag(&mut self, stack: &mut Vec<NodeId>, end_tag: NodeId) {
        let top = stack.last().copied().unwrap_or(NodeId::ROOT);
        let top_name = self.ast[top].name().unwrap_or_default();

        if self.ast[end_tag].name() == Some(top_name) {
            // The root is never closed.
            if stack.len() > 1 {
                stack.pop();
            }
            return;
        }

        if top_name.is_empty() || is_void_element(top_name) {
            let kind = if stack.len() > 1 {
                ParseErrorKind::MismatchedClosingTag {
                    expected: top_name.to_string(),
                }
            } else {
                ParseErrorKind::UnexpectedClosingTag
            };
            let span = Span::new(self.ast[end_tag].span.start, self.scanner.pos());
            self.error(kind, span);
        }
    }

    /// Records an error.
    fn error(&mut self, kind: ParseErrorKind, span: Span) {
        self.errors.push(ParseError::new(kind, span));
    }

    /// Allocates a node without parent or children.
    fn alloc(&mut self, kind: NodeKind, full_start: TextSize, start: usize) -> NodeId {
        let span = Span::from_offsets(start, self.scanner.offset());
        self.ast.alloc(Node {
            full_start,
            span,
            parent: None,
            kind,
        })
    }

    /// Skips whitespace and produces the next node, or `None` at the end of
    /// the input.
    pub(crate) fn find_next_child(&mut self) -> Option<NodeId> {
        let full_start = self.scanner.pos();
        self.scanner.skip_whitespace();

        let node = match self.scanner.peek() {
            None => {
                if self.scanner.pos() == full_start {
                    return None;
                }
                // Trailing whitespace becomes an empty text node.
                self.stats.text_nodes += 1;
                let end = self.scanner.offset();
                self.alloc(NodeKind::Text, full_start, end)
            }
            Some('<') => {
                if self.scanner.at("<!--") {
                    self.parse_comment(full_start)
                } else if self.scanner.at("</") {
                    self.parse_end_tag(full_start)
                } else {
                    self.parse_tag(full_start)
                }
            }
            Some('{') if self.scanner.at("{{") => self.parse_interpolation(full_start),
            Some(_) => self.parse_text(full_start),
        };

        Some(node)
    }

    /// Parses `<!-- ... -->`. An unterminated comment runs to the end of the
    /// input without an error.
    fn parse_comment(&mut self, full_start: TextSize) -> NodeId {
        let start = self.scanner.offset();
        self.scanner.eat("<!--");
        self.scanner.skip_past("-->");
        self.stats.comments += 1;
        self.alloc(NodeKind::Comment, full_start, start)
    }

    /// Parses `</name>`.
    fn parse_end_tag(&mut self, full_start: TextSize) -> NodeId {
        let start = self.scanner.offset();
        self.scanner.eat("</");
        self.stats.close_tags += 1;

        let name = if self.scanner.skip_past(">") {
            let end = self.scanner.offset();
            Some(SmolStr::new(self.scanner.slice(start + 2, end - 1)))
        } else {
            let span = Span::from_offsets(start, self.scanner.offset());
            self.error(ParseErrorKind::IncompleteClosingTag, span);
            None
        };

        self.alloc(NodeKind::EndTag(EndTag { name }), full_start, start)
    }

    /// Parses `{{ ... }}`.
    fn parse_interpolation(&mut self, full_start: TextSize) -> NodeId {
        let start = self.scanner.offset();
        self.scanner.eat("{{");
        self.stats.interpolations += 1;

        if !self.scanner.skip_past("}}") {
            let span = Span::from_offsets(start, self.scanner.offset());
            self.error(ParseErrorKind::UnclosedInterpolation, span);
        }

        self.alloc(NodeKind::Interpolation, full_start, start)
    }

    /// Parses text up to the next `<`, `{{` or the end of the input.
    fn parse_text(&mut self, full_start: TextSize) -> NodeId {
        let start = self.scanner.offset();
        self.stats.text_nodes += 1;

        // The first character is text whatever it is.
        self.scanner.advance();
        while let Some(c) = self.scanner.peek() {
            if c == '<' || self.scanner.at("{{") {
                break;
            }
            self.scanner.advance();
        }

        self.alloc(NodeKind::Text, full_start, start)
    }

    /// Parses a start or self-closing tag, including its attributes.
    fn parse_tag(&mut self, full_start: TextSize) -> NodeId {
        let start = self.scanner.offset();
        self.scanner.advance(); // `<`

        // Allocated up front so attributes can point at it.
        let id = self.ast.alloc(Node {
            full_start,
            span: Span::from_offsets(start, start),
            parent: None,
            kind: NodeKind::StartTag(Tag::default()),
        });

        // The offending character is consumed along with the `<`.
        if !self.scanner.advance().is_some_and(is_tag_name_start) {
            self.stats.open_tags += 1;
            let span = Span::from_offsets(start, self.scanner.offset());
            self.error(ParseErrorKind::InvalidTagName, span);
            return id;
        }

        self.scanner.eat_while(is_tag_name_char);
        let name = SmolStr::new(self.scanner.slice(start + 1, self.scanner.offset()));

        let attributes = self.parse_attributes(id);
        self.scanner.skip_whitespace();

        let mut self_closing = false;
        if self.scanner.eat("/>") {
            self_closing = true;
            if !is_void_element(&name) {
                let span = Span::from_offsets(start, self.scanner.offset());
                self.error(
                    ParseErrorKind::InvalidSelfClosing {
                        name: name.to_string(),
                    },
                    span,
                );
            }
        } else if !self.scanner.eat(">") {
            let span = Span::from_offsets(start, self.scanner.offset());
            self.error(ParseErrorKind::InvalidTagEnd, span);
        }

        self_closing |= is_void_element(&name);
        if self_closing {
            self.stats.self_closing_tags += 1;
        } else {
            self.stats.open_tags += 1;
        }

        let tag = Tag {
            name,
            attributes,
            children: Vec::new(),
        };
        let end = self.scanner.offset();
        let node = self.ast.node_mut(id);
        node.span = Span::from_offsets(start, end);
        node.kind = if self_closing {
            NodeKind::SelfClosingTag(tag)
        } else {
            NodeKind::StartTag(tag)
        };

        id
    }

    /// Parses attributes until no attribute name follows.
    fn parse_attributes(&mut self, tag: NodeId) -> Vec<NodeId> {
        let mut attributes = Vec::new();
        while let Some(attribute) = self.parse_attribute(tag) {
            attributes.push(attribute);
        }
        attributes
    }

    /// Parses a single attribute, with whitespace allowed around `=`.
    fn parse_attribute(&mut self, tag: NodeId) -> Option<NodeId> {
        let full_start = self.scanner.pos();
        self.scanner.skip_whitespace();

        if !self.scanner.peek().is_some_and(is_attribute_name_char) {
            return None;
        }

        let start = self.scanner.offset();
        self.scanner.eat_while(is_attribute_name_char);
        let name_end = self.scanner.offset();
        self.stats.attributes += 1;

        let mut attribute = Attribute {
            name: SmolStr::new(self.scanner.slice(start, name_end)),
            value: None,
            value_pos: None,
        };

        self.scanner.skip_whitespace();
        let end = if self.scanner.eat("=") {
            self.scanner.skip_whitespace();
            self.parse_attribute_value(start, &mut attribute)
        } else {
            name_end
        };

        Some(self.ast.alloc(Node {
            full_start,
            span: Span::from_offsets(start, end),
            parent: Some(tag),
            kind: NodeKind::Attribute(attribute),
        }))
    }

    /// Parses the value after `=` and returns the attribute's end offset.
    fn parse_attribute_value(&mut self, attr_start: usize, attribute: &mut Attribute) -> usize {
        let value_start = self.scanner.offset();

        match self.scanner.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.scanner.advance();
                attribute.value_pos = Some(self.scanner.pos());

                let quote_str = if quote == '"' { "\"" } else { "'" };
                if self.scanner.skip_past(quote_str) {
                    let end = self.scanner.offset();
                    attribute.value =
                        Some(self.scanner.slice(value_start + 1, end - 1).to_string());
                } else {
                    let span = Span::from_offsets(attr_start, self.scanner.offset());
                    self.error(ParseErrorKind::IncompleteAttributeValue, span);
                }
            }
            Some(c) if is_attribute_name_char(c) => {
                attribute.value_pos = Some(self.scanner.pos());
                self.scanner.eat_while(is_attribute_name_char);

                // An unquoted value must be followed by something.
                if self.scanner.is_eof() {
                    let span = Span::from_offsets(attr_start, self.scanner.offset());
                    self.error(ParseErrorKind::IncompleteAttributeValue, span);
                } else {
                    let end = self.scanner.offset();
                    attribute.value = Some(self.scanner.slice(value_start, end).to_string());
                }
            }
            _ => {
                self.error(
                    ParseErrorKind::UnrecognizedAttributeValue,
                    Span::empty(self.scanner.pos()),
                );
            }
        }

        self.scanner.offset()
    }
}
