//! Character cursor over template text.
//!
//! The scanner never fails. Reads past the end of the input return `None`
//! and leave it to the parser to decide how to recover.

use text_size::TextSize;

/// A forward-only cursor over a template.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    source: &'src str,
    /// Byte offset of the next unread character.
    pos: usize,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    /// Returns the source string being scanned.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// The current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The current byte offset as a [`TextSize`].
    #[inline]
    pub fn pos(&self) -> TextSize {
        TextSize::from(self.pos as u32)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The unread remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    /// Returns the character at the cursor without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character `n` characters past the cursor.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    /// Consumes and returns the character at the cursor.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Returns true if the unread input starts with `s`.
    #[inline]
    pub fn at(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Consumes `s` if the unread input starts with it.
    pub fn eat(&mut self, s: &str) -> bool {
        if self.at(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `pred` holds.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    /// Skips space, tab, CR, LF and form-feed. Returns true if anything was skipped.
    pub fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        self.eat_while(is_whitespace);
        self.pos > start
    }

    /// Moves past the next occurrence of `needle`.
    ///
    /// When `needle` does not occur, moves to the end of the input and returns
    /// false.
    pub fn skip_past(&mut self, needle: &str) -> bool {
        match self.rest().find(needle) {
            Some(index) => {
                self.pos += index + needle.len();
                true
            }
            None => {
                self.skip_to_end();
                false
            }
        }
    }

    /// Moves to the end of the input.
    pub fn skip_to_end(&mut self) {
        self.pos = self.source.len();
    }

    /// Returns the source text between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        self.source.get(start..end).unwrap_or("")
    }
}

/// Whitespace between nodes and inside tags.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\x0C')
}

/// Characters that may open a tag name.
#[inline]
pub fn is_tag_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Characters that may continue a tag name.
///
/// All control characters are rejected, along with the characters that end
/// a tag name in HTML.
#[inline]
pub fn is_tag_name_char(c: char) -> bool {
    !(c < '\x20' || matches!(c, ' ' | '/' | '>'))
}

/// Characters that may appear in an attribute name or an unquoted value.
#[inline]
pub fn is_attribute_name_char(c: char) -> bool {
    is_tag_name_char(c) && !matches!(c, '=' | '"' | '\'')
}
