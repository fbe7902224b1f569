//! Half-open byte ranges into template text.

use text_size::{TextRange, TextSize};

/// A byte offset into a template.
pub type ByteOffset = TextSize;

/// A half-open range `[start, end)` of byte offsets.
///
/// `&source[span]` (via [`Span::slice`]) is exactly the text the span was
/// recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// The start byte offset (inclusive).
    pub start: ByteOffset,
    /// The end byte offset (exclusive).
    pub end: ByteOffset,
}

impl Span {
    /// Creates a new span from start and end byte offsets.
    #[inline]
    pub fn new(start: impl Into<ByteOffset>, end: impl Into<ByteOffset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a zero-width span at `offset`.
    #[inline]
    pub fn empty(offset: impl Into<ByteOffset>) -> Self {
        let offset = offset.into();
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Builds a span from `usize` offsets as handed out by string searches.
    #[inline]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(TextSize::from(start as u32), TextSize::from(end as u32))
    }

    #[inline]
    pub fn len(&self) -> TextSize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `start <= offset < end`.
    #[inline]
    pub fn contains(&self, offset: ByteOffset) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if `start <= offset <= end`.
    ///
    /// Editors place the caret *after* the last character of a word, so
    /// position lookups on names need the closing edge too.
    #[inline]
    pub fn touches(&self, offset: ByteOffset) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Returns the text this span covers in `source`.
    ///
    /// Out-of-range or non-boundary spans yield an empty string rather than
    /// panicking.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(usize::from(self.start)..usize::from(self.end))
            .unwrap_or("")
    }

    #[inline]
    pub fn to_range(self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
        }
    }
}

impl From<Span> for TextRange {
    fn from(span: Span) -> Self {
        TextRange::new(span.start, span.end)
    }
}
