//! Offset to line/column conversion.

use crate::ByteOffset;
use text_size::TextSize;

/// A 0-indexed line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// Start offsets of every line in a text, for binary-searched lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<ByteOffset>,
    len: ByteOffset,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(
                text.match_indices('\n')
                    .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
            )
            .collect();

        Self {
            line_starts,
            len: TextSize::from(text.len() as u32),
        }
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts an offset to a line/column pair.
    ///
    /// Offsets past the end of the text return `None`; the end offset itself
    /// is valid and maps to the position after the last character.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.line_starts[line];

        Some(LineCol::new(line as u32, u32::from(col)))
    }

    /// Returns the text of `line` without its trailing line break.
    pub fn line_text<'a>(&self, line: u32, text: &'a str) -> Option<&'a str> {
        let start = usize::from(*self.line_starts.get(line as usize)?);
        let end = self
            .line_starts
            .get(line as usize + 1)
            .map(|&next| usize::from(next) - 1)
            .unwrap_or(text.len());

        text.get(start..end).map(|s| s.trim_end_matches('\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("<div>");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(TextSize::from(0)), Some(LineCol::new(0, 0)));
        assert_eq!(index.line_col(TextSize::from(5)), Some(LineCol::new(0, 5)));
        assert_eq!(index.line_col(TextSize::from(6)), None);
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new("<ul>\n  <li>\n</ul>");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_col(TextSize::from(4)), Some(LineCol::new(0, 4)));
        assert_eq!(index.line_col(TextSize::from(5)), Some(LineCol::new(1, 0)));
        assert_eq!(index.line_col(TextSize::from(7)), Some(LineCol::new(1, 2)));
        assert_eq!(index.line_col(TextSize::from(12)), Some(LineCol::new(2, 0)));
    }

    #[test]
    fn test_line_text() {
        let text = "<ul>\r\n  <li>\n</ul>";
        let index = LineIndex::new(text);
        assert_eq!(index.line_text(0, text), Some("<ul>"));
        assert_eq!(index.line_text(1, text), Some("  <li>"));
        assert_eq!(index.line_text(2, text), Some("</ul>"));
        assert_eq!(index.line_text(3, text), None);
    }

    #[test]
    fn test_trailing_newline_starts_empty_line() {
        let index = LineIndex::new("a\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_col(TextSize::from(2)), Some(LineCol::new(1, 0)));
    }
}
