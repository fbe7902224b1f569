//! Source positions for ng-template.
//!
//! Every node and error produced by the template parser carries a [`Span`] of
//! byte offsets into the original template text. [`LineIndex`] turns those
//! offsets into line/column pairs for reporting.

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex};
pub use span::{ByteOffset, Span};
