//! Output formatting.

use crate::cli::OutputFormat;
use crate::diagnostic::{Diagnostic, SOURCE};
use camino::Utf8Path;
use serde::Serialize;
use source_map::{ByteOffset, LineCol, LineIndex};

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type (always `Error` for now).
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    pub filename: String,
    pub start: Position,
    pub end: Position,
    pub message: String,
    pub code: String,
    pub source: String,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number, counted in bytes.
    pub column: u32,
    /// Byte offset.
    pub offset: u32,
}

impl Position {
    fn new(line_index: &LineIndex, offset: ByteOffset) -> Self {
        let lc = line_index.line_col(offset).unwrap_or(LineCol::new(0, 0));
        Self {
            line: lc.line + 1,
            column: lc.col + 1,
            offset: u32::from(offset),
        }
    }
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the diagnostics of one file.
    ///
    /// JSON output is assembled across files by the caller, so this renders it
    /// as a standalone array.
    pub fn format(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(diagnostics, file_path, source),
            OutputFormat::HumanVerbose => self.format_human_verbose(diagnostics, file_path, source),
            OutputFormat::Json => {
                let formatted = Self::format_json_diagnostics(diagnostics, file_path, source);
                serde_json::to_string_pretty(&formatted).unwrap_or_default()
            }
            OutputFormat::Machine => self.format_machine(diagnostics, file_path, source),
        }
    }

    fn format_human(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            let start = Position::new(&line_index, diag.span.start);
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n\n",
                file_path,
                start.line,
                start.column,
                diag.severity.as_str(),
                diag.message,
                diag.code
            ));
        }

        output
    }

    /// Like the human format, with the offending line and a caret under the
    /// error start.
    fn format_human_verbose(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            let start = line_index
                .line_col(diag.span.start)
                .unwrap_or(LineCol::new(0, 0));

            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n",
                file_path,
                start.line + 1,
                start.col + 1,
                diag.severity.as_str(),
                diag.message,
                diag.code
            ));

            if let Some(line) = line_index.line_text(start.line, source) {
                let gutter = (start.line + 1).to_string();
                output.push_str(&format!("  {} | {}\n", gutter, line));
                output.push_str(&format!(
                    "  {} | {}^\n",
                    " ".repeat(gutter.len()),
                    " ".repeat(start.col as usize)
                ));
            }

            output.push('\n');
        }

        output
    }

    /// Formats diagnostics into JSON-ready structs.
    pub fn format_json_diagnostics(
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> Vec<FormattedDiagnostic> {
        let line_index = LineIndex::new(source);
        diagnostics
            .iter()
            .map(|diag| FormattedDiagnostic {
                diagnostic_type: diag.severity.as_str().to_string(),
                filename: file_path.to_string(),
                start: Position::new(&line_index, diag.span.start),
                end: Position::new(&line_index, diag.span.end),
                message: diag.message.clone(),
                code: diag.code.to_string(),
                source: SOURCE.to_string(),
            })
            .collect()
    }

    fn format_machine(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let line_index = LineIndex::new(source);
        let mut output = String::new();

        for diag in diagnostics {
            let start = Position::new(&line_index, diag.span.start);
            let end = Position::new(&line_index, diag.span.end);
            output.push_str(&format!(
                "{} {}:{}:{}:{}:{} {} ({})\n",
                diag.severity.as_str().to_uppercase(),
                file_path,
                start.line,
                start.column,
                end.line,
                end.column,
                diag.message,
                diag.code
            ));
        }

        output
    }
}

/// Summary of a check run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of files checked.
    pub file_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of nodes scanned across all files.
    pub node_count: usize,
}

impl CheckSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let error_word = if self.error_count == 1 {
            "error"
        } else {
            "errors"
        };
        let file_word = if self.file_count == 1 {
            "file"
        } else {
            "files"
        };

        format!(
            "====================================\nng-template-check found {} {} in {} {}",
            self.error_count, error_word, self.file_count, file_word
        )
    }
}
