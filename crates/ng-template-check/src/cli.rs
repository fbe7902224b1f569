//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Reports parse errors in AngularJS HTML templates.
#[derive(Debug, Parser)]
#[command(name = "ng-template-check")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,

    /// Template file extension
    #[arg(long, default_value = "html")]
    pub extension: String,

    /// Print node statistics
    #[arg(long)]
    pub stats: bool,

    /// Log every scanned node (needs RUST_LOG=ng_template_parser=trace)
    #[arg(long = "trace-nodes")]
    pub trace_nodes: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// Human-readable with code snippets
    HumanVerbose,
    /// JSON output
    Json,
    /// Machine-readable (one line per diagnostic)
    Machine,
}

impl Args {
    /// The extension with a leading dot, as matched against file names.
    pub fn file_suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["ng-template-check"]);
        assert_eq!(args.paths, vec![Utf8PathBuf::from(".")]);
        assert_eq!(args.output, OutputFormat::Human);
        assert_eq!(args.file_suffix(), ".html");
        assert!(args.ignore.is_empty());
        assert!(!args.stats);
    }

    #[test]
    fn test_multiple_paths() {
        let args = Args::parse_from(["ng-template-check", "app/views", "index.html"]);
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.paths[1].as_str(), "index.html");
    }

    #[test]
    fn test_output_formats() {
        let args = Args::parse_from(["ng-template-check", "--output", "json"]);
        assert_eq!(args.output, OutputFormat::Json);

        let args = Args::parse_from(["ng-template-check", "--output", "human-verbose"]);
        assert_eq!(args.output, OutputFormat::HumanVerbose);

        let args = Args::parse_from(["ng-template-check", "--output", "machine"]);
        assert_eq!(args.output, OutputFormat::Machine);
    }

    #[test]
    fn test_extension_accepts_leading_dot() {
        let args = Args::parse_from(["ng-template-check", "--extension", ".tpl.html"]);
        assert_eq!(args.file_suffix(), ".tpl.html");
    }

    #[test]
    fn test_repeated_ignore() {
        let args = Args::parse_from([
            "ng-template-check",
            "--ignore",
            "**/vendor/**",
            "--ignore",
            "legacy/*.html",
        ]);
        assert_eq!(args.ignore, vec!["**/vendor/**", "legacy/*.html"]);
    }
}
