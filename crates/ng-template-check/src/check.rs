//! Template discovery and checking.

use crate::cli::{Args, OutputFormat};
use crate::diagnostic::Diagnostic;
use crate::output::{CheckSummary, Formatter};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ng_template_parser::{parse_with_options, ParseOptions, ParseStats};
use rayon::prelude::*;
use std::fs;
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Directories that never hold application templates.
const DEFAULT_IGNORES: &[&str] = &["**/node_modules/**", "**/dist/**"];

/// Check errors.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(#[from] globset::Error),

    /// A path given on the command line does not exist.
    #[error("path not found: {0}")]
    PathNotFound(Utf8PathBuf),
}

/// A template file to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Path used to read the file.
    pub path: Utf8PathBuf,
    /// Path shown in output, relative to the directory it was found in.
    pub display_path: Utf8PathBuf,
}

/// The outcome of checking one template.
#[derive(Debug)]
pub struct FileReport {
    pub template: Template,
    pub source: String,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ParseStats,
}

/// Builds the ignore set from user patterns plus the default ignores.
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, CheckError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns
        .iter()
        .map(String::as_str)
        .chain(DEFAULT_IGNORES.iter().copied())
    {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// Finds templates under `root`, sorted by path.
///
/// A file given directly is always checked, whatever its extension. Files
/// found by walking a directory must end with `suffix` and must not match
/// `ignore` relative to `root`.
pub fn find_templates(
    root: &Utf8Path,
    suffix: &str,
    ignore: &GlobSet,
) -> Result<Vec<Template>, CheckError> {
    if root.is_file() {
        return Ok(vec![Template {
            path: root.to_path_buf(),
            display_path: root.to_path_buf(),
        }]);
    }
    if !root.is_dir() {
        return Err(CheckError::PathNotFound(root.to_path_buf()));
    }

    let templates = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| p.file_name().unwrap_or("").ends_with(suffix))
        .filter_map(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path.as_path()).to_path_buf();
            if ignore.is_match(relative.as_str()) {
                tracing::debug!(path = %path, "ignored");
                return None;
            }
            Some(Template {
                path,
                display_path: relative,
            })
        })
        .collect();

    Ok(templates)
}

/// Parses a template and converts its parse errors into diagnostics.
pub fn check_source(source: &str, options: &ParseOptions) -> (Vec<Diagnostic>, ParseStats) {
    let result = parse_with_options(source, options.clone());
    let diagnostics = result.errors.iter().map(Diagnostic::from).collect();
    (diagnostics, result.stats)
}

/// Checks templates in parallel. Unreadable files are logged and skipped.
pub fn check_files(templates: &[Template], options: &ParseOptions) -> Vec<FileReport> {
    templates
        .par_iter()
        .filter_map(|template| {
            let source = match fs::read_to_string(&template.path) {
                Ok(source) => source,
                Err(err) => {
                    tracing::warn!(path = %template.path, error = %err, "failed to read template");
                    return None;
                }
            };

            let (diagnostics, stats) = check_source(&source, options);
            tracing::debug!(
                path = %template.display_path,
                errors = diagnostics.len(),
                nodes = stats.total_nodes(),
                "checked template"
            );

            Some(FileReport {
                template: template.clone(),
                source,
                diagnostics,
                stats,
            })
        })
        .collect()
}

/// Runs the check on all paths and prints the results.
pub fn run(args: &Args) -> Result<CheckSummary, CheckError> {
    let start = Instant::now();
    let ignore = build_ignore_set(&args.ignore)?;
    let suffix = args.file_suffix();

    let mut templates = Vec::new();
    for root in &args.paths {
        templates.extend(find_templates(root, &suffix, &ignore)?);
    }
    tracing::info!(files = templates.len(), "checking templates");

    let options = ParseOptions {
        trace: args.trace_nodes,
    };
    let reports = check_files(&templates, &options);

    let formatter = Formatter::new(args.output);
    let output_json = args.output == OutputFormat::Json;
    let mut json_output = Vec::new();
    let mut summary = CheckSummary {
        file_count: templates.len(),
        ..CheckSummary::default()
    };

    for report in &reports {
        summary.error_count += report.diagnostics.len();
        summary.node_count += report.stats.total_nodes();

        if report.diagnostics.is_empty() {
            continue;
        }
        let path = &report.template.display_path;
        if output_json {
            json_output.extend(Formatter::format_json_diagnostics(
                &report.diagnostics,
                path,
                &report.source,
            ));
        } else {
            print!("{}", formatter.format(&report.diagnostics, path, &report.source));
        }
    }

    if args.stats {
        eprintln!(
            "scanned {} nodes in {} files ({:?})",
            summary.node_count,
            summary.file_count,
            start.elapsed()
        );
    }

    if output_json {
        let json = serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "[]".to_string());
        println!("{}", json);
    } else {
        println!("{}", summary.format());
    }

    Ok(summary)
}
