//! End-to-end tests that run the ng-template-check binary on temporary projects.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// A diagnostic from the JSON output
#[derive(Debug, Clone, Deserialize)]
struct JsonDiagnostic {
    #[serde(rename = "type")]
    diagnostic_type: String,
    filename: String,
    start: JsonPosition,
    message: String,
    code: String,
}

#[derive(Debug, Clone, Deserialize)]
struct JsonPosition {
    line: u32,
    column: u32,
}

fn run_check(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ng-template-check"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run ng-template-check")
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, contents) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

#[test]
fn test_clean_project_exits_zero() {
    let dir = project(&[("app/main.html", "<div ng-app=\"demo\">{{ 1 + 1 }}</div>")]);
    let output = run_check(dir.path(), &[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ng-template-check found 0 errors in 1 file"));
}

#[test]
fn test_errors_exit_one_with_json_positions() {
    let dir = project(&[
        ("views/list.html", "<ul>\n  <li ng-repeat=\"x in xs\">{{x}\n</ul>"),
        ("node_modules/pkg/ignored.html", "<div>"),
    ]);
    let output = run_check(dir.path(), &["--output", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let diagnostics: Vec<JsonDiagnostic> = serde_json::from_slice(&output.stdout).unwrap();
    let summary: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.code.as_str(), d.start.line, d.start.column))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("unclosed-interpolation", 2, 27),
            ("unmatched-opening-tag", 2, 3),
            ("unmatched-opening-tag", 1, 1),
        ]
    );
    assert!(diagnostics.iter().all(|d| d.diagnostic_type == "Error"));
    assert!(diagnostics.iter().all(|d| d.filename == "views/list.html"));
    assert_eq!(diagnostics[0].message, "Unclosed interpolation");
}

#[test]
fn test_machine_output_and_custom_extension() {
    let dir = project(&[("a.tpl", "<b/>"), ("b.html", "<b/>")]);
    let output = run_check(dir.path(), &["--output", "machine", "--extension", "tpl"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(
        "ERROR a.tpl:1:1:1:5 b cannot be used as self closing tag (invalid-self-closing)\n"
    ));
    assert!(!stdout.contains("b.html"));
}

#[test]
fn test_missing_path_fails() {
    let dir = project(&[]);
    let output = run_check(dir.path(), &["does-not-exist"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("path not found"));
}
