//! Integration test: forbidden names end-to-end via Analyzer.
//!
//! Uses the fixture crate under `tests/fixtures/project/` to verify that
//! pattern resolution, a single traversal per file and reporting work
//! together across several files.

use dupless_core::{Analyzer, Category, LintResult};
use dupless_rules::{resolve, ForbiddenNames, DEFAULT_PACKAGE_PATTERNS};
use std::path::PathBuf;

const NONE: &[&str] = &[];

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn analyze(functions: &[&str], packages: &[&str], variables: &[&str]) -> LintResult {
    let patterns = resolve(functions, packages, variables).expect("fixture patterns should compile");
    Analyzer::builder()
        .root(fixture_root())
        .rule(ForbiddenNames::new(patterns))
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

fn summary(result: &LintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| {
            format!(
                "{}:{}:{} {} {}",
                v.location.file.display(),
                v.location.line,
                v.location.column,
                v.category,
                v.pattern
            )
        })
        .collect()
}

// ── Happy-path: detects expected violations ──

#[test]
fn function_pattern_hits_every_declaration() {
    let result = analyze(&["dupa"], NONE, NONE);

    assert_eq!(result.files_checked, 5);

    let functions = result.by_category(Category::Function);
    assert_eq!(functions.len(), 2, "{:#?}", summary(&result));

    let lib_hit = functions
        .iter()
        .find(|v| v.location.file == PathBuf::from("src/lib.rs"))
        .expect("Dupa in lib.rs should be flagged");
    assert_eq!((lib_hit.location.line, lib_hit.location.column), (6, 8));
    assert_eq!(lib_hit.pattern, "dupa");
    assert_eq!(
        lib_hit.message,
        "the function name contains the forbidden pattern: dupa"
    );
}

#[test]
fn default_package_patterns_flag_exact_names_only() {
    let result = analyze(NONE, NONE, NONE);

    let packages: Vec<(String, String)> = result
        .by_category(Category::Package)
        .into_iter()
        .map(|v| (v.location.file.display().to_string(), v.pattern.clone()))
        .collect();

    assert_eq!(
        packages,
        [
            (
                "src/helpers/mod.rs".to_string(),
                DEFAULT_PACKAGE_PATTERNS[1].to_string()
            ),
            (
                "src/utils.rs".to_string(),
                DEFAULT_PACKAGE_PATTERNS[0].to_string()
            ),
        ]
    );
}

#[test]
fn explicit_package_patterns_disable_defaults() {
    let result = analyze(NONE, &["^naming$"], NONE);
    assert_eq!(summary(&result), ["src/naming.rs:1:1 package ^naming$"]);
}

#[test]
fn variable_name_hits_one_of_two_patterns() {
    let result = analyze(NONE, &["^none$"], &["xyz", "xxx"]);
    assert_eq!(summary(&result), ["src/naming.rs:2:9 variable xyz"]);
}

#[test]
fn results_are_ordered_by_file_then_traversal() {
    let result = analyze(&["dupa"], NONE, NONE);
    assert_eq!(
        summary(&result),
        [
            "src/helpers/mod.rs:1:1 package ^helper[s]?$",
            "src/helpers/mod.rs:4:12 function dupa",
            "src/lib.rs:6:8 function dupa",
            "src/utils.rs:1:1 package ^util[s]?$",
        ]
    );
}

#[test]
fn repeated_runs_are_identical() {
    let first = analyze(&["dupa", "a"], NONE, &["xyz", "er"]);
    let second = analyze(&["dupa", "a"], NONE, &["xyz", "er"]);
    assert_eq!(summary(&first), summary(&second));
    assert!(!first.violations.is_empty());
}

// ── Configuration errors ──

#[test]
fn invalid_pattern_fails_before_analysis() {
    let err = resolve(&["["], NONE, &["xyz"]).unwrap_err();
    assert_eq!(err.category, Category::Function);
    assert_eq!(err.pattern, "[");
    assert!(err.to_string().contains("function pattern"));
}

#[test]
fn compact_report_lines() {
    let result = analyze(NONE, &["^util"], &["xyz"]);
    let lines: Vec<String> = result.violations.iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    src/naming.rs:2:9: error [DL001] the variable name contains the forbidden pattern: xyz
    src/utilities.rs:1:1: error [DL001] the package name matches the forbidden pattern: ^util
    src/utils.rs:1:1: error [DL001] the package name matches the forbidden pattern: ^util
    ");
}
