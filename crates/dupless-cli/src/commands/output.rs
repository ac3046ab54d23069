//! Output formatting for lint results.

use anyhow::Result;
use dupless_core::{Category, LintResult, Severity};
use std::fmt::Write;
use std::io::IsTerminal;
use std::path::Path;

use crate::OutputFormat;

const RESET: &str = "\x1b[0m";

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result, std::io::stdout().is_terminal())),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => {
            for violation in &result.violations {
                println!("{violation}");
            }
        }
    }
    Ok(())
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Info => "\x1b[34m",
    }
}

/// Renders violations grouped under their file, then a summary line.
fn render_text(result: &LintResult, color: bool) -> String {
    let mut out = String::new();
    let mut current_file: Option<&Path> = None;

    for violation in &result.violations {
        let file = violation.location.file.as_path();
        if current_file != Some(file) {
            if current_file.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "{}", file.display());
            current_file = Some(file);
        }

        let position = format!("{}:{}", violation.location.line, violation.location.column);
        let severity = violation.severity.to_string();
        let _ = writeln!(
            out,
            "  {position:<8} {} {}  [{}]",
            paint(&severity, severity_color(violation.severity), color),
            violation.message,
            violation.code,
        );
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  {:<8} = help: {}", "", suggestion.message);
        }
    }

    if !result.violations.is_empty() {
        out.push('\n');
    }

    let counts = result.severity_counts();
    let per_category = Category::ALL
        .iter()
        .map(|&c| format!("{} {c}", result.by_category(c).len()))
        .collect::<Vec<_>>()
        .join(", ");

    let summary = format!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s) ({per_category})",
        counts.errors, counts.warnings, counts.infos, result.files_checked
    );
    let summary_color = if counts.errors > 0 {
        severity_color(Severity::Error)
    } else if counts.warnings > 0 {
        severity_color(Severity::Warning)
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(out, "{}", paint(&summary, summary_color, color));

    out
}
