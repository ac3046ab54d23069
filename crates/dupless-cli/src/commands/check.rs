//! Check command implementation.

use anyhow::{Context, Result};
use dupless_core::{Analyzer, Severity};
use dupless_rules::ForbiddenNames;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::{OutputFormat, PatternArgs};

/// Runs the check command.
pub fn run(
    path: Option<&Path>,
    format: OutputFormat,
    exclude: Vec<String>,
    patterns: PatternArgs,
    severity: Option<Severity>,
    fail_on_parse_error: bool,
    source: &ConfigSource,
) -> Result<()> {
    let mut config = source.load()?;
    patterns.apply(&mut config.forbidden);
    if severity.is_some() {
        config.forbidden.severity = severity;
    }

    // All patterns compile before any file is read.
    let resolved = super::resolve_or_exit(&config.forbidden);
    if resolved.uses_package_defaults() {
        tracing::debug!("No package patterns configured, using defaults");
    }
    let rule = ForbiddenNames::new(resolved).severity(config.forbidden.severity());

    let mut builder = Analyzer::builder();
    if let Some(path) = path {
        builder = builder.root(path);
    }
    let analyzer = builder
        .excludes(exclude)
        .fail_on_parse_error(fail_on_parse_error)
        .config(config)
        .rule(rule)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rule(s)",
        analyzer.root(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
