//! # dupless-core
//!
//! Core framework for forbidden-name linting based on `syn` AST analysis.
//!
//! This crate provides the types and driver the name checks plug into:
//!
//! - [`Rule`] trait for per-file AST-based checks
//! - [`DiagnosticSink`] for receiving findings as they are produced
//! - [`Analyzer`] for discovering files and running rules over them
//! - [`Violation`] for representing lint findings
//! - [`Config`] for the `dupless.toml` configuration surface
//!
//! ## Example
//!
//! ```ignore
//! use dupless_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, ForbiddenConfig};
pub use context::FileContext;
pub use rule::{DiagnosticSink, Rule, RuleBox};
pub use types::{
    Category, LintResult, Location, Severity, SeverityCounts, Suggestion, Violation,
};
