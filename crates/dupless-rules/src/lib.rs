//! # dupless-rules
//!
//! Forbidden-name checks for dupless.
//!
//! Names of functions, modules and variables are lowercased and searched for
//! configured regular expressions. Each hit becomes one violation.
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `forbidden-names` | Forbids function, module and variable names matching configured patterns |
//!
//! ## Usage
//!
//! ```ignore
//! use dupless_core::Analyzer;
//! use dupless_rules::{resolve, ForbiddenNames};
//!
//! // Fails before any file is read if a pattern is invalid.
//! let patterns = resolve(&["dupa"], &[] as &[&str], &["xyz"])?;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(ForbiddenNames::new(patterns))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod extractor;
mod pattern;
mod resolver;

pub use checker::{ForbiddenNames, CODE, NAME};
pub use extractor::{extract, Candidate, NameExtractor, NameNode};
pub use pattern::{Pattern, PatternError, PatternSet};
pub use resolver::{resolve, resolve_config, ResolvedPatterns, DEFAULT_PACKAGE_PATTERNS};

/// Re-export core types for convenience.
pub use dupless_core::{Category, Rule, Severity, Violation};
