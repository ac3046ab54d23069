//! Core types for forbidden-name findings and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How seriously a finding is treated. Only `Error` fails a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, never fails.
    Info,
    /// Reported, never fails.
    Warning,
    /// Reported and fails the run.
    Error,
}

impl Severity {
    /// Lowercase name, as written in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of declaration a name was taken from.
///
/// Each category has its own set of forbidden patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Function and method declarations.
    Function,
    /// File-level and inline module declarations.
    Package,
    /// `let` bindings, `static` items and assignment targets.
    Variable,
}

impl Category {
    /// All categories, in reporting order.
    pub const ALL: [Self; 3] = [Self::Function, Self::Package, Self::Variable];

    /// Returns the lowercase name used in messages and configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Package => "package",
            Self::Variable => "variable",
        }
    }

    /// Returns the verb phrase used when a name hits a pattern.
    #[must_use]
    pub fn match_phrase(self) -> &'static str {
        match self {
            Self::Package => "matches the forbidden pattern",
            Self::Function | Self::Variable => "contains the forbidden pattern",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a name was declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path relative to the analyzed root.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub column: usize,
    /// Byte offset of the name, 0 when unknown.
    pub offset: usize,
    /// Byte length of the name, 0 for file-level findings.
    pub length: usize,
}

impl Location {
    /// Location with no span information.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Attaches the byte span of the offending name.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// Advice printed under a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown after `help:`.
    pub message: String,
}

impl Suggestion {
    /// Wraps a help text.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A forbidden name found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "DL001").
    pub code: String,
    /// Rule name (e.g., "forbidden-names").
    pub rule: String,
    /// Severity configured for the rule.
    pub severity: Severity,
    /// Which kind of declaration the name came from.
    pub category: Category,
    /// Source text of the pattern that matched.
    pub pattern: String,
    /// Where the name was declared.
    pub location: Location,
    /// Rendered message, derived from `category` and `pattern`.
    pub message: String,
    /// Rename hint, if the rule offers one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Builds a violation and renders its message.
    ///
    /// The message is derived from the category and pattern:
    /// `the <category> name <contains|matches> the forbidden pattern: <pattern>`.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        category: Category,
        pattern: impl Into<String>,
        location: Location,
    ) -> Self {
        let pattern = pattern.into();
        let message = format!(
            "the {} name {}: {}",
            category,
            category.match_phrase(),
            pattern
        );
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            category,
            pattern,
            location,
            message,
            suggestion: None,
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Number of violations per severity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeverityCounts {
    /// `Severity::Error` findings.
    pub errors: usize,
    /// `Severity::Warning` findings.
    pub warnings: usize,
    /// `Severity::Info` findings.
    pub infos: usize,
}

/// Everything one analysis run found.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations, in file order then traversal order.
    pub violations: Vec<Violation>,
    /// Files parsed and checked. Unparsable skipped files are not counted.
    pub files_checked: usize,
}

impl LintResult {
    /// An empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any violation should fail the run.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == Severity::Error)
    }

    /// Violations of one category, in report order.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.category == category)
            .collect()
    }

    /// Tallies violations by severity.
    #[must_use]
    pub fn severity_counts(&self) -> SeverityCounts {
        self.violations
            .iter()
            .fold(SeverityCounts::default(), |mut counts, v| {
                match v.severity {
                    Severity::Error => counts.errors += 1,
                    Severity::Warning => counts.warnings += 1,
                    Severity::Info => counts.infos += 1,
                }
                counts
            })
    }
}
