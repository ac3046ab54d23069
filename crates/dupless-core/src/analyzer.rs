//! File discovery and the parallel per-file rule driver.

use crate::config::Config;
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Globs skipped when neither the builder nor the config names any.
const DEFAULT_EXCLUDES: [&str; 2] = ["**/target/**", "**/vendor/**"];

/// Failures that stop an analysis run.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The working directory needed to absolutize the root is unavailable.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    /// A discovered source file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A source file is not valid Rust.
    #[error("{}: {message}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Message reported by `syn`.
        message: String,
    },

    /// An exclude entry is not a valid glob.
    #[error("invalid exclude glob `{pattern}`: {source}")]
    Glob {
        /// Raw exclude entry.
        pattern: String,
        /// Error reported by `glob`.
        #[source]
        source: glob::PatternError,
    },

    /// Directory traversal failed.
    #[error("cannot walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// The bounded worker pool could not be created.
    #[error("cannot start {threads} analysis threads: {source}")]
    ThreadPool {
        /// Requested thread count.
        threads: usize,
        /// Error reported by `rayon`.
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// One entry of the exclude list.
///
/// Entries without glob metacharacters name a path component, so `vendor`
/// skips every file below any `vendor/` directory.
#[derive(Debug)]
enum Exclude {
    Glob(glob::Pattern),
    Component(String),
}

impl Exclude {
    fn parse(raw: &str) -> Result<Self, AnalyzerError> {
        if raw.contains(['*', '?', '[']) {
            glob::Pattern::new(raw)
                .map(Self::Glob)
                .map_err(|source| AnalyzerError::Glob {
                    pattern: raw.to_string(),
                    source,
                })
        } else {
            Ok(Self::Component(raw.trim_matches('/').to_string()))
        }
    }

    /// Tests the root-relative path only, so directories above the root
    /// never exclude anything.
    fn matches(&self, relative: &Path) -> bool {
        match self {
            Self::Glob(pattern) => pattern.matches_path(relative),
            Self::Component(name) => relative
                .components()
                .any(|c| matches!(c, Component::Normal(part) if part == name.as_str())),
        }
    }
}

/// Configures an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    excludes: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Starts with no rules, no excludes and the default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory to analyze. Takes precedence over `analyzer.root`.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Registers a rule run on every parsed file.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds one exclude entry.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }

    /// Adds several exclude entries.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Supplies the `[analyzer]` settings and the fallback root.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Turns a file that fails to parse into a run failure instead of a
    /// warning. `analyzer.fail_on_parse_error = true` in the config has the
    /// same effect.
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Resolves the root and compiles the exclude list.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Glob`] for a malformed exclude entry and
    /// [`AnalyzerError::CurrentDir`] when a relative root cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map_err(AnalyzerError::CurrentDir)?
                .join(root)
        };

        let mut raw = self.excludes;
        raw.extend(config.analyzer.exclude.iter().cloned());
        if raw.is_empty() {
            raw.extend(DEFAULT_EXCLUDES.map(String::from));
        }
        let excludes = raw
            .iter()
            .map(|entry| Exclude::parse(entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            excludes,
            fail_on_parse_error: self.fail_on_parse_error || config.analyzer.fail_on_parse_error,
            config,
        })
    }
}

/// Runs every registered rule over every Rust file below a root.
///
/// Build one with [`Analyzer::builder()`].
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    excludes: Vec<Exclude>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Starts configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Absolute directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files below the root.
    ///
    /// Files are checked in parallel. Violations come back grouped by file in
    /// path order, and within a file in the order the rules reported them.
    ///
    /// # Errors
    ///
    /// Fails when discovery or reading fails, or when a file does not parse
    /// and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!(root = %self.root.display(), rules = self.rules.len(), "Starting analysis");

        let files = self.discover_files()?;
        info!("Found {} Rust files", files.len());

        let per_file = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|source| AnalyzerError::ThreadPool { threads, source })?
                .install(|| self.check_all(&files)),
            None => self.check_all(&files),
        };

        let mut result = LintResult::new();
        for outcome in per_file {
            match outcome {
                Ok(found) => {
                    result.violations.extend(found);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) if !self.fail_on_parse_error => {
                    warn!("Skipping {}: {message}", path.display());
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            violations = result.violations.len(),
            files = result.files_checked,
            "Analysis finished"
        );
        Ok(result)
    }

    fn check_all(&self, files: &[PathBuf]) -> Vec<Result<Vec<Violation>, AnalyzerError>> {
        files.par_iter().map(|path| self.check_file(path)).collect()
    }

    fn check_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Checking {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let ast = syn::parse_file(&content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let ctx = FileContext::new(path, &content, &self.root);
        let mut sink = Vec::new();
        for rule in &self.rules {
            rule.check(&ctx, &ast, &mut sink);
        }
        Ok(sink)
    }

    /// Collects the `.rs` files below the root that survive the excludes,
    /// sorted by path.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let walker = ignore::WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false)
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            let is_rust = entry.file_type().is_some_and(|t| t.is_file())
                && path.extension().and_then(|e| e.to_str()) == Some("rs");
            if !is_rust {
                continue;
            }
            if self.is_excluded(path) {
                debug!("Excluded {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.excludes.iter().any(|e| e.matches(relative))
    }
}
