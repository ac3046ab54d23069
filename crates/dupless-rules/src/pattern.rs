//! Compiled forbidden-name patterns.
//!
//! Patterns are regular expressions searched anywhere in a lowercased name.
//! Anchoring is left to the pattern author: `dupa` hits `mydupafn`, while
//! `^util[s]?$` only hits `util` and `utils`.

use dupless_core::Category;
use miette::Diagnostic;
use regex::Regex;
use thiserror::Error;

/// A configured pattern string that is not a valid regular expression.
#[derive(Debug, Error, Diagnostic)]
#[error("cannot parse {category} pattern #{index} `{pattern}`")]
#[diagnostic(
    code(dupless::invalid_pattern),
    help("patterns use Rust `regex` syntax; escape metacharacters such as `[` or `(` with `\\`")
)]
pub struct PatternError {
    /// Category whose list contained the pattern.
    pub category: Category,
    /// Position of the pattern within its list.
    pub index: usize,
    /// The raw pattern text as configured.
    pub pattern: String,
    /// Underlying regex syntax error.
    #[source]
    pub source: regex::Error,
}

/// A single compiled pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern from its source text.
    ///
    /// # Errors
    ///
    /// Returns the regex syntax error if `source` is not a valid pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(source)?,
        })
    }

    /// Returns the pattern source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns true if the pattern occurs anywhere in `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered set of compiled patterns for one category.
///
/// Immutable once compiled, so a single set is shared by every file and
/// every worker thread of a run.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {

    /// Compiles every pattern, in order.
    ///
    /// Compilation is all-or-nothing: the first invalid pattern aborts and
    /// no partial set is returned.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] naming the first pattern that fails to compile.
    pub fn compile<I, S>(category: Category, sources: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = sources
            .into_iter()
            .enumerate()
            .map(|(index, source)| {
                let source = source.as_ref();
                Pattern::new(source).map_err(|e| PatternError {
                    category,
                    index,
                    pattern: source.to_string(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterates over the compiled patterns in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Returns every pattern found in `name`, with its index.
    ///
    /// `name` is expected to be lowercased already. All matches are
    /// returned, not just the first, in configuration order.
    pub fn test<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (usize, &'a Pattern)> + 'a {
        self.patterns
            .iter()
            .enumerate()
            .filter(move |(_, pattern)| pattern.is_match(name))
    }
}
