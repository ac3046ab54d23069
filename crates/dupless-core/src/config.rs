//! Configuration types for dupless.

use crate::types::{Category, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Contents of a `dupless.toml` file. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// `[analyzer]`: where and how to look for files.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// `[forbidden]`: the pattern lists.
    #[serde(default)]
    pub forbidden: ForbiddenConfig,
}

impl Config {
    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] when the file is unreadable, and
    /// [`ConfigError::Invalid`] when it is not a valid config.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Invalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses config text that did not come from a file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Syntax`] when the text is not a valid config.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// The `[analyzer]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Directory analyzed when the command line names none.
    pub root: PathBuf,

    /// Exclude entries: globs, or bare directory names.
    pub exclude: Vec<String>,

    /// Skip files ignored by `.gitignore` and friends.
    pub respect_gitignore: bool,

    /// Worker threads; one per CPU when unset.
    pub parallelism: Option<usize>,

    /// Abort the run on a file that does not parse instead of skipping it.
    pub fail_on_parse_error: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: ["**/target/**", "**/vendor/**"].map(String::from).to_vec(),
            respect_gitignore: true,
            parallelism: None,
            fail_on_parse_error: false,
        }
    }
}

/// Raw, uncompiled forbidden name patterns.
///
/// An empty `package_names` list means "use the built-in defaults"; the
/// other two categories have no defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenConfig {
    /// Regular expressions forbidden in function names.
    #[serde(default)]
    pub function_names: Vec<String>,

    /// Regular expressions forbidden in module names.
    #[serde(default)]
    pub package_names: Vec<String>,

    /// Regular expressions forbidden in variable names.
    #[serde(default)]
    pub variable_names: Vec<String>,

    /// Severity of reported violations (default: error).
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl ForbiddenConfig {
    /// Returns the raw pattern list for a category.
    #[must_use]
    pub fn patterns(&self, category: Category) -> &[String] {
        match category {
            Category::Function => &self.function_names,
            Category::Package => &self.package_names,
            Category::Variable => &self.variable_names,
        }
    }

    /// Replaces the pattern list for a category when `overrides` is non-empty.
    pub fn override_patterns(&mut self, category: Category, overrides: Vec<String>) {
        if overrides.is_empty() {
            return;
        }
        match category {
            Category::Function => self.function_names = overrides,
            Category::Package => self.package_names = overrides,
            Category::Variable => self.variable_names = overrides,
        }
    }

    /// Returns the configured severity, defaulting to error.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Error)
    }
}

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrongly typed keys.
    #[error("invalid config file {}: {source}", path.display())]
    Invalid {
        /// Config file path.
        path: PathBuf,
        /// Error reported by `toml`.
        #[source]
        source: toml::de::Error,
    },

    /// Inline config text is not valid.
    #[error("invalid config: {0}")]
    Syntax(#[from] toml::de::Error),
}
