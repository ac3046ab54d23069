//! Turns raw configured pattern lists into compiled pattern sets.

use crate::pattern::{PatternError, PatternSet};
use dupless_core::{Category, ForbiddenConfig};
use tracing::debug;

/// Module names forbidden when no package patterns are configured.
pub const DEFAULT_PACKAGE_PATTERNS: &[&str] =
    &["^util[s]?$", "^helper[s]?$", "^base$", "^interfaces$"];

/// The three compiled pattern sets of one run.
#[derive(Debug, Clone)]
pub struct ResolvedPatterns {
    functions: PatternSet,
    packages: PatternSet,
    variables: PatternSet,
    package_defaults: bool,
}

impl ResolvedPatterns {
    /// Returns the pattern set for a category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> &PatternSet {
        match category {
            Category::Function => &self.functions,
            Category::Package => &self.packages,
            Category::Variable => &self.variables,
        }
    }

    /// Returns true if the package set came from [`DEFAULT_PACKAGE_PATTERNS`].
    #[must_use]
    pub fn uses_package_defaults(&self) -> bool {
        self.package_defaults
    }
}

/// Compiles the function, package and variable pattern lists.
///
/// An empty package list is replaced by [`DEFAULT_PACKAGE_PATTERNS`]; empty
/// function and variable lists compile to sets that never match. All three
/// lists compile before anything is returned, and the first invalid pattern
/// in any of them fails the whole resolution.
///
/// # Errors
///
/// Returns [`PatternError`] for the first pattern that is not a valid regex.
pub fn resolve<F, P, V>(
    functions: &[F],
    packages: &[P],
    variables: &[V],
) -> Result<ResolvedPatterns, PatternError>
where
    F: AsRef<str>,
    P: AsRef<str>,
    V: AsRef<str>,
{
    let functions = PatternSet::compile(Category::Function, functions)?;

    let package_defaults = packages.is_empty();
    let packages = if package_defaults {
        PatternSet::compile(Category::Package, DEFAULT_PACKAGE_PATTERNS)?
    } else {
        PatternSet::compile(Category::Package, packages)?
    };

    let variables = PatternSet::compile(Category::Variable, variables)?;

    debug!(
        functions = functions.len(),
        packages = packages.len(),
        variables = variables.len(),
        package_defaults,
        "Resolved forbidden name patterns"
    );

    Ok(ResolvedPatterns {
        functions,
        packages,
        variables,
        package_defaults,
    })
}

/// Compiles the pattern lists of a `[forbidden]` configuration section.
///
/// # Errors
///
/// Returns [`PatternError`] for the first pattern that is not a valid regex.
pub fn resolve_config(config: &ForbiddenConfig) -> Result<ResolvedPatterns, PatternError> {
    resolve(
        config.patterns(Category::Function),
        config.patterns(Category::Package),
        config.patterns(Category::Variable),
    )
}
