//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod output;
pub mod patterns;

use dupless_core::{Category, ForbiddenConfig};
use dupless_rules::{resolve_config, ResolvedPatterns};

use crate::PatternArgs;

/// Exit status for configuration that cannot be compiled.
const EXIT_INVALID_PATTERN: i32 = 2;

impl PatternArgs {
    /// Replaces each config list that has patterns given on the command line.
    pub fn apply(self, forbidden: &mut ForbiddenConfig) {
        forbidden.override_patterns(Category::Function, self.function_names);
        forbidden.override_patterns(Category::Package, self.package_names);
        forbidden.override_patterns(Category::Variable, self.variable_names);
    }
}

/// Compiles all pattern lists, or renders the failure and exits.
///
/// Runs before any source file is read, so a bad pattern never produces a
/// partial report.
pub fn resolve_or_exit(forbidden: &ForbiddenConfig) -> ResolvedPatterns {
    match resolve_config(forbidden) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(EXIT_INVALID_PATTERN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_lists_replace_only_their_category() {
        let mut forbidden = ForbiddenConfig {
            function_names: vec!["from_file".into()],
            package_names: vec!["^pkg$".into()],
            variable_names: vec!["tmp".into()],
            ..ForbiddenConfig::default()
        };

        PatternArgs {
            function_names: vec!["dupa".into(), "foo".into()],
            ..PatternArgs::default()
        }
        .apply(&mut forbidden);

        assert_eq!(forbidden.function_names, ["dupa", "foo"]);
        assert_eq!(forbidden.package_names, ["^pkg$"]);
        assert_eq!(forbidden.variable_names, ["tmp"]);
    }

    #[test]
    fn empty_cli_keeps_config() {
        let mut forbidden = ForbiddenConfig::default();
        PatternArgs::default().apply(&mut forbidden);
        assert_eq!(forbidden, ForbiddenConfig::default());
    }
}
