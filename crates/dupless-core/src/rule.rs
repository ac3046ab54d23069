//! Rule and diagnostic sink traits.

use crate::context::FileContext;
use crate::types::Violation;

/// A per-file lint rule based on `syn` AST analysis.
///
/// Rules are built once per run from resolved configuration and shared by
/// every file being analyzed, possibly from several threads at once. They
/// must not hold per-file state.
///
/// # Example
///
/// ```ignore
/// use dupless_core::{DiagnosticSink, FileContext, Rule};
///
/// pub struct NoFoo;
///
/// impl Rule for NoFoo {
///     fn name(&self) -> &'static str { "no-foo" }
///     fn code(&self) -> &'static str { "DL900" }
///
///     fn check(&self, ctx: &FileContext, ast: &syn::File, sink: &mut dyn DiagnosticSink) {
///         // walk `ast`, call `sink.report(...)` per finding
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "forbidden-names").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file, reporting every finding to `sink`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context about the file being checked
    /// * `ast` - The parsed syntax tree of the file
    /// * `sink` - Receives one call per violation, in traversal order
    fn check(&self, ctx: &FileContext, ast: &syn::File, sink: &mut dyn DiagnosticSink);
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Receiver for violations produced while checking a file.
pub trait DiagnosticSink {
    /// Records one violation.
    fn report(&mut self, violation: Violation);
}

impl DiagnosticSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Location, Severity};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, _ast: &syn::File, sink: &mut dyn DiagnosticSink) {
            sink.report(Violation::new(
                self.code(),
                self.name(),
                Severity::Error,
                Category::Function,
                "x",
                Location::new(ctx.relative_path.clone(), 1, 1),
            ));
        }
    }

    #[test]
    fn test_rule_reports_into_vec_sink() {
        let rule = TestRule;
        let ast = syn::parse_file("fn x() {}").expect("valid source");
        let ctx = FileContext::new(Path::new("src/x.rs"), "fn x() {}", Path::new(""));

        let mut sink: Vec<Violation> = Vec::new();
        rule.check(&ctx, &ast, &mut sink);

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].code, "TEST001");
        assert_eq!(rule.description(), "A test rule");
    }
}
