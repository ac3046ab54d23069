//! Rule reporting declarations whose names hit a forbidden pattern.
//!
//! # Matching
//!
//! Every name is lowercased before matching, in all three categories, so
//! patterns are written in lowercase. Patterns are searched anywhere in the
//! name unless they carry their own `^`/`$` anchors.
//!
//! A name hitting several patterns is reported once per pattern, in
//! pattern order. Names are never deduplicated, and `_` bindings are
//! checked like any other name.
//!
//! # Configuration
//!
//! ```toml
//! [forbidden]
//! function_names = ["dupa"]
//! package_names = []          # empty: ^util[s]?$, ^helper[s]?$, ^base$, ^interfaces$
//! variable_names = ["xyz"]
//! severity = "error"
//! ```

use crate::extractor::{Candidate, NameExtractor};
use crate::resolver::ResolvedPatterns;
use dupless_core::{DiagnosticSink, FileContext, Location, Rule, Severity, Suggestion, Violation};

/// Rule code for forbidden-names.
pub const CODE: &str = "DL001";

/// Rule name for forbidden-names.
pub const NAME: &str = "forbidden-names";

/// Flags function, module and variable names that match forbidden patterns.
#[derive(Debug, Clone)]
pub struct ForbiddenNames {
    patterns: ResolvedPatterns,
    severity: Severity,
}

impl ForbiddenNames {
    /// Creates the rule from already-resolved pattern sets.
    #[must_use]
    pub fn new(patterns: ResolvedPatterns) -> Self {
        Self {
            patterns,
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Walks `ast` once, reporting one violation per (name, matching pattern).
    pub fn run(&self, ctx: &FileContext, ast: &syn::File, sink: &mut dyn DiagnosticSink) {
        let mut extractor = NameExtractor::new(|candidate: Candidate| {
            self.check_candidate(ctx, &candidate, sink);
        });
        extractor.extract_file(ctx.module_name.as_deref(), ast);
    }

    fn check_candidate(
        &self,
        ctx: &FileContext,
        candidate: &Candidate,
        sink: &mut dyn DiagnosticSink,
    ) {
        let set = self.patterns.for_category(candidate.category);

        for (_, pattern) in set.test(&candidate.name) {
            let location = Location::new(
                ctx.relative_path.clone(),
                candidate.line,
                candidate.column,
            )
            .with_span(
                ctx.offset_for(candidate.line, candidate.column),
                candidate.length,
            );

            sink.report(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    candidate.category,
                    pattern.as_str(),
                    location,
                )
                .with_suggestion(Suggestion::new(format!(
                    "rename `{}` so it does not match `{}`",
                    candidate.ident,
                    pattern.as_str()
                ))),
            );
        }
    }
}

impl Rule for ForbiddenNames {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids function, module and variable names matching configured patterns"
    }

    fn check(&self, ctx: &FileContext, ast: &syn::File, sink: &mut dyn DiagnosticSink) {
        self.run(ctx, ast, sink);
    }
}
