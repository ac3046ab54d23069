//! Patterns command: shows what a check run would match against.

use anyhow::Result;
use dupless_core::Category;
use dupless_rules::ResolvedPatterns;
use std::fmt::Write;

use crate::config_resolver::ConfigSource;
use crate::PatternArgs;

/// Runs the patterns command.
pub fn run(patterns: PatternArgs, source: &ConfigSource) -> Result<()> {
    let mut config = source.load()?;
    patterns.apply(&mut config.forbidden);

    let resolved = super::resolve_or_exit(&config.forbidden);

    match source.path() {
        Some(path) => println!("Config: {}\n", path.display()),
        None => println!("Config: built-in defaults\n"),
    }
    print!("{}", render(&resolved));

    Ok(())
}

fn render(resolved: &ResolvedPatterns) -> String {
    let mut out = String::new();

    for category in Category::ALL {
        let set = resolved.for_category(category);
        let marker = if category == Category::Package && resolved.uses_package_defaults() {
            " (defaults)"
        } else {
            ""
        };
        let _ = writeln!(out, "{category} names{marker}:");

        if set.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for (index, pattern) in set.iter().enumerate() {
            let _ = writeln!(out, "  {index:>2}  {}", pattern.as_str());
        }
    }

    out
}
