//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# dupless configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/vendor/**",
]

# Respect .gitignore files
respect_gitignore = true

# Number of files analyzed in parallel (default: one per CPU)
# parallelism = 4

# Stop at the first file that does not parse (default: warn and skip it)
# fail_on_parse_error = true

# Regular expressions searched in lowercased names.
# Use ^ and $ to match a whole name instead of a part of it.
[forbidden]
function_names = []

# Leave empty to forbid the defaults:
#   "^util[s]?$", "^helper[s]?$", "^base$", "^interfaces$"
package_names = []

variable_names = []

# severity = "warning"  # info | warning | error (default)
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("dupless.toml"), force)?;

    println!("Created dupless.toml");
    println!("\nNext steps:");
    println!("  1. Add patterns under [forbidden] in dupless.toml");
    println!("  2. Run: dupless check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dupless_core::Config;
    use tempfile::TempDir;

    #[test]
    fn template_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).expect("template should parse");
        assert!(config.forbidden.function_names.is_empty());
        assert!(config.forbidden.package_names.is_empty());
        assert!(config.analyzer.respect_gitignore);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("dupless.toml");
        std::fs::write(&path, "# mine").expect("write");

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "# mine");

        write_config(&path, true).expect("forced write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), DEFAULT_CONFIG);
    }
}
