//! Locating and loading `dupless.toml`.
//!
//! The first hit wins:
//!
//! 1. `--config <path>`
//! 2. `dupless.toml`, then `.dupless.toml`, in the project directory
//! 3. `config.toml` in the global directory (`$DUPLESS_CONFIG_DIR` or `~/.dupless/`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use dupless_core::Config;
use std::path::{Path, PathBuf};

const PROJECT_CONFIG_NAMES: &[&str] = &["dupless.toml", ".dupless.toml"];
const GLOBAL_CONFIG_NAME: &str = "config.toml";
const GLOBAL_DIR_ENV: &str = "DUPLESS_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the config file, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }

        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Searches for a config file, with the global directory injected.
struct Locator {
    global_dir: Option<PathBuf>,
}

impl Locator {
    fn from_env() -> Self {
        let global_dir = std::env::var_os(GLOBAL_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|h| h.join(".dupless")));
        Self { global_dir }
    }

    fn locate(&self, project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
        if let Some(p) = explicit {
            return ConfigSource::Explicit(p.to_path_buf());
        }

        if let Some(found) = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.exists())
        {
            tracing::debug!("Found project config: {}", found.display());
            return ConfigSource::Project(found);
        }

        self.global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|candidate| candidate.exists())
            .map_or(ConfigSource::Default, |found| {
                tracing::debug!("Found global config: {}", found.display());
                ConfigSource::Global(found)
            })
    }
}

/// Resolves where the configuration for `project_dir` comes from.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    Locator::from_env().locate(project_dir, explicit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator(global: Option<&Path>) -> Locator {
        Locator {
            global_dir: global.map(Path::to_path_buf),
        }
    }

    fn touch(path: &Path, content: &str) -> PathBuf {
        fs::write(path, content).expect("write config");
        path.to_path_buf()
    }

    #[test]
    fn explicit_wins_and_is_trusted_as_is() {
        let project = TempDir::new().expect("tempdir");
        touch(&project.path().join("dupless.toml"), "");

        let missing = Path::new("/nonexistent/dupless.toml");
        assert_eq!(
            locator(None).locate(project.path(), Some(missing)),
            ConfigSource::Explicit(missing.to_path_buf())
        );
    }

    #[test]
    fn project_names_in_priority_order() {
        let project = TempDir::new().expect("tempdir");
        let dotted = touch(&project.path().join(".dupless.toml"), "");
        assert_eq!(
            locator(None).locate(project.path(), None),
            ConfigSource::Project(dotted)
        );

        let plain = touch(&project.path().join("dupless.toml"), "");
        assert_eq!(
            locator(None).locate(project.path(), None),
            ConfigSource::Project(plain)
        );
    }

    #[test]
    fn global_only_when_project_has_none() {
        let project = TempDir::new().expect("tempdir");
        let global = TempDir::new().expect("tempdir");
        let global_file = touch(&global.path().join("config.toml"), "");

        assert_eq!(
            locator(Some(global.path())).locate(project.path(), None),
            ConfigSource::Global(global_file)
        );

        touch(&project.path().join("dupless.toml"), "");
        assert!(matches!(
            locator(Some(global.path())).locate(project.path(), None),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_when_nothing_exists() {
        let project = TempDir::new().expect("tempdir");
        let empty_global = TempDir::new().expect("tempdir");

        assert_eq!(
            locator(Some(empty_global.path())).locate(project.path(), None),
            ConfigSource::Default
        );
        assert!(ConfigSource::Default.path().is_none());
    }

    #[test]
    fn load_parses_forbidden_section() {
        let project = TempDir::new().expect("tempdir");
        let file = touch(
            &project.path().join("dupless.toml"),
            "[forbidden]\nfunction_names = [\"dupa\"]\n",
        );

        let config = ConfigSource::Project(file).load().expect("valid config");
        assert_eq!(config.forbidden.function_names, ["dupa"]);
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/dupless.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn load_defaults_without_file() {
        let config = ConfigSource::Default.load().expect("defaults");
        assert!(config.forbidden.package_names.is_empty());
    }
}
