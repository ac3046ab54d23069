//! Per-file information handed to rules.
//!
//! A file's module name comes from its path. Files that Cargo compiles as
//! crate roots declare no module:
//!
//! - `lib.rs` and `main.rs` anywhere
//! - binaries directly under `src/bin/`
//! - integration tests, examples and benches directly under `tests/`,
//!   `examples/` and `benches/` outside `src/`
//! - `build.rs` outside `src/`

use std::path::{Component, Path, PathBuf};

/// File stems that mark a crate root rather than a named module.
const CRATE_ROOT_STEMS: &[&str] = &["lib", "main"];

/// Directories whose direct `.rs` children are each their own crate.
const TARGET_DIRS: &[&str] = &["tests", "examples", "benches"];

/// What a rule knows about the file it is checking.
///
/// Carries the file's paths and contents, and the module name the file
/// declares by its location in the tree.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path as discovered, usually absolute.
    pub path: &'a Path,
    /// Source text.
    pub content: &'a str,
    /// Path relative to the analyzed root, used in reports.
    pub relative_path: PathBuf,
    /// Module name declared by this file, `None` for crate roots.
    pub module_name: Option<String>,
}

impl<'a> FileContext<'a> {
    /// Builds the context for `path`, found below `root`.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let module_name = Self::compute_module_name(&relative_path);

        Self {
            path,
            content,
            relative_path,
            module_name,
        }
    }

    /// Computes the module name a file declares.
    ///
    /// `foo.rs` declares `foo`, `foo/mod.rs` declares `foo`, and crate
    /// roots declare nothing.
    fn compute_module_name(relative_path: &Path) -> Option<String> {
        let stem = relative_path.file_stem()?.to_str()?;

        if Self::is_crate_root(relative_path, stem) {
            return None;
        }

        if stem == "mod" {
            return relative_path
                .parent()?
                .components()
                .next_back()
                .and_then(|c| match c {
                    Component::Normal(s) => s.to_str().map(String::from),
                    _ => None,
                });
        }

        Some(stem.to_string())
    }

    fn is_crate_root(relative_path: &Path, stem: &str) -> bool {
        if CRATE_ROOT_STEMS.contains(&stem) {
            return true;
        }

        let dirs: Vec<&str> = relative_path
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(s) => s.to_str(),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let under_src = dirs.contains(&"src");

        match dirs.as_slice() {
            [.., "src", "bin"] => true,
            [.., last] if TARGET_DIRS.contains(last) => !under_src,
            _ => stem == "build" && !under_src,
        }
    }

    /// Byte offset of a 1-based line and character column.
    ///
    /// Positions past the end clamp to the end of the line or file.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        let mut start = 0;
        for (index, text) in self.content.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                let within = text
                    .char_indices()
                    .nth(column.saturating_sub(1))
                    .map_or(text.trim_end_matches(['\r', '\n']).len(), |(i, _)| i);
                return start + within;
            }
            start += text.len();
        }
        start
    }
}
