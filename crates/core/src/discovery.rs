//! Code path discovery for tier inputs
//!
//! Platform and language components are located by name inside a library
//! directory, either as `<lib>/<name>` or as versioned `<lib>/<name>-<vsn>`
//! (highest version wins). Project paths come from glob patterns.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Located component paths plus the names that could not be found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub paths: Vec<PathBuf>,
    pub missing: Vec<String>,
}

/// Locate each named component under `lib_dir`.
///
/// A component that cannot be found is omitted and reported in `missing`
/// rather than failing the run.
pub fn discover_components(lib_dir: &Path, names: &[String], code_subdir: &str) -> Discovered {
    let mut found = Discovered::default();
    for name in names {
        match locate_component(lib_dir, name, code_subdir) {
            Some(path) => {
                debug!(component = %name, path = %path.display(), "located component");
                found.paths.push(path);
            }
            None => {
                warn!(component = %name, lib_dir = %lib_dir.display(), "component not found, omitting");
                found.missing.push(name.clone());
            }
        }
    }
    found
}

fn locate_component(lib_dir: &Path, name: &str, code_subdir: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    let exact = lib_dir.join(name);
    if exact.is_dir() {
        candidates.push(exact);
    }

    let pattern = format!(
        "{}/{}-*",
        glob::Pattern::escape(&lib_dir.to_string_lossy()),
        glob::Pattern::escape(name)
    );
    if let Ok(entries) = glob::glob(&pattern) {
        candidates.extend(entries.filter_map(Result::ok).filter(|p| p.is_dir()));
    }

    candidates.sort_by_key(|dir| version_of(dir, name));

    candidates
        .into_iter()
        .rev()
        .map(|dir| {
            if code_subdir.is_empty() {
                dir
            } else {
                dir.join(code_subdir)
            }
        })
        .find(|path| path.is_dir())
}

/// Numeric version components of `<name>-<vsn>`; unversioned dirs yield none.
fn version_of(dir: &Path, name: &str) -> Vec<u64> {
    let file_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.strip_prefix(name).and_then(|rest| rest.strip_prefix('-')) {
        Some(vsn) => vsn
            .split(['.', '-'])
            .map(|part| part.parse::<u64>().unwrap_or(0))
            .collect(),
        None => Vec::new(),
    }
}

/// Expand glob patterns relative to `root` into sorted, de-duplicated paths.
pub fn expand_globs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let full = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            format!(
                "{}/{}",
                glob::Pattern::escape(&root.to_string_lossy()),
                pattern
            )
        };
        let entries =
            glob::glob(&full).with_context(|| format!("invalid path pattern '{}'", pattern))?;
        for entry in entries {
            match entry {
                Ok(path) => paths.push(path),
                Err(e) => debug!(error = %e, "skipping unreadable path"),
            }
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}
