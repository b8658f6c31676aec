//! On-disk layout of tier databases
//!
//! Platform and language-core databases are shared across projects under the
//! user cache directory; the dependencies database lives in the project's
//! build output. Each file name embeds the tier key, so a version or lockfile
//! change resolves to a new file and the old one is left in place.

use crate::tier::Tier;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const DATABASE_EXT: &str = "tgdb";
const PROJECT_SUBDIR: &str = "typegate";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    user_cache_dir: PathBuf,
    project_output_dir: PathBuf,
}

impl CacheLayout {
    pub fn new(user_cache_dir: impl Into<PathBuf>, project_output_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_cache_dir: user_cache_dir.into(),
            project_output_dir: project_output_dir.into(),
        }
    }

    /// Returns `<platform cache dir>/typegate` (e.g. `~/.cache/typegate`).
    pub fn default_user_cache_dir() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|dir| dir.join("typegate"))
            .context("Could not determine user cache directory")
    }

    pub fn user_cache_dir(&self) -> &Path {
        &self.user_cache_dir
    }

    pub fn project_output_dir(&self) -> &Path {
        &self.project_output_dir
    }

    pub fn database_path(&self, tier: Tier, key: &str) -> PathBuf {
        match tier {
            Tier::Platform | Tier::LanguageCore => self
                .user_cache_dir
                .join(format!("{}.{}", key, DATABASE_EXT)),
            Tier::ProjectDependencies => self
                .project_output_dir
                .join(PROJECT_SUBDIR)
                .join(format!("deps-{}.{}", key, DATABASE_EXT)),
        }
    }
}

/// Delete a database file. Returns `true` if a file was actually removed.
pub fn remove_database(database: &Path) -> Result<bool> {
    if database.exists() {
        fs::remove_file(database).with_context(|| format!("removing {}", database.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
