//! Boundary to the host build tooling
//!
//! The host supplies version identifiers, lockfile content, each tier's code
//! paths and the project output directory, and can recompile the project.
//! typegate never mutates host state beyond asking it to compile.

use crate::config::TypegateConfig;
use crate::discovery::{discover_components, expand_globs, Discovered};
use crate::fingerprint::EnvironmentVersions;
use crate::tier::Tier;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub trait HostToolchain {
    fn versions(&self) -> Result<EnvironmentVersions>;

    /// Resolved dependency lock content; empty when the project has no lockfile.
    fn lock_content(&self) -> Result<Vec<u8>>;

    /// Code paths belonging to `tier`, plus any components that were not found.
    fn code_paths(&self, tier: Tier) -> Result<Discovered>;

    /// The project's own compiled code, analyzed in the final pass.
    fn target_paths(&self) -> Result<Vec<PathBuf>>;

    /// Project-scoped build output directory
    fn output_dir(&self) -> PathBuf;

    /// Recompile the project.
    fn compile(&self) -> Result<()>;
}

/// Host toolchain backed by `.typegate.toml`
pub struct ProjectToolchain {
    root: PathBuf,
    config: TypegateConfig,
}

impl ProjectToolchain {
    pub fn new(root: impl Into<PathBuf>, config: TypegateConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    fn components(&self, lib_dir: Option<&Path>, names: &[String], key: &str) -> Result<Discovered> {
        if names.is_empty() {
            return Ok(Discovered::default());
        }
        let lib_dir = lib_dir
            .with_context(|| format!("environment.{} is not set in .typegate.toml", key))?;
        Ok(discover_components(
            lib_dir,
            names,
            &self.config.environment.code_subdir,
        ))
    }
}

fn required<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        bail!("environment.{} is not set in .typegate.toml", key);
    }
    Ok(value)
}

impl HostToolchain for ProjectToolchain {
    fn versions(&self) -> Result<EnvironmentVersions> {
        let env = &self.config.environment;
        Ok(EnvironmentVersions {
            platform_release: required(&env.platform_release, "platform_release")?.to_string(),
            platform_build: required(&env.platform_build, "platform_build")?.to_string(),
            language_version: required(&env.language_version, "language_version")?.to_string(),
        })
    }

    fn lock_content(&self) -> Result<Vec<u8>> {
        let path = self.root.join(&self.config.project.lockfile);
        if !path.exists() {
            debug!(lockfile = %path.display(), "no lockfile, treating as empty");
            return Ok(Vec::new());
        }
        std::fs::read(&path).with_context(|| format!("reading {}", path.display()))
    }

    fn code_paths(&self, tier: Tier) -> Result<Discovered> {
        let env = &self.config.environment;
        match tier {
            Tier::Platform => self.components(
                env.platform_lib_dir.as_deref(),
                &env.platform_apps,
                "platform_lib_dir",
            ),
            Tier::LanguageCore => self.components(
                env.language_lib_dir.as_deref(),
                &env.language_apps,
                "language_lib_dir",
            ),
            Tier::ProjectDependencies => Ok(Discovered {
                paths: expand_globs(&self.root, &self.config.project.dependency_paths)?,
                missing: Vec::new(),
            }),
        }
    }

    fn target_paths(&self) -> Result<Vec<PathBuf>> {
        expand_globs(&self.root, &self.config.project.target_paths)
    }

    fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.build_dir)
    }

    fn compile(&self) -> Result<()> {
        let (program, args) = match self.config.project.compile_command.split_first() {
            Some(parts) => parts,
            None => bail!("project.compile_command is empty"),
        };
        info!(%program, ?args, "compiling project");
        let status = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .status()
            .with_context(|| format!("running compile command `{}`", program))?;
        if !status.success() {
            bail!("compile command `{}` failed ({})", program, status);
        }
        Ok(())
    }
}
