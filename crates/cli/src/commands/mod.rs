//! CLI commands

pub mod check;
pub mod clean;
pub mod init;
pub mod plt;

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::debug;
use typegate_core::{
    AnalysisRunner, CacheLayout, CommandEngine, HostToolchain, Pattern, ProjectToolchain,
    RunOptions, TypegateConfig,
};

use crate::{Cli, OutputFormat};

/// Everything a command needs for one project
pub struct Session {
    pub root: PathBuf,
    pub config: TypegateConfig,
    pub layout: CacheLayout,
    pub host: ProjectToolchain,
    pub engine: CommandEngine,
}

impl Session {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let root = path.unwrap_or_else(|| Path::new("."));
        let root = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());

        let config = TypegateConfig::find_and_load(&root)?;
        if !config.output.color {
            colored::control::set_override(false);
        }

        let user_cache_dir = match &config.analysis.cache_dir {
            Some(dir) => root.join(dir),
            None => CacheLayout::default_user_cache_dir()?,
        };
        let host = ProjectToolchain::new(root.clone(), config.clone());
        let layout = CacheLayout::new(user_cache_dir, host.output_dir());
        let engine = CommandEngine::new(config.engine.command.clone(), config.engine.args.clone());
        debug!(
            root = %root.display(),
            user_cache = %layout.user_cache_dir().display(),
            project_output = %layout.project_output_dir().display(),
            "session opened"
        );

        Ok(Self {
            root,
            config,
            layout,
            host,
            engine,
        })
    }

    pub fn runner(&self, patterns: Vec<Pattern>) -> AnalysisRunner<'_> {
        AnalysisRunner::new(&self.engine, &self.host, self.layout.clone())
            .with_patterns(patterns)
            .with_warnings(self.config.analysis.warnings.clone())
    }

    /// Config values, overridden by command-line flags.
    pub fn run_options(&self, cli: &Cli, analyze: bool) -> RunOptions {
        RunOptions {
            check: self.config.analysis.check && !cli.no_check,
            compile: self.config.analysis.compile && !cli.no_compile,
            analyze,
        }
    }
}

pub fn resolve_format(cli: Option<OutputFormat>, config: &TypegateConfig) -> Result<OutputFormat> {
    if let Some(format) = cli {
        return Ok(format);
    }
    match OutputFormat::from_str(&config.output.format, true) {
        Ok(format) => Ok(format),
        Err(_) => bail!(
            "unknown output.format '{}' in .typegate.toml (expected terminal, short or json)",
            config.output.format
        ),
    }
}
