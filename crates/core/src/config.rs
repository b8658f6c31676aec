//! Configuration file parsing for .typegate.toml

use crate::pattern::{parse_ignore_list, parse_pattern, Pattern};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".typegate.toml";

/// Main configuration structure for .typegate.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypegateConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine executable
    #[serde(default = "default_engine_command")]
    pub command: String,

    /// Arguments placed before the operation name
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Platform runtime release identifier
    #[serde(default)]
    pub platform_release: String,

    /// Platform runtime internal build/version string
    #[serde(default)]
    pub platform_build: String,

    /// Host language version
    #[serde(default)]
    pub language_version: String,

    /// Directory holding the platform's library components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_lib_dir: Option<PathBuf>,

    /// Platform components included in the platform tier
    #[serde(default = "default_platform_apps")]
    pub platform_apps: Vec<String>,

    /// Directory holding the language's standard library components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_lib_dir: Option<PathBuf>,

    /// Language components included in the language-core tier
    #[serde(default = "default_language_apps")]
    pub language_apps: Vec<String>,

    /// Subdirectory of each component holding compiled code
    #[serde(default = "default_code_subdir")]
    pub code_subdir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Resolved dependency lockfile, relative to the project root
    #[serde(default = "default_lockfile")]
    pub lockfile: String,

    /// Build output directory; the dependencies database lives under it
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Glob patterns for compiled dependency code
    #[serde(default = "default_dependency_paths")]
    pub dependency_paths: Vec<String>,

    /// Glob patterns for the project's own compiled code
    #[serde(default)]
    pub target_paths: Vec<String>,

    /// Command that recompiles the project
    #[serde(default = "default_compile_command")]
    pub compile_command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Validate existing tier databases
    #[serde(default = "default_true")]
    pub check: bool,

    /// Recompile before analysis
    #[serde(default = "default_true")]
    pub compile: bool,

    /// Warning categories passed to the engine
    #[serde(default)]
    pub warnings: Vec<String>,

    /// File of ignore patterns, one per line
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Inline ignore patterns
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Overrides the user cache directory for shared databases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: terminal, short or json
    #[serde(default = "default_format")]
    pub format: String,

    /// Enable color output
    #[serde(default = "default_true")]
    pub color: bool,
}

// Default functions
fn default_engine_command() -> String {
    "typegate-engine".to_string()
}

fn default_platform_apps() -> Vec<String> {
    ["erts", "kernel", "stdlib", "crypto"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_language_apps() -> Vec<String> {
    vec!["elixir".to_string()]
}

fn default_code_subdir() -> String {
    "ebin".to_string()
}

fn default_lockfile() -> String {
    "mix.lock".to_string()
}

fn default_build_dir() -> String {
    "_build/dev".to_string()
}

fn default_dependency_paths() -> Vec<String> {
    vec!["_build/dev/lib/*/ebin".to_string()]
}

fn default_compile_command() -> Vec<String> {
    vec!["mix".to_string(), "compile".to_string()]
}

fn default_ignore_file() -> String {
    ".typegate_ignore".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> String {
    "terminal".to_string()
}

impl Default for TypegateConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            environment: EnvironmentConfig::default(),
            project: ProjectConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            args: Vec::new(),
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            platform_release: String::new(),
            platform_build: String::new(),
            language_version: String::new(),
            platform_lib_dir: None,
            platform_apps: default_platform_apps(),
            language_lib_dir: None,
            language_apps: default_language_apps(),
            code_subdir: default_code_subdir(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            lockfile: default_lockfile(),
            build_dir: default_build_dir(),
            dependency_paths: default_dependency_paths(),
            target_paths: Vec::new(),
            compile_command: default_compile_command(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            check: true,
            compile: true,
            warnings: Vec::new(),
            ignore_file: default_ignore_file(),
            ignore: Vec::new(),
            cache_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

impl TypegateConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: TypegateConfig =
            toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Find .typegate.toml in `start_dir` or its ancestors.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|path| path.exists())
    }

    /// Find and load .typegate.toml from the current directory or ancestors
    pub fn find_and_load(start_dir: &Path) -> Result<Self> {
        match Self::find(start_dir) {
            Some(path) => {
                tracing::debug!(config = %path.display(), "loading configuration");
                Self::from_file(&path)
            }
            // No config found, use defaults
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Inline patterns followed by those in the ignore file, if it exists.
    pub fn ignore_patterns(&self, project_root: &Path) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();
        for (idx, src) in self.analysis.ignore.iter().enumerate() {
            let pattern = parse_pattern(src)
                .with_context(|| format!("analysis.ignore[{}]: invalid pattern '{}'", idx, src))?;
            patterns.push(pattern);
        }

        let ignore_file = project_root.join(&self.analysis.ignore_file);
        if ignore_file.is_file() {
            let content = std::fs::read_to_string(&ignore_file)
                .with_context(|| format!("reading {}", ignore_file.display()))?;
            let from_file = parse_ignore_list(&content)
                .with_context(|| format!("parsing {}", ignore_file.display()))?;
            patterns.extend(from_file);
        }

        Ok(patterns)
    }
}
