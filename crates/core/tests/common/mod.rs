//! Shared fakes for the engine and host boundaries

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use typegate_core::discovery::Discovered;
use typegate_core::{
    AnalysisEngine, CacheLayout, Diagnostic, EngineError, EnvironmentVersions, HostToolchain, Tier,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Build {
        output: PathBuf,
        inputs: Vec<PathBuf>,
        predecessors: Vec<PathBuf>,
    },
    Check(PathBuf),
    Analyze {
        databases: Vec<PathBuf>,
        targets: Vec<PathBuf>,
        warnings: Vec<String>,
    },
}

/// Records every call; `build` writes an empty database file.
#[derive(Default)]
pub struct FakeEngine {
    pub calls: RefCell<Vec<Call>>,
    pub stale: HashMap<PathBuf, Vec<String>>,
    pub fail_build_containing: Option<String>,
    pub fail_check_containing: Option<String>,
    pub fail_analyze: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl FakeEngine {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn failure(operation: &'static str) -> EngineError {
        EngineError::Failed {
            operation,
            status: "exit status: 1".to_string(),
            stderr: "engine crashed".to_string(),
        }
    }
}

impl AnalysisEngine for FakeEngine {
    fn build(
        &self,
        output: &Path,
        inputs: &[PathBuf],
        predecessors: &[PathBuf],
    ) -> Result<(), EngineError> {
        self.calls.borrow_mut().push(Call::Build {
            output: output.to_path_buf(),
            inputs: inputs.to_vec(),
            predecessors: predecessors.to_vec(),
        });
        if let Some(needle) = &self.fail_build_containing {
            if output.to_string_lossy().contains(needle.as_str()) {
                return Err(Self::failure("build"));
            }
        }
        std::fs::write(output, b"db").expect("write fake database");
        Ok(())
    }

    fn check(&self, database: &Path) -> Result<Vec<String>, EngineError> {
        self.calls
            .borrow_mut()
            .push(Call::Check(database.to_path_buf()));
        if let Some(needle) = &self.fail_check_containing {
            if database.to_string_lossy().contains(needle.as_str()) {
                return Err(Self::failure("check"));
            }
        }
        Ok(self.stale.get(database).cloned().unwrap_or_default())
    }

    fn analyze(
        &self,
        databases: &[PathBuf],
        targets: &[PathBuf],
        warnings: &[String],
    ) -> Result<Vec<Diagnostic>, EngineError> {
        self.calls.borrow_mut().push(Call::Analyze {
            databases: databases.to_vec(),
            targets: targets.to_vec(),
            warnings: warnings.to_vec(),
        });
        if self.fail_analyze {
            return Err(Self::failure("analyze"));
        }
        Ok(self.diagnostics.clone())
    }
}

pub struct FakeHost {
    pub versions: EnvironmentVersions,
    pub lock: Vec<u8>,
    pub paths: HashMap<Tier, Discovered>,
    pub targets: Vec<PathBuf>,
    pub output: PathBuf,
    pub compiled: Cell<u32>,
}

impl FakeHost {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        let mut paths = HashMap::new();
        for tier in Tier::ALL {
            paths.insert(
                tier,
                Discovered {
                    paths: vec![PathBuf::from(format!("/code/{}", tier.short_name()))],
                    missing: Vec::new(),
                },
            );
        }
        Self {
            versions: versions(),
            lock: b"%{\"jason\": 1}".to_vec(),
            paths,
            targets: vec![PathBuf::from("/project/ebin")],
            output: output.into(),
            compiled: Cell::new(0),
        }
    }
}

impl HostToolchain for FakeHost {
    fn versions(&self) -> anyhow::Result<EnvironmentVersions> {
        Ok(self.versions.clone())
    }

    fn lock_content(&self) -> anyhow::Result<Vec<u8>> {
        Ok(self.lock.clone())
    }

    fn code_paths(&self, tier: Tier) -> anyhow::Result<Discovered> {
        Ok(self.paths.get(&tier).cloned().unwrap_or_default())
    }

    fn target_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        Ok(self.targets.clone())
    }

    fn output_dir(&self) -> PathBuf {
        self.output.clone()
    }

    fn compile(&self) -> anyhow::Result<()> {
        self.compiled.set(self.compiled.get() + 1);
        Ok(())
    }
}

pub fn versions() -> EnvironmentVersions {
    EnvironmentVersions {
        platform_release: "26".to_string(),
        platform_build: "14.2".to_string(),
        language_version: "1.16.0".to_string(),
    }
}

pub fn layout(root: &Path) -> CacheLayout {
    CacheLayout::new(root.join("user-cache"), root.join("_build"))
}
