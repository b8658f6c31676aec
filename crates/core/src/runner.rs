//! Analysis runner: compile, prepare the tiers, then analyze and classify

use crate::cache::CacheLayout;
use crate::classify::{classify, unused_patterns, ClassifiedResult};
use crate::engine::AnalysisEngine;
use crate::fingerprint::TierKeys;
use crate::host::HostToolchain;
use crate::orchestrator::{ProgressSink, TierOrchestrator, TierOutcome};
use crate::pattern::Pattern;
use crate::report::ExitStatus;
use crate::tier::{Tier, TierPlan};
use anyhow::{bail, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Validate existing tier databases
    pub check: bool,
    /// Ask the host to recompile first
    pub compile: bool,
    /// Run the analyze pass after the tiers are ready
    pub analyze: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            check: true,
            compile: true,
            analyze: true,
        }
    }
}

/// A tier component that could not be located
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingComponent {
    pub tier: Tier,
    pub name: String,
}

/// Everything a run produced, reported in bulk at the end
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub tiers: Vec<TierOutcome>,
    pub missing: Vec<MissingComponent>,
    /// `None` when the analyze pass was not requested
    pub result: Option<ClassifiedResult>,
    pub unused_patterns: Vec<Pattern>,
}

impl RunReport {
    pub fn stale_tiers(&self) -> impl Iterator<Item = &TierOutcome> {
        self.tiers.iter().filter(|t| t.is_stale())
    }

    pub fn exit_status(&self) -> ExitStatus {
        self.result
            .as_ref()
            .map(ExitStatus::for_result)
            .unwrap_or_default()
    }
}

pub struct AnalysisRunner<'a> {
    engine: &'a dyn AnalysisEngine,
    host: &'a dyn HostToolchain,
    layout: CacheLayout,
    patterns: Vec<Pattern>,
    warnings: Vec<String>,
}

impl<'a> AnalysisRunner<'a> {
    pub fn new(
        engine: &'a dyn AnalysisEngine,
        host: &'a dyn HostToolchain,
        layout: CacheLayout,
    ) -> Self {
        Self {
            engine,
            host,
            layout,
            patterns: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_patterns(mut self, patterns: Vec<Pattern>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Derive keys and resolve the three tier plans.
    pub fn plan(&self) -> Result<(Vec<TierPlan>, Vec<MissingComponent>)> {
        let versions = self.host.versions()?;
        let lock = self.host.lock_content()?;
        let keys = TierKeys::derive(&versions, &lock);

        let mut missing = Vec::new();
        let plans = TierPlan::chain(&self.layout, &keys, |tier| {
            let discovered = self.host.code_paths(tier)?;
            missing.extend(
                discovered
                    .missing
                    .into_iter()
                    .map(|name| MissingComponent { tier, name }),
            );
            Ok(discovered.paths)
        })?;
        Ok((plans, missing))
    }

    pub fn run(&self, options: RunOptions, progress: &dyn ProgressSink) -> Result<RunReport> {
        if options.compile {
            progress.stage_started("Compiling project");
            self.host.compile()?;
            progress.stage_finished("compiled");
        }

        let (plans, missing) = self.plan()?;
        let orchestrator = TierOrchestrator::new(self.engine, options.check);
        let tiers = orchestrator.run(&plans, progress)?;

        let mut report = RunReport {
            tiers,
            missing,
            ..Default::default()
        };
        if !options.analyze {
            return Ok(report);
        }

        let targets = self.host.target_paths()?;
        if targets.is_empty() {
            bail!("no analysis targets found; set project.target_paths in .typegate.toml");
        }

        progress.stage_started("Running type analysis");
        let databases: Vec<PathBuf> = plans.iter().map(|p| p.database.clone()).collect();
        let diagnostics = self.engine.analyze(&databases, &targets, &self.warnings)?;
        progress.stage_finished(&format!(
            "{} target path(s), {} diagnostic(s)",
            targets.len(),
            diagnostics.len()
        ));

        report.unused_patterns = unused_patterns(&diagnostics, &self.patterns)
            .into_iter()
            .cloned()
            .collect();
        report.result = Some(classify(diagnostics, &self.patterns));
        Ok(report)
    }
}
