//! Tier orchestration: reuse, validate or build each database in order
//!
//! For each tier, in dependency order:
//!
//! | database file | `check` on | `check` off |
//! |---------------|------------|-------------|
//! | exists        | Validate   | Skip        |
//! | missing       | Build      | Build       |
//!
//! Validation notices are reported but never trigger a rebuild; the operator
//! removes the stale file (or runs `typegate clean`) to force one. Any engine
//! failure aborts the remaining tiers.

use crate::engine::{AnalysisEngine, EngineError};
use crate::tier::{Tier, TierPlan};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TierError {
    #[error("{tier} database: {source}")]
    Engine {
        tier: Tier,
        #[source]
        source: EngineError,
    },

    #[error("{tier} database: creating {path}: {source}")]
    CreateDir {
        tier: Tier,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierAction {
    Validate,
    Skip,
    Build,
}

impl TierAction {
    /// Existence decides first; the check flag only matters for existing files.
    pub fn decide(exists: bool, check: bool) -> Self {
        match (exists, check) {
            (false, _) => TierAction::Build,
            (true, true) => TierAction::Validate,
            (true, false) => TierAction::Skip,
        }
    }

    pub fn describe(self, tier: Tier) -> String {
        match self {
            TierAction::Validate => format!("Validating {} database", tier),
            TierAction::Skip => format!("Reusing {} database", tier),
            TierAction::Build => format!("Building {} database", tier),
        }
    }
}

/// What happened to one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierOutcome {
    pub tier: Tier,
    pub action: TierAction,
    pub database: PathBuf,
    /// Stale-database notices from validation (empty when consistent)
    pub stale: Vec<String>,
}

impl TierOutcome {
    pub fn is_stale(&self) -> bool {
        !self.stale.is_empty()
    }
}

/// Receives progress for long-running stages
pub trait ProgressSink {
    fn stage_started(&self, _label: &str) {}
    fn stage_finished(&self, _summary: &str) {}
    fn stage_skipped(&self, _message: &str) {}
}

/// A [`ProgressSink`] that discards everything
pub struct Silent;

impl ProgressSink for Silent {}

pub struct TierOrchestrator<'a> {
    engine: &'a dyn AnalysisEngine,
    check: bool,
}

impl<'a> TierOrchestrator<'a> {
    pub fn new(engine: &'a dyn AnalysisEngine, check: bool) -> Self {
        Self { engine, check }
    }

    /// Process every plan in order, stopping at the first failure.
    pub fn run(
        &self,
        plans: &[TierPlan],
        progress: &dyn ProgressSink,
    ) -> Result<Vec<TierOutcome>, TierError> {
        let mut outcomes = Vec::with_capacity(plans.len());
        for plan in plans {
            let action = TierAction::decide(plan.database.exists(), self.check);
            if action == TierAction::Skip {
                progress.stage_skipped(&format!(
                    "{} database present, validation disabled",
                    plan.tier
                ));
            } else {
                progress.stage_started(&action.describe(plan.tier));
            }

            let outcome = self.execute(plan, action)?;

            match outcome.action {
                TierAction::Build => progress.stage_finished(&format!(
                    "{} path(s) -> {}",
                    plan.code_paths.len(),
                    plan.database.display()
                )),
                TierAction::Validate if outcome.is_stale() => progress.stage_finished(&format!(
                    "{} stale notice(s)",
                    outcome.stale.len()
                )),
                TierAction::Validate => progress.stage_finished("up to date"),
                TierAction::Skip => {}
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Carry out one tier's action.
    pub fn execute(&self, plan: &TierPlan, action: TierAction) -> Result<TierOutcome, TierError> {
        let tier = plan.tier;
        debug!(%tier, ?action, database = %plan.database.display(), "tier action");

        let stale = match action {
            TierAction::Skip => Vec::new(),
            TierAction::Validate => self
                .engine
                .check(&plan.database)
                .map_err(|source| TierError::Engine { tier, source })?,
            TierAction::Build => {
                if let Some(parent) = plan.database.parent() {
                    std::fs::create_dir_all(parent).map_err(|source| TierError::CreateDir {
                        tier,
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                self.engine
                    .build(&plan.database, &plan.code_paths, &plan.predecessors)
                    .map_err(|source| TierError::Engine { tier, source })?;
                info!(%tier, database = %plan.database.display(), "built tier database");
                Vec::new()
            }
        };

        Ok(TierOutcome {
            tier,
            action,
            database: plan.database.clone(),
            stale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existence_takes_precedence_over_check_flag() {
        assert_eq!(TierAction::decide(false, true), TierAction::Build);
        assert_eq!(TierAction::decide(false, false), TierAction::Build);
        assert_eq!(TierAction::decide(true, true), TierAction::Validate);
        assert_eq!(TierAction::decide(true, false), TierAction::Skip);
    }
}
