//! typegate Core - layered type-analysis orchestration
//!
//! This crate provides the machinery behind the `typegate` CLI:
//! - Cache keys and on-disk layout for the platform, language-core and
//!   project-dependency analysis databases
//! - Tier orchestration: reuse, validate or build each database in order
//! - Wildcard ignore patterns and diagnostic classification
//! - Reporting helpers and exit-status rules

pub mod cache;
pub mod classify;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod engine;
pub mod fingerprint;
pub mod host;
pub mod orchestrator;
pub mod pattern;
pub mod report;
pub mod runner;
pub mod term;
pub mod tier;

pub use cache::CacheLayout;
pub use classify::{classify, is_ignored, unused_patterns, ClassifiedResult};
pub use config::TypegateConfig;
pub use diagnostic::{Diagnostic, Location};
pub use engine::{AnalysisEngine, CommandEngine, EngineError};
pub use fingerprint::{EnvironmentVersions, TierKeys};
pub use host::{HostToolchain, ProjectToolchain};
pub use orchestrator::{ProgressSink, Silent, TierAction, TierError, TierOrchestrator, TierOutcome};
pub use pattern::{parse_ignore_list, parse_pattern, Pattern, PatternError};
pub use report::{render_diagnostic, ExitStatus, Summary};
pub use runner::{AnalysisRunner, MissingComponent, RunOptions, RunReport};
pub use term::Term;
pub use tier::{Tier, TierPlan};

/// typegate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
