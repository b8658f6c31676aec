//! Analysis tiers and their build plans

use crate::cache::CacheLayout;
use crate::fingerprint::TierKeys;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One layer of the analysis database stack, in dependency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The platform runtime's own libraries
    Platform,
    /// The host language's standard library
    LanguageCore,
    /// The project's resolved third-party dependencies
    ProjectDependencies,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Platform, Tier::LanguageCore, Tier::ProjectDependencies];

    /// Tiers whose databases seed this tier's build.
    pub fn predecessors(self) -> &'static [Tier] {
        match self {
            Tier::Platform => &[],
            Tier::LanguageCore => &[Tier::Platform],
            Tier::ProjectDependencies => &[Tier::Platform, Tier::LanguageCore],
        }
    }

    /// Short name used on the command line
    pub fn short_name(self) -> &'static str {
        match self {
            Tier::Platform => "platform",
            Tier::LanguageCore => "language",
            Tier::ProjectDependencies => "deps",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Platform => write!(f, "platform"),
            Tier::LanguageCore => write!(f, "language core"),
            Tier::ProjectDependencies => write!(f, "project dependencies"),
        }
    }
}

/// Everything needed to build or validate one tier's database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPlan {
    pub tier: Tier,
    pub key: String,
    pub database: PathBuf,
    pub code_paths: Vec<PathBuf>,
    /// Databases of earlier tiers, used read-only as build inputs
    pub predecessors: Vec<PathBuf>,
}

impl TierPlan {
    /// Plan all three tiers in dependency order.
    ///
    /// `code_paths` is called once per tier, in order.
    pub fn chain<F>(layout: &CacheLayout, keys: &TierKeys, mut code_paths: F) -> Result<Vec<TierPlan>>
    where
        F: FnMut(Tier) -> Result<Vec<PathBuf>>,
    {
        let mut plans = Vec::with_capacity(Tier::ALL.len());
        for tier in Tier::ALL {
            let predecessors = tier
                .predecessors()
                .iter()
                .map(|t| layout.database_path(*t, keys.get(*t)))
                .collect();
            plans.push(TierPlan {
                tier,
                key: keys.get(tier).to_string(),
                database: layout.database_path(tier, keys.get(tier)),
                code_paths: code_paths(tier)?,
                predecessors,
            });
        }
        Ok(plans)
    }
}
