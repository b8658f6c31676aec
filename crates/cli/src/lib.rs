//! typegate CLI library: exposed for integration tests

pub mod commands;
pub mod logging;
pub mod output;
pub mod progress;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use typegate_core::Tier;

#[derive(Parser)]
#[command(name = "typegate")]
#[command(about = "Layered type analysis with cached platform, language and dependency databases", long_about = None)]
#[command(version = typegate_core::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Reuse existing databases without validating them
    #[arg(long, global = true)]
    pub no_check: bool,

    /// Skip recompiling the project before analysis
    #[arg(long, global = true)]
    pub no_compile: bool,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Report warnings but always exit 0
    #[arg(long, global = true)]
    pub ignore_exit_status: bool,

    /// Print ignore patterns that matched no warning
    #[arg(long, global = true)]
    pub list_unused_patterns: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare the tier databases and analyze the project (default command)
    Check {
        /// Path to project (default: current directory)
        path: Option<PathBuf>,
    },

    /// Build or validate the tier databases without analyzing
    Plt {
        /// Path to project (default: current directory)
        path: Option<PathBuf>,
    },

    /// Remove the current databases for all tiers or one tier
    Clean {
        /// Path to project (default: current directory)
        path: Option<PathBuf>,

        /// Only remove this tier's database
        #[arg(long, value_enum)]
        tier: Option<TierArg>,
    },

    /// Initialize .typegate.toml configuration
    Init {
        /// Path to initialize (default: current directory)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Short,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TierArg {
    Platform,
    Language,
    Deps,
}

impl From<TierArg> for Tier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Platform => Tier::Platform,
            TierArg::Language => Tier::LanguageCore,
            TierArg::Deps => Tier::ProjectDependencies,
        }
    }
}

/// Dispatch the parsed command line.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Some(Commands::Check { path }) => commands::check::run(path.as_deref(), cli),
        Some(Commands::Plt { path }) => commands::plt::run(path.as_deref(), cli),
        Some(Commands::Clean { path, tier }) => {
            commands::clean::run(path.as_deref(), tier.map(Tier::from))?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Init { path }) => {
            commands::init::run(path.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        // Default command is check with current directory
        None => commands::check::run(None, cli),
    }
}
