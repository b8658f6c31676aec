//! Remove the databases for the current environment

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use typegate_core::cache::remove_database;
use typegate_core::{HostToolchain, Tier, TierKeys};

use super::Session;

pub fn run(path: Option<&Path>, tier: Option<Tier>) -> Result<()> {
    let session = Session::open(path)?;
    let keys = TierKeys::derive(&session.host.versions()?, &session.host.lock_content()?);

    let tiers: Vec<Tier> = match tier {
        Some(tier) => vec![tier],
        None => Tier::ALL.to_vec(),
    };

    for tier in tiers {
        let database = session.layout.database_path(tier, keys.get(tier));
        if remove_database(&database)? {
            println!(
                "  {} {} database {}",
                "Removed".green(),
                tier,
                database.display().to_string().dimmed()
            );
        } else {
            println!("  {}", format!("No {} database at {}", tier, database.display()).dimmed());
        }
    }

    Ok(())
}
