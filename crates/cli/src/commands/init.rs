//! Initialize .typegate.toml configuration

use anyhow::Result;
use std::path::Path;
use typegate_core::config::CONFIG_FILE;
use typegate_core::TypegateConfig;

pub fn run(path: Option<&Path>) -> Result<()> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILE, config_path);
        return Ok(());
    }

    let config = TypegateConfig::default();
    config.save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILE, config_path);
    println!("\nSet the [environment] versions and library paths, then run:");
    println!("  typegate");

    Ok(())
}
