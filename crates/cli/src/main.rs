//! typegate CLI - layered type analysis

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use typegate_cli::{logging, Cli};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    typegate_cli::run(&cli)
}
