mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let exit_code = commands::run(cli)?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
