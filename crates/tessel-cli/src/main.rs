use anyhow::{Context, Result};
use clap::Parser;
use tessel_tracing::TracingConfig;

mod cli;
mod commands;
mod loader;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tracing = TracingConfig::from_env().with_verbosity(cli.verbose);
    tessel_tracing::init_global_tracing(&tracing).context("failed to initialize logging")?;

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Disasm { image } => commands::disasm::run(&image),
        Commands::Ops => commands::ops::run(),
    }
}
