use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tessel_core::EdgePolicy;

#[derive(Parser)]
#[command(name = "tessel")]
#[command(author, version, about = "Run programs written as images")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv per-instruction debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode and execute a program image
    Run(RunArgs),

    /// Print the decoded instruction grid and start points
    Disasm {
        /// Program image (PNG, GIF or BMP)
        image: PathBuf,
    },

    /// List the instruction set with templates
    Ops,
}

#[derive(Args)]
pub struct RunArgs {
    /// Program image (PNG, GIF or BMP)
    pub image: PathBuf,

    /// Input stream contents
    #[arg(short, long, env = "TESSEL_INPUT")]
    pub input: Option<String>,

    /// Stop after this many cycles
    #[arg(long, env = "TESSEL_MAX_CYCLES")]
    pub max_cycles: Option<u64>,

    /// Behaviour for threads that leave the grid: halt, wrap or fault
    #[arg(long, env = "TESSEL_EDGE_POLICY")]
    pub edge: Option<EdgePolicy>,

    /// Print a JSON snapshot of the machine to stderr after the run
    #[arg(long)]
    pub snapshot: bool,
}
