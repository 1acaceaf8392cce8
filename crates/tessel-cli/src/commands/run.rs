use anyhow::{Context, Result};
use std::io::Write;
use tessel_core::{Machine, MachineConfig, RunOutcome};

use crate::cli::RunArgs;
use crate::loader;

pub fn run(args: RunArgs) -> Result<()> {
    let config = config_from(&args);
    let grid = loader::load(&args.image)?;
    let table = tessel_ops::instruction_table()?;

    let name = args
        .image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string());
    let mut machine = Machine::from_grid(&grid, &table, config)
        .with_context(|| format!("failed to decode {}", args.image.display()))?
        .with_name(name);

    let (outcome, duration_us) = tessel_tracing::timed!("run", { machine.run_bounded() });
    let result = outcome.with_context(|| format!("{} stopped with an error", args.image.display()));

    // Whatever was printed before a failure is still program output
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(machine.output().as_bytes())?;
    stdout.flush()?;

    if args.snapshot {
        let json = serde_json::to_string_pretty(&machine.snapshot())?;
        eprintln!("{json}");
    }

    match result? {
        RunOutcome::Halted { cycles } => {
            tracing::info!(cycles, duration_us, "program halted");
        }
        RunOutcome::CycleLimit { cycles } => {
            tracing::warn!(cycles, threads = machine.thread_count(), "stopped at cycle limit");
        }
    }
    Ok(())
}

/// Environment defaults come through clap's `env` attributes, flags win
fn config_from(args: &RunArgs) -> MachineConfig {
    let mut config = MachineConfig::default();
    if let Some(input) = &args.input {
        config = config.with_input(input.clone());
    }
    if let Some(max_cycles) = args.max_cycles {
        config = config.with_max_cycles(max_cycles);
    }
    if let Some(edge) = args.edge {
        config = config.with_edge_policy(edge);
    }
    config
}
