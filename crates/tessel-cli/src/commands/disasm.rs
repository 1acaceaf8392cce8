use anyhow::{Context, Result};
use std::path::Path;
use tessel_core::Program;

use crate::loader;

pub fn run(image: &Path) -> Result<()> {
    let grid = loader::load(image)?;
    let table = tessel_ops::instruction_table()?;
    let program = Program::decode(&grid, &table).with_context(|| format!("failed to decode {}", image.display()))?;

    println!("{}: {}x{} blocks", image.display(), program.width(), program.height());
    println!();
    println!("{}", program.render());
    println!();
    if program.start_points().is_empty() {
        println!("no start points");
    }
    for start in program.start_points() {
        println!("start ({}, {}) heading {}", start.x, start.y, start.direction);
    }
    Ok(())
}
