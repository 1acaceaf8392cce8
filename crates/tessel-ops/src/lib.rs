//! # Tessel Ops
//!
//! The standard tessel instruction set: a closed [`Op`] enum implementing
//! [`tessel_core::isa::Instruction`], plus the effect of every variant.
//!
//! ## Conventions
//!
//! - **Operands**: the colour at a template's data cell. Variants without a
//!   data cell receive black.
//! - **Masks**: value-moving variants AND the value with a non-black operand.
//! - **Characters**: a colour prints as the sum of its three channels.
//! - **Data path**: arithmetic, memory and input results land in the wheel
//!   cell under the cursor.
//!
//! ## Example
//!
//! ```rust
//! use tessel_core::isa::Instruction;
//! use tessel_core::{Color, Machine, MachineConfig, PixelGrid};
//! use tessel_ops::{instruction_table, Op};
//!
//! # fn main() -> tessel_core::Result<()> {
//! let blocks = [
//!     Op::StartRight.template().paint(Color::BLACK),
//!     Op::OutputColorChar.template().paint(Color::new(0x41)),
//!     Op::Kill.template().paint(Color::BLACK),
//! ];
//! let grid = PixelGrid::from_blocks(3, 1, &blocks)?;
//!
//! let mut machine = Machine::from_grid(&grid, &instruction_table()?, MachineConfig::default())?;
//! machine.run()?;
//! assert_eq!(machine.output(), "A");
//! # Ok(())
//! # }
//! ```

pub mod arith;
pub mod control;
pub mod io;
pub mod memory;
pub mod op;
pub mod stage;

pub use op::{templates, Op, OpCategory};

use tessel_core::isa::InstructionTable;
use tessel_core::Result;

/// Build the validated table of every [`Op`]
pub fn instruction_table() -> Result<InstructionTable<Op>> {
    InstructionTable::new(Op::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_table_accepts_all_ops() {
        let table = instruction_table().unwrap();
        assert_eq!(table.len(), Op::ALL.len());
        assert_eq!(table.start_variants().count(), 4);
    }
}
