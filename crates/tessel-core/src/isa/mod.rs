//! Instruction set plumbing
//!
//! The core does not define any concrete opcode. It defines what an opcode is
//! and how a closed set of them is registered and looked up:
//!
//! - **Templates**: 3×3 filled/empty layouts with an optional data cell
//! - **Instruction contract**: the [`Instruction`] trait every variant implements
//! - **Instruction table**: the validated registry used by the decoder

mod instruction;
mod table;
mod template;

pub use instruction::Instruction;
pub use table::InstructionTable;
pub use template::{Cell, Pattern, Template, PATTERN_SIZE, PATTERN_TILES};
