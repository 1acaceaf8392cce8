//! # Tessel Core
//!
//! Interpreter engine for tessel, a two-dimensional language whose programs are
//! raster images. Every 3×3 pixel block is one instruction; cooperating cursors
//! ("threads") walk the block grid executing whatever they stand on.
//!
//! ## Architecture
//!
//! ```text
//! PixelGrid ──decode──► Program ──► Machine ──step──► threads ──run──► Instruction
//!                ▲                     │                                   │
//!         InstructionTable             └──────── SharedState ◄─────────────┘
//!                                     (memory, input, output, forks)
//! ```
//!
//! The core defines no opcodes. An instruction library implements
//! [`isa::Instruction`] on a closed enum and registers its variants in an
//! [`isa::InstructionTable`], which is passed explicitly to the decoder.
//!
//! ## Example
//!
//! ```rust
//! use tessel_core::isa::{Instruction, InstructionTable, Template};
//! use tessel_core::{Color, Direction, ExecContext, Machine, MachineConfig, PixelGrid, Result};
//!
//! #[derive(Debug, Clone, Copy, PartialEq)]
//! enum Op {
//!     Start,
//!     Say,
//!     Stop,
//! }
//!
//! impl Instruction for Op {
//!     fn mnemonic(&self) -> &'static str {
//!         match self {
//!             Op::Start => "START",
//!             Op::Say => "SAY",
//!             Op::Stop => "STOP",
//!         }
//!     }
//!
//!     fn template(&self) -> Template {
//!         match self {
//!             Op::Start => Template::parse(["###", "...", "###"]),
//!             Op::Say => Template::parse(["...", ".@.", "..."]),
//!             Op::Stop => Template::parse(["###", "###", "###"]),
//!         }
//!     }
//!
//!     fn start_direction(&self) -> Option<Direction> {
//!         matches!(self, Op::Start).then_some(Direction::Right)
//!     }
//!
//!     fn run(&self, ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
//!         match self {
//!             Op::Start => {}
//!             Op::Say => ctx.write_output(&char::from(operand.blue()).to_string()),
//!             Op::Stop => ctx.thread_mut().kill(),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let table = InstructionTable::new([Op::Start, Op::Say, Op::Stop])?;
//! let blocks = [
//!     Op::Start.template().paint(Color::BLACK),
//!     Op::Say.template().paint(Color::new(0x41)),
//!     Op::Stop.template().paint(Color::BLACK),
//! ];
//! let grid = PixelGrid::from_blocks(3, 1, &blocks)?;
//!
//! let mut machine = Machine::from_grid(&grid, &table, MachineConfig::default())?;
//! machine.run()?;
//! assert_eq!(machine.output(), "A");
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod decoder;
pub mod error;
pub mod isa;
pub mod machine;
pub mod thread;
pub mod wheel;

pub use color::Color;
pub use decoder::{decode, Decoded, PixelGrid, Program, StartPoint};
pub use error::{Error, Result};
pub use machine::{
    EdgePolicy, ExecContext, Machine, MachineConfig, MachineSnapshot, MemoryKey, RunOutcome, SharedState,
    ThreadSnapshot,
};
pub use thread::{Direction, Thread, ThreadId, ThreadState, Turn};
pub use wheel::MemoryWheel;
