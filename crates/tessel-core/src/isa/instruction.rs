//! The contract every instruction variant satisfies

use super::template::Template;
use crate::color::Color;
use crate::error::Result;
use crate::machine::ExecContext;
use crate::thread::Direction;
use std::fmt;

/// An instruction variant of a closed instruction set
///
/// Instruction libraries implement this trait on a `Copy` enum and register
/// every variant in an [`InstructionTable`](super::InstructionTable). The core
/// never discovers variants on its own.
///
/// # Execution contract
///
/// - `run` receives the executing thread and the machine-shared state through
///   an [`ExecContext`]. It may change registers, the memory wheel, global
///   memory, input and output, and may request forks.
/// - After `run` returns, the scheduler moves the thread one block forward
///   unless [`advances`](Instruction::advances) returns `false`.
/// - Errors returned from `run` stop the machine; they are never swallowed.
///
/// # Example
///
/// ```rust
/// use tessel_core::isa::{Instruction, Template};
/// use tessel_core::{Color, Direction, ExecContext, Result};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Tiny {
///     Start,
///     Halt,
/// }
///
/// impl Instruction for Tiny {
///     fn mnemonic(&self) -> &'static str {
///         match self {
///             Tiny::Start => "START",
///             Tiny::Halt => "HALT",
///         }
///     }
///
///     fn template(&self) -> Template {
///         match self {
///             Tiny::Start => Template::parse(["...", ".#.", "..."]),
///             Tiny::Halt => Template::parse(["###", "###", "###"]),
///         }
///     }
///
///     fn start_direction(&self) -> Option<Direction> {
///         matches!(self, Tiny::Start).then_some(Direction::Right)
///     }
///
///     fn run(&self, ctx: &mut ExecContext<'_>, _operand: Color) -> Result<()> {
///         if let Tiny::Halt = self {
///             ctx.thread_mut().kill();
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Instruction: Copy + PartialEq + fmt::Debug + 'static {
    /// Short display name used in logs and disassembly
    fn mnemonic(&self) -> &'static str;

    /// The 3×3 layout identifying this variant
    fn template(&self) -> Template;

    /// Initial direction for start-point variants, `None` for everything else
    fn start_direction(&self) -> Option<Direction> {
        None
    }

    /// Whether the scheduler moves the thread forward after `run`
    fn advances(&self) -> bool {
        true
    }

    /// Apply the instruction's effect
    fn run(&self, ctx: &mut ExecContext<'_>, operand: Color) -> Result<()>;
}
