//! The tessel instruction set
//!
//! Complete instruction set including:
//! - Control (starts, KILL, turns, forks, PAUSE, WARP, BZ)
//! - Staging (STAGE*, SWAP*, SHIFT*, PUSH*)
//! - Arithmetic and bitwise (ADD, SUB, MUL, DIV, MOD, AND, OR, XOR)
//! - Global memory (STORE, LOAD, STORE_HERE, LOAD_HERE)
//! - I/O (OUT_*, IN_*)
//!
//! Templates below use `.` for white cells, `#` for filled cells and `@` for
//! the filled cell that carries the operand.

use crate::{arith, control, io, memory, stage};
use std::fmt;
use tessel_core::isa::{Instruction, Template};
use tessel_core::{Color, Direction, ExecContext, Result, Turn};

/// Every instruction of the tessel language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    // ============================================================================================
    // Control
    // ============================================================================================
    /// Empty block: no effect
    Nop,

    /// Start point heading up
    StartUp,

    /// Start point heading right
    StartRight,

    /// Start point heading down
    StartDown,

    /// Start point heading left
    StartLeft,

    /// End the thread
    Kill,

    TurnLeft,

    TurnRight,

    Reverse,

    /// Fork a copy that turns left; it joins before the parent
    ForkLeft,

    /// Fork a copy that turns right; it joins after the parent
    ForkRight,

    /// Skip the next `max(operand, 1)` cycles
    Pause,

    /// Jump by (red, green) read as signed bytes, without the forward move
    Warp,

    /// Turn right if the wheel cell is zero
    BranchZero,

    // ============================================================================================
    // Staging
    // ============================================================================================
    /// stage_1 = wheel & mask
    Stage1,

    /// stage_2 = wheel & mask
    Stage2,

    /// stage_1 = operand
    Stage1Color,

    /// stage_2 = operand
    Stage2Color,

    /// Swap stage_1 with the wheel cell
    SwapMemStage,

    /// Swap stage_1 and stage_2
    SwapStages,

    /// stage_2 = stage_1, stage_1 = wheel
    ShiftPush,

    /// Like `ShiftPush`, then move the wheel `operand + 1` cells left
    ShiftStageLeft,

    /// Like `ShiftPush`, then move the wheel `operand + 1` cells right
    ShiftStageRight,

    /// wheel = stage_1 & mask
    Stage1Push,

    /// wheel = stage_2 & mask
    Stage2Push,

    // ============================================================================================
    // Arithmetic and bitwise: wheel = stage_1 <op> stage_2
    // ============================================================================================
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,

    // ============================================================================================
    // Global memory
    // ============================================================================================
    /// memory[stage_1] = wheel
    Store,

    /// wheel = memory[stage_1]
    Load,

    /// memory[current block] = wheel
    StoreHere,

    /// wheel = memory[current block]
    LoadHere,

    // ============================================================================================
    // I/O
    // ============================================================================================
    /// Write the wheel cell (masked) as a character
    OutputMemChar,

    /// Write the wheel cell (masked) as a decimal number
    OutputMemInt,

    /// Write the wheel cell (masked) in hexadecimal
    OutputMemHex,

    /// Write the operand as a character
    OutputColorChar,

    /// Write the operand as a decimal number
    OutputColorNumber,

    /// Write the operand in hexadecimal
    OutputColorHex,

    /// Read a decimal number into the wheel
    InputNumber,

    /// Read one character into the wheel (-1 once input is exhausted)
    InputChar,
}

impl Op {
    /// Every variant, in registration order
    pub const ALL: [Op; 45] = [
        Op::Nop,
        Op::StartUp,
        Op::StartRight,
        Op::StartDown,
        Op::StartLeft,
        Op::Kill,
        Op::TurnLeft,
        Op::TurnRight,
        Op::Reverse,
        Op::ForkLeft,
        Op::ForkRight,
        Op::Pause,
        Op::Warp,
        Op::BranchZero,
        Op::Stage1,
        Op::Stage2,
        Op::Stage1Color,
        Op::Stage2Color,
        Op::SwapMemStage,
        Op::SwapStages,
        Op::ShiftPush,
        Op::ShiftStageLeft,
        Op::ShiftStageRight,
        Op::Stage1Push,
        Op::Stage2Push,
        Op::Add,
        Op::Sub,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::And,
        Op::Or,
        Op::Xor,
        Op::Store,
        Op::Load,
        Op::StoreHere,
        Op::LoadHere,
        Op::OutputMemChar,
        Op::OutputMemInt,
        Op::OutputMemHex,
        Op::OutputColorChar,
        Op::OutputColorNumber,
        Op::OutputColorHex,
        Op::InputNumber,
        Op::InputChar,
    ];

    /// Get the category of this instruction
    pub fn category(&self) -> OpCategory {
        match self {
            Op::Nop
            | Op::StartUp
            | Op::StartRight
            | Op::StartDown
            | Op::StartLeft
            | Op::Kill
            | Op::TurnLeft
            | Op::TurnRight
            | Op::Reverse
            | Op::ForkLeft
            | Op::ForkRight
            | Op::Pause
            | Op::Warp
            | Op::BranchZero => OpCategory::Control,

            Op::Stage1
            | Op::Stage2
            | Op::Stage1Color
            | Op::Stage2Color
            | Op::SwapMemStage
            | Op::SwapStages
            | Op::ShiftPush
            | Op::ShiftStageLeft
            | Op::ShiftStageRight
            | Op::Stage1Push
            | Op::Stage2Push => OpCategory::Staging,

            Op::Add | Op::Sub | Op::Mul | Op::Div | Op::Mod => OpCategory::Arithmetic,

            Op::And | Op::Or | Op::Xor => OpCategory::Bitwise,

            Op::Store | Op::Load | Op::StoreHere | Op::LoadHere => OpCategory::Memory,

            Op::OutputMemChar
            | Op::OutputMemInt
            | Op::OutputMemHex
            | Op::OutputColorChar
            | Op::OutputColorNumber
            | Op::OutputColorHex => OpCategory::Output,

            Op::InputNumber | Op::InputChar => OpCategory::Input,
        }
    }

    /// Does this instruction read its operand?
    pub fn uses_operand(&self) -> bool {
        self.template().data_cell().is_some()
    }

    /// Can this instruction change where the thread goes next?
    pub fn is_control_flow(&self) -> bool {
        matches!(
            self,
            Op::Kill
                | Op::TurnLeft
                | Op::TurnRight
                | Op::Reverse
                | Op::ForkLeft
                | Op::ForkRight
                | Op::Pause
                | Op::Warp
                | Op::BranchZero
        )
    }
}

impl Instruction for Op {
    fn mnemonic(&self) -> &'static str {
        match self {
            Op::Nop => "NOP",
            Op::StartUp => "START_UP",
            Op::StartRight => "START_RIGHT",
            Op::StartDown => "START_DOWN",
            Op::StartLeft => "START_LEFT",
            Op::Kill => "KILL",
            Op::TurnLeft => "TURN_LEFT",
            Op::TurnRight => "TURN_RIGHT",
            Op::Reverse => "REVERSE",
            Op::ForkLeft => "FORK_LEFT",
            Op::ForkRight => "FORK_RIGHT",
            Op::Pause => "PAUSE",
            Op::Warp => "WARP",
            Op::BranchZero => "BZ",
            Op::Stage1 => "STAGE1",
            Op::Stage2 => "STAGE2",
            Op::Stage1Color => "STAGE1_COLOR",
            Op::Stage2Color => "STAGE2_COLOR",
            Op::SwapMemStage => "SWAP_MEM",
            Op::SwapStages => "SWAP_STAGES",
            Op::ShiftPush => "SHIFT",
            Op::ShiftStageLeft => "SHIFT_LEFT",
            Op::ShiftStageRight => "SHIFT_RIGHT",
            Op::Stage1Push => "PUSH1",
            Op::Stage2Push => "PUSH2",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Mod => "MOD",
            Op::And => "AND",
            Op::Or => "OR",
            Op::Xor => "XOR",
            Op::Store => "STORE",
            Op::Load => "LOAD",
            Op::StoreHere => "STORE_HERE",
            Op::LoadHere => "LOAD_HERE",
            Op::OutputMemChar => "OUT_MEM_CHAR",
            Op::OutputMemInt => "OUT_MEM_INT",
            Op::OutputMemHex => "OUT_MEM_HEX",
            Op::OutputColorChar => "OUT_CHAR",
            Op::OutputColorNumber => "OUT_NUMBER",
            Op::OutputColorHex => "OUT_HEX",
            Op::InputNumber => "IN_NUMBER",
            Op::InputChar => "IN_CHAR",
        }
    }

    fn template(&self) -> Template {
        match self {
            Op::Nop => templates::NOP,
            Op::StartUp => templates::START_UP,
            Op::StartRight => templates::START_RIGHT,
            Op::StartDown => templates::START_DOWN,
            Op::StartLeft => templates::START_LEFT,
            Op::Kill => templates::KILL,
            Op::TurnLeft => templates::TURN_LEFT,
            Op::TurnRight => templates::TURN_RIGHT,
            Op::Reverse => templates::REVERSE,
            Op::ForkLeft => templates::FORK_LEFT,
            Op::ForkRight => templates::FORK_RIGHT,
            Op::Pause => templates::PAUSE,
            Op::Warp => templates::WARP,
            Op::BranchZero => templates::BRANCH_ZERO,
            Op::Stage1 => templates::STAGE_1,
            Op::Stage2 => templates::STAGE_2,
            Op::Stage1Color => templates::STAGE_1_COLOR,
            Op::Stage2Color => templates::STAGE_2_COLOR,
            Op::SwapMemStage => templates::SWAP_MEM_STAGE,
            Op::SwapStages => templates::SWAP_STAGES,
            Op::ShiftPush => templates::SHIFT_PUSH,
            Op::ShiftStageLeft => templates::SHIFT_STAGE_LEFT,
            Op::ShiftStageRight => templates::SHIFT_STAGE_RIGHT,
            Op::Stage1Push => templates::STAGE_1_PUSH,
            Op::Stage2Push => templates::STAGE_2_PUSH,
            Op::Add => templates::ADD,
            Op::Sub => templates::SUB,
            Op::Mul => templates::MUL,
            Op::Div => templates::DIV,
            Op::Mod => templates::MOD,
            Op::And => templates::AND,
            Op::Or => templates::OR,
            Op::Xor => templates::XOR,
            Op::Store => templates::STORE,
            Op::Load => templates::LOAD,
            Op::StoreHere => templates::STORE_HERE,
            Op::LoadHere => templates::LOAD_HERE,
            Op::OutputMemChar => templates::OUTPUT_MEM_CHAR,
            Op::OutputMemInt => templates::OUTPUT_MEM_INT,
            Op::OutputMemHex => templates::OUTPUT_MEM_HEX,
            Op::OutputColorChar => templates::OUTPUT_COLOR_CHAR,
            Op::OutputColorNumber => templates::OUTPUT_COLOR_NUMBER,
            Op::OutputColorHex => templates::OUTPUT_COLOR_HEX,
            Op::InputNumber => templates::INPUT_NUMBER,
            Op::InputChar => templates::INPUT_CHAR,
        }
    }

    fn start_direction(&self) -> Option<Direction> {
        match self {
            Op::StartUp => Some(Direction::Up),
            Op::StartRight => Some(Direction::Right),
            Op::StartDown => Some(Direction::Down),
            Op::StartLeft => Some(Direction::Left),
            _ => None,
        }
    }

    fn advances(&self) -> bool {
        !matches!(self, Op::Warp)
    }

    fn run(&self, ctx: &mut ExecContext<'_>, operand: Color) -> Result<()> {
        match self {
            Op::Nop | Op::StartUp | Op::StartRight | Op::StartDown | Op::StartLeft => Ok(()),
            Op::Kill => control::execute_kill(ctx),
            Op::TurnLeft => control::execute_turn_left(ctx),
            Op::TurnRight => control::execute_turn_right(ctx),
            Op::Reverse => control::execute_reverse(ctx),
            Op::ForkLeft => control::execute_fork(ctx, Turn::Left),
            Op::ForkRight => control::execute_fork(ctx, Turn::Right),
            Op::Pause => control::execute_pause(ctx, operand),
            Op::Warp => control::execute_warp(ctx, operand),
            Op::BranchZero => control::execute_branch_zero(ctx),

            Op::Stage1 => stage::execute_stage_1(ctx, operand),
            Op::Stage2 => stage::execute_stage_2(ctx, operand),
            Op::Stage1Color => stage::execute_stage_1_color(ctx, operand),
            Op::Stage2Color => stage::execute_stage_2_color(ctx, operand),
            Op::SwapMemStage => stage::execute_swap_mem_stage(ctx),
            Op::SwapStages => stage::execute_swap_stages(ctx),
            Op::ShiftPush => stage::execute_shift_push(ctx),
            Op::ShiftStageLeft => stage::execute_shift_stage(ctx, operand, -1),
            Op::ShiftStageRight => stage::execute_shift_stage(ctx, operand, 1),
            Op::Stage1Push => stage::execute_stage_1_push(ctx, operand),
            Op::Stage2Push => stage::execute_stage_2_push(ctx, operand),

            Op::Add => arith::execute_add(ctx),
            Op::Sub => arith::execute_sub(ctx),
            Op::Mul => arith::execute_mul(ctx),
            Op::Div => arith::execute_div(ctx),
            Op::Mod => arith::execute_mod(ctx),
            Op::And => arith::execute_and(ctx),
            Op::Or => arith::execute_or(ctx),
            Op::Xor => arith::execute_xor(ctx),

            Op::Store => memory::execute_store(ctx),
            Op::Load => memory::execute_load(ctx),
            Op::StoreHere => memory::execute_store_here(ctx),
            Op::LoadHere => memory::execute_load_here(ctx),

            Op::OutputMemChar => io::execute_output_mem_char(ctx, operand),
            Op::OutputMemInt => io::execute_output_mem_int(ctx, operand),
            Op::OutputMemHex => io::execute_output_mem_hex(ctx, operand),
            Op::OutputColorChar => io::execute_output_color_char(ctx, operand),
            Op::OutputColorNumber => io::execute_output_color_number(ctx, operand),
            Op::OutputColorHex => io::execute_output_color_hex(ctx, operand),
            Op::InputNumber => io::execute_input_number(ctx),
            Op::InputChar => io::execute_input_char(ctx),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Instruction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCategory {
    Control,
    Staging,
    Arithmetic,
    Bitwise,
    Memory,
    Output,
    Input,
}

impl fmt::Display for OpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCategory::Control => write!(f, "Control"),
            OpCategory::Staging => write!(f, "Staging"),
            OpCategory::Arithmetic => write!(f, "Arithmetic"),
            OpCategory::Bitwise => write!(f, "Bitwise"),
            OpCategory::Memory => write!(f, "Memory"),
            OpCategory::Output => write!(f, "Output"),
            OpCategory::Input => write!(f, "Input"),
        }
    }
}

// ================================================================================================
// Templates
// ================================================================================================

pub mod templates {
    use tessel_core::isa::Template;

    pub const NOP: Template = Template::parse(["...", "...", "..."]);
    pub const START_UP: Template = Template::parse(["###", "#.#", "#.#"]);
    pub const START_RIGHT: Template = Template::parse(["###", "..#", "###"]);
    pub const START_DOWN: Template = Template::parse(["#.#", "#.#", "###"]);
    pub const START_LEFT: Template = Template::parse(["###", "#..", "###"]);
    pub const KILL: Template = Template::parse(["###", "###", "###"]);
    pub const TURN_LEFT: Template = Template::parse(["#..", "#..", "..."]);
    pub const TURN_RIGHT: Template = Template::parse(["..#", "..#", "..."]);
    pub const REVERSE: Template = Template::parse(["#.#", "...", "#.#"]);
    pub const FORK_LEFT: Template = Template::parse(["#..", "##.", "#.."]);
    pub const FORK_RIGHT: Template = Template::parse(["..#", ".##", "..#"]);
    pub const PAUSE: Template = Template::parse(["...", ".@.", "..."]);
    pub const WARP: Template = Template::parse(["@##", ".#.", "#.#"]);
    pub const BRANCH_ZERO: Template = Template::parse([".#.", "##.", ".#."]);

    pub const STAGE_1: Template = Template::parse(["..@", "..#", "..#"]);
    pub const STAGE_2: Template = Template::parse(["@.#", "#.#", "#.#"]);
    pub const STAGE_1_COLOR: Template = Template::parse(["..@", "#.#", "..#"]);
    pub const STAGE_2_COLOR: Template = Template::parse(["@.#", "###", "#.#"]);
    pub const SWAP_MEM_STAGE: Template = Template::parse([".#.", "...", ".#."]);
    pub const SWAP_STAGES: Template = Template::parse(["...", "#.#", "..."]);
    pub const SHIFT_PUSH: Template = Template::parse([".#.", "#.#", "###"]);
    pub const SHIFT_STAGE_LEFT: Template = Template::parse(["@#.", "#..", "##."]);
    pub const SHIFT_STAGE_RIGHT: Template = Template::parse([".@#", "..#", ".##"]);
    pub const STAGE_1_PUSH: Template = Template::parse([".@#", ".##", "..#"]);
    pub const STAGE_2_PUSH: Template = Template::parse(["@##", "###", "#.#"]);

    pub const ADD: Template = Template::parse([".#.", "###", ".#."]);
    pub const SUB: Template = Template::parse(["...", "###", "..."]);
    pub const MUL: Template = Template::parse(["#.#", ".#.", "#.#"]);
    pub const DIV: Template = Template::parse(["..#", ".#.", "#.."]);
    pub const MOD: Template = Template::parse(["#.#", ".#.", "#.."]);
    pub const AND: Template = Template::parse(["###", ".#.", ".#."]);
    pub const OR: Template = Template::parse([".#.", ".#.", "###"]);
    pub const XOR: Template = Template::parse(["#.#", ".#.", ".#."]);

    pub const STORE: Template = Template::parse(["###", "#..", "#.."]);
    pub const LOAD: Template = Template::parse(["..#", "..#", "###"]);
    pub const STORE_HERE: Template = Template::parse(["###", "#.#", "..#"]);
    pub const LOAD_HERE: Template = Template::parse(["#..", "#..", "###"]);

    pub const OUTPUT_MEM_CHAR: Template = Template::parse([".@#", "..#", "#.."]);
    pub const OUTPUT_MEM_INT: Template = Template::parse([".@#", "..#", "##."]);
    pub const OUTPUT_MEM_HEX: Template = Template::parse([".@#", "#.#", ".#."]);
    pub const OUTPUT_COLOR_CHAR: Template = Template::parse(["@##", "..#", "#.#"]);
    pub const OUTPUT_COLOR_NUMBER: Template = Template::parse(["@##", "..#", "..#"]);
    pub const OUTPUT_COLOR_HEX: Template = Template::parse(["@##", "#.#", ".##"]);
    pub const INPUT_NUMBER: Template = Template::parse(["#..", ".#.", "..#"]);
    pub const INPUT_CHAR: Template = Template::parse(["#..", ".#.", "#.#"]);
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_variants_listed_once() {
        let unique: HashSet<Op> = Op::ALL.iter().copied().collect();
        assert_eq!(unique.len(), Op::ALL.len());
    }

    #[test]
    fn test_templates_pairwise_distinct() {
        let patterns: HashSet<_> = Op::ALL.iter().map(|op| op.template().pattern()).collect();
        assert_eq!(patterns.len(), Op::ALL.len());
    }

    #[test]
    fn test_mnemonics_unique() {
        let mnemonics: HashSet<_> = Op::ALL.iter().map(|op| op.mnemonic()).collect();
        assert_eq!(mnemonics.len(), Op::ALL.len());
    }

    #[test]
    fn test_start_directions() {
        let starts: Vec<_> = Op::ALL.iter().filter_map(|op| op.start_direction()).collect();
        assert_eq!(starts, Direction::CLOCKWISE.to_vec());
        assert_eq!(Op::Nop.start_direction(), None);
    }

    #[test]
    fn test_operand_usage() {
        assert!(Op::Stage1.uses_operand());
        assert!(Op::OutputColorChar.uses_operand());
        assert!(Op::Pause.uses_operand());
        assert!(!Op::Add.uses_operand());
        assert!(!Op::StartRight.uses_operand());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Op::ForkLeft.category(), OpCategory::Control);
        assert_eq!(Op::ShiftPush.category(), OpCategory::Staging);
        assert_eq!(Op::Mod.category(), OpCategory::Arithmetic);
        assert_eq!(Op::Xor.category(), OpCategory::Bitwise);
        assert_eq!(Op::LoadHere.category(), OpCategory::Memory);
        assert_eq!(Op::OutputMemHex.category(), OpCategory::Output);
        assert_eq!(Op::InputChar.category(), OpCategory::Input);
        assert_eq!(OpCategory::Staging.to_string(), "Staging");
    }

    #[test]
    fn test_only_warp_stays_put() {
        let stationary: Vec<_> = Op::ALL.iter().filter(|op| !op.advances()).collect();
        assert_eq!(stationary, vec![&Op::Warp]);
        assert!(Op::Warp.is_control_flow());
    }

    #[test]
    fn test_display_uses_mnemonic() {
        assert_eq!(Op::BranchZero.to_string(), "BZ");
        assert_eq!(format!("{}", Op::OutputColorChar), "OUT_CHAR");
    }
}
