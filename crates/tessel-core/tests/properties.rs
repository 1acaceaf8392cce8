//! Algebraic properties of the wheel, directions and the decoder

use proptest::prelude::*;
use tessel_core::isa::{Instruction, InstructionTable, Template, PATTERN_TILES};
use tessel_core::{decode, Color, Direction, ExecContext, MemoryWheel, PixelGrid, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Probe {
    Blank,
    Start,
    Mark,
}

impl Instruction for Probe {
    fn mnemonic(&self) -> &'static str {
        match self {
            Probe::Blank => "BLANK",
            Probe::Start => "START",
            Probe::Mark => "MARK",
        }
    }

    fn template(&self) -> Template {
        match self {
            Probe::Blank => Template::parse(["...", "...", "..."]),
            Probe::Start => Template::parse(["#@#", "#.#", "#.#"]),
            Probe::Mark => Template::parse(["...", ".@.", "..."]),
        }
    }

    fn start_direction(&self) -> Option<Direction> {
        matches!(self, Probe::Start).then_some(Direction::Up)
    }

    fn run(&self, _ctx: &mut ExecContext<'_>, _operand: Color) -> Result<()> {
        Ok(())
    }
}

const PROBES: [Probe; 3] = [Probe::Blank, Probe::Start, Probe::Mark];

fn direction_strategy() -> impl Strategy<Value = Direction> {
    (0usize..4).prop_map(|index| Direction::CLOCKWISE[index])
}

fn block_strategy() -> impl Strategy<Value = [Color; PATTERN_TILES]> {
    (0usize..PROBES.len(), 0u32..0x00FF_FFFF)
        .prop_map(|(index, operand)| PROBES[index].template().paint(Color::new(operand)))
}

proptest! {
    #[test]
    fn wheel_pull_returns_pushed(moves in prop::collection::vec(-1000i64..1000, 0..16), value in any::<i64>()) {
        let mut wheel = MemoryWheel::new();
        for offset in moves {
            wheel.move_by(offset);
        }
        wheel.push(value);
        prop_assert_eq!(wheel.pull(), value);
    }

    #[test]
    fn wheel_fresh_cells_read_zero(offset in any::<i64>()) {
        let mut wheel = MemoryWheel::new();
        wheel.move_by(offset);
        prop_assert_eq!(wheel.pull(), 0);
    }

    #[test]
    fn wheel_clone_is_independent(values in prop::collection::vec(any::<i64>(), 1..8), extra in any::<i64>()) {
        let mut original = MemoryWheel::new();
        for value in &values {
            original.push(*value);
            original.move_right();
        }
        let before = original.clone();

        let mut copy = original.clone();
        copy.move_left();
        copy.push(extra);
        copy.move_by(-3);

        prop_assert_eq!(original, before);
    }

    #[test]
    fn rotation_identities(direction in direction_strategy()) {
        prop_assert_eq!(direction.turn_left().turn_right(), direction);
        prop_assert_eq!(direction.turn_right().turn_left(), direction);
        prop_assert_eq!(direction.turn_right().turn_right().turn_right().turn_right(), direction);
        prop_assert_eq!(direction.reverse().reverse(), direction);
    }

    #[test]
    fn decode_is_deterministic(blocks in prop::collection::vec(block_strategy(), 1..=12), wide in 1usize..=4) {
        let high = blocks.len() / wide;
        prop_assume!(high > 0);
        let blocks = &blocks[..wide * high];
        let grid = PixelGrid::from_blocks(wide, high, blocks).unwrap();
        let table = InstructionTable::new(PROBES).unwrap();

        let first = decode(&grid, &table).unwrap();
        let second = decode(&grid, &table).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.width() * first.height(), wide * high);
    }
}
