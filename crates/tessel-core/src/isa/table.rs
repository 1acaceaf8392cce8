//! Registry of instruction variants with pattern lookup

use super::instruction::Instruction;
use super::template::Pattern;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// A closed set of instruction variants, indexed by binarized pattern
///
/// Construction validates the whole set up front:
///
/// - the set is not empty,
/// - no variant appears twice,
/// - every declared data cell lies on a filled template cell,
/// - no two variants share a binarized pattern, so every block matches at
///   most one variant.
///
/// Any violation is an instruction-library defect and is reported before a
/// single program is decoded.
#[derive(Debug, Clone)]
pub struct InstructionTable<I: Instruction> {
    variants: Vec<I>,
    by_pattern: HashMap<Pattern, usize>,
}

impl<I: Instruction> InstructionTable<I> {
    /// Build a table from an explicit registration list
    pub fn new(variants: impl IntoIterator<Item = I>) -> Result<Self> {
        let mut table = Self {
            variants: Vec::new(),
            by_pattern: HashMap::new(),
        };

        for variant in variants {
            table.register(variant)?;
        }

        if table.variants.is_empty() {
            return Err(Error::EmptyTable);
        }

        tracing::debug!(variants = table.variants.len(), "instruction table built");
        Ok(table)
    }

    fn register(&mut self, variant: I) -> Result<()> {
        if self.variants.contains(&variant) {
            return Err(Error::DuplicateVariant(variant.mnemonic()));
        }

        let template = variant.template();
        if !template.has_valid_data_cell() {
            let (x, y) = template.data_cell().map(|cell| (cell.x, cell.y)).unwrap_or((0, 0));
            return Err(Error::InvalidDataCell {
                mnemonic: variant.mnemonic(),
                x,
                y,
            });
        }

        let pattern = template.pattern();
        if let Some(&existing) = self.by_pattern.get(&pattern) {
            return Err(Error::OverlappingTemplates {
                first: self.variants[existing].mnemonic(),
                second: variant.mnemonic(),
                pattern,
            });
        }

        self.by_pattern.insert(pattern, self.variants.len());
        self.variants.push(variant);
        Ok(())
    }

    /// Find the unique variant whose template matches a binarized block
    pub fn lookup(&self, pattern: Pattern) -> Option<I> {
        self.by_pattern.get(&pattern).map(|&index| self.variants[index])
    }

    /// Registered variants in registration order
    pub fn variants(&self) -> &[I] {
        &self.variants
    }

    /// Variants that mark program start points
    pub fn start_variants(&self) -> impl Iterator<Item = I> + '_ {
        self.variants
            .iter()
            .copied()
            .filter(|variant| variant.start_direction().is_some())
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::isa::{Cell, Template};
    use crate::machine::ExecContext;
    use crate::thread::Direction;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mock {
        Start,
        Halt,
        Clash,
        BadCell,
    }

    impl Instruction for Mock {
        fn mnemonic(&self) -> &'static str {
            match self {
                Mock::Start => "START",
                Mock::Halt => "HALT",
                Mock::Clash => "CLASH",
                Mock::BadCell => "BAD_CELL",
            }
        }

        fn template(&self) -> Template {
            match self {
                Mock::Start => Template::parse(["...", ".@.", "..."]),
                Mock::Halt => Template::parse(["###", "###", "###"]),
                Mock::Clash => Template::parse(["...", ".#.", "..."]),
                Mock::BadCell => Template::new(Pattern::EMPTY, Some(Cell::new(1, 2))),
            }
        }

        fn start_direction(&self) -> Option<Direction> {
            matches!(self, Mock::Start).then_some(Direction::Right)
        }

        fn run(&self, _ctx: &mut ExecContext<'_>, _operand: Color) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let table = InstructionTable::new([Mock::Start, Mock::Halt]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(Pattern::FULL), Some(Mock::Halt));
        assert_eq!(table.lookup(Mock::Start.template().pattern()), Some(Mock::Start));
        assert_eq!(table.lookup(Pattern::EMPTY), None);
        assert_eq!(table.start_variants().collect::<Vec<_>>(), vec![Mock::Start]);
    }

    #[test]
    fn test_rejects_overlapping_templates() {
        let err = InstructionTable::new([Mock::Start, Mock::Clash]).unwrap_err();
        assert!(err.is_table_defect());
        match err {
            Error::OverlappingTemplates { first, second, .. } => {
                assert_eq!(first, "START");
                assert_eq!(second, "CLASH");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = InstructionTable::new([Mock::Halt, Mock::Halt]).unwrap_err();
        assert!(matches!(err, Error::DuplicateVariant("HALT")));
    }

    #[test]
    fn test_rejects_data_cell_on_white() {
        let err = InstructionTable::new([Mock::BadCell]).unwrap_err();
        assert!(matches!(err, Error::InvalidDataCell { mnemonic: "BAD_CELL", x: 1, y: 2 }));
    }

    #[test]
    fn test_rejects_empty() {
        let err = InstructionTable::<Mock>::new([]).unwrap_err();
        assert!(matches!(err, Error::EmptyTable));
    }
}
