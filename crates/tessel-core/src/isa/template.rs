//! Binarized 3×3 block patterns and instruction templates
//!
//! A block is binarized by mapping every pure-white pixel to an empty cell and
//! every other pixel to a filled cell. A [`Template`] is the filled/empty layout
//! that identifies one instruction variant, optionally marking one filled cell
//! as the data cell whose observed colour becomes the instruction's operand.

use crate::color::Color;
use std::fmt;

/// Edge length of a block in pixels
pub const PATTERN_SIZE: usize = 3;

/// Number of pixels in a block
pub const PATTERN_TILES: usize = PATTERN_SIZE * PATTERN_SIZE;

const PATTERN_BITS: u16 = (1 << PATTERN_TILES) - 1;

// ================================================================================================
// Cell
// ================================================================================================

/// A cell coordinate inside a block (`x` is the column, `y` the row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Cell { x, y }
    }

    /// Row-major index of this cell, `None` if outside the block
    pub const fn index(self) -> Option<usize> {
        if (self.x as usize) < PATTERN_SIZE && (self.y as usize) < PATTERN_SIZE {
            Some(self.y as usize * PATTERN_SIZE + self.x as usize)
        } else {
            None
        }
    }
}

// ================================================================================================
// Pattern
// ================================================================================================

/// Binarized 3×3 block; bit `y * 3 + x` is set when that cell is not white
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern(u16);

impl Pattern {
    /// All cells white
    pub const EMPTY: Pattern = Pattern(0);

    /// All cells filled
    pub const FULL: Pattern = Pattern(PATTERN_BITS);

    pub const fn from_bits(bits: u16) -> Self {
        Pattern(bits & PATTERN_BITS)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Binarize a block of pixels given in row-major order
    pub fn from_block(block: &[Color; PATTERN_TILES]) -> Self {
        let bits = block
            .iter()
            .enumerate()
            .filter(|(_, color)| !color.is_white())
            .fold(0u16, |bits, (index, _)| bits | (1 << index));
        Pattern(bits)
    }

    pub const fn is_white(self, x: usize, y: usize) -> bool {
        self.0 & (1 << (y * PATTERN_SIZE + x)) == 0
    }

    /// Number of filled cells
    pub const fn filled(self) -> u32 {
        self.0.count_ones()
    }

    /// Multi-line rendering, one row per line
    pub fn render(self) -> String {
        (0..PATTERN_SIZE)
            .map(|y| {
                (0..PATTERN_SIZE)
                    .map(|x| if self.is_white(x, y) { '.' } else { '#' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render().replace('\n', "/"))
    }
}

// ================================================================================================
// Template
// ================================================================================================

/// The fixed layout identifying one instruction variant
///
/// Templates are usually written as three row strings where `.` is a white
/// cell, `#` a filled cell and `@` the filled cell that carries the operand:
///
/// ```rust
/// use tessel_core::isa::{Cell, Template};
///
/// const STAGE: Template = Template::parse(["..@", "..#", "..#"]);
///
/// assert!(STAGE.pattern().is_white(0, 0));
/// assert!(!STAGE.pattern().is_white(2, 1));
/// assert_eq!(STAGE.data_cell(), Some(Cell::new(2, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Template {
    pattern: Pattern,
    data_cell: Option<Cell>,
}

impl Template {
    /// Create a template from a pattern and an optional data cell
    ///
    /// The data cell is validated when the template is registered in an
    /// [`InstructionTable`](super::InstructionTable).
    pub const fn new(pattern: Pattern, data_cell: Option<Cell>) -> Self {
        Template { pattern, data_cell }
    }

    /// Parse a template from three row strings
    ///
    /// Intended for `const` items, where a malformed layout fails compilation.
    ///
    /// # Panics
    ///
    /// Panics if a row is not exactly three characters from `.#@`, or if more
    /// than one `@` is present.
    pub const fn parse(rows: [&str; PATTERN_SIZE]) -> Self {
        let mut bits = 0u16;
        let mut data_cell = None;
        let mut y = 0;
        while y < PATTERN_SIZE {
            let row = rows[y].as_bytes();
            assert!(row.len() == PATTERN_SIZE, "template rows must be 3 characters wide");
            let mut x = 0;
            while x < PATTERN_SIZE {
                match row[x] {
                    b'.' => {}
                    b'#' => bits |= 1 << (y * PATTERN_SIZE + x),
                    b'@' => {
                        assert!(data_cell.is_none(), "template declares more than one data cell");
                        bits |= 1 << (y * PATTERN_SIZE + x);
                        data_cell = Some(Cell::new(x as u8, y as u8));
                    }
                    _ => panic!("template cells must be one of '.', '#', '@'"),
                }
                x += 1;
            }
            y += 1;
        }
        Template {
            pattern: Pattern(bits),
            data_cell,
        }
    }

    pub const fn pattern(self) -> Pattern {
        self.pattern
    }

    pub const fn data_cell(self) -> Option<Cell> {
        self.data_cell
    }

    /// Exact match against a binarized block
    pub fn matches(&self, observed: Pattern) -> bool {
        self.pattern == observed
    }

    /// True when the data cell (if any) is inside the block and filled
    pub fn has_valid_data_cell(&self) -> bool {
        match self.data_cell {
            None => true,
            Some(cell) => match cell.index() {
                Some(_) => !self.pattern.is_white(cell.x as usize, cell.y as usize),
                None => false,
            },
        }
    }

    /// Extract the operand from an observed block (black if no data cell)
    pub fn operand(&self, block: &[Color; PATTERN_TILES]) -> Color {
        self.data_cell
            .and_then(Cell::index)
            .map(|index| block[index])
            .unwrap_or(Color::BLACK)
    }

    /// Paint a block that decodes to this template with the given operand
    ///
    /// Filled cells are black; the data cell takes `operand`. A white operand
    /// would change the binarization, so it is painted black instead.
    pub fn paint(&self, operand: Color) -> [Color; PATTERN_TILES] {
        let mut block = [Color::WHITE; PATTERN_TILES];
        for (index, pixel) in block.iter_mut().enumerate() {
            if self.pattern.0 & (1 << index) != 0 {
                *pixel = Color::BLACK;
            }
        }
        if let Some(index) = self.data_cell.and_then(Cell::index) {
            if !operand.is_white() {
                block[index] = operand;
            }
        }
        block
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(PATTERN_TILES + 2);
        for y in 0..PATTERN_SIZE {
            if y > 0 {
                text.push('/');
            }
            for x in 0..PATTERN_SIZE {
                let ch = if self.data_cell == Some(Cell::new(x as u8, y as u8)) {
                    '@'
                } else if self.pattern.is_white(x, y) {
                    '.'
                } else {
                    '#'
                };
                text.push(ch);
            }
        }
        f.write_str(&text)
    }
}
