//! Grid decoder: pixel grid → program grid
//!
//! The decoder partitions a pixel grid into 3×3 blocks, binarizes each block and
//! looks up the one registered variant with that layout. The result is an
//! immutable [`Program`] plus its start points.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::isa::{Instruction, InstructionTable, Pattern, PATTERN_SIZE, PATTERN_TILES};
use crate::thread::Direction;

// ================================================================================================
// Pixel grid
// ================================================================================================

/// Raw RGB pixels in row-major order, as produced by an image decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Wrap a row-major pixel buffer
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Assemble a grid from row-major 3×3 blocks
    ///
    /// Useful for building programs in code, e.g. from
    /// [`Template::paint`](crate::isa::Template::paint).
    pub fn from_blocks(blocks_wide: usize, blocks_high: usize, blocks: &[[Color; PATTERN_TILES]]) -> Result<Self> {
        let width = blocks_wide * PATTERN_SIZE;
        let height = blocks_high * PATTERN_SIZE;
        if blocks.len() != blocks_wide * blocks_high {
            return Err(Error::PixelCount {
                width,
                height,
                expected: width * height,
                actual: blocks.len() * PATTERN_TILES,
            });
        }

        let mut pixels = vec![Color::WHITE; width * height];
        for (index, block) in blocks.iter().enumerate() {
            let (bx, by) = (index % blocks_wide, index / blocks_wide);
            for (cell, &color) in block.iter().enumerate() {
                let x = bx * PATTERN_SIZE + cell % PATTERN_SIZE;
                let y = by * PATTERN_SIZE + cell / PATTERN_SIZE;
                pixels[y * width + x] = color;
            }
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Copy out the block at block coordinate `(bx, by)`
    fn block(&self, bx: usize, by: usize) -> [Color; PATTERN_TILES] {
        let mut block = [Color::WHITE; PATTERN_TILES];
        for (cell, pixel) in block.iter_mut().enumerate() {
            let x = bx * PATTERN_SIZE + cell % PATTERN_SIZE;
            let y = by * PATTERN_SIZE + cell / PATTERN_SIZE;
            *pixel = self.pixels[y * self.width + x];
        }
        block
    }
}

// ================================================================================================
// Program
// ================================================================================================

/// One decoded block: the variant and its operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded<I> {
    pub variant: I,
    pub operand: Color,
}

/// Where a program's thread begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StartPoint {
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
}

/// Immutable grid of decoded instructions, addressed by block coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Program<I> {
    width: usize,
    height: usize,
    cells: Vec<Decoded<I>>,
    start_points: Vec<StartPoint>,
}

impl<I: Instruction> Program<I> {
    /// Decode a pixel grid against an instruction table
    pub fn decode(grid: &PixelGrid, table: &InstructionTable<I>) -> Result<Self> {
        decode(grid, table)
    }

    /// Width in blocks
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in blocks
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Decoded instruction at a block coordinate, `None` outside the grid
    pub fn get(&self, x: i64, y: i64) -> Option<&Decoded<I>> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Start points in row-major order
    pub fn start_points(&self) -> &[StartPoint] {
        &self.start_points
    }

    /// Iterate `(x, y, decoded)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Decoded<I>)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, decoded)| (index % width, index / width, decoded))
    }

    /// Mnemonic grid, one row of blocks per line
    ///
    /// Operands other than black are appended as `MNEMONIC:#rrggbb`.
    pub fn render(&self) -> String {
        let labels: Vec<String> = self
            .cells
            .iter()
            .map(|decoded| {
                if decoded.operand.is_black() {
                    decoded.variant.mnemonic().to_string()
                } else {
                    format!("{}:{}", decoded.variant.mnemonic(), decoded.operand)
                }
            })
            .collect();
        let column = labels.iter().map(String::len).max().unwrap_or(0);

        labels
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|label| format!("{label:<column$}"))
                    .collect::<Vec<_>>()
                    .join(" ")
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Decode a pixel grid into a [`Program`]
///
/// # Errors
///
/// - [`Error::GridDimensions`] if either dimension is not a multiple of 3
/// - [`Error::MalformedProgram`] for the first block (row-major) matching no template
pub fn decode<I: Instruction>(grid: &PixelGrid, table: &InstructionTable<I>) -> Result<Program<I>> {
    if grid.width % PATTERN_SIZE != 0 || grid.height % PATTERN_SIZE != 0 {
        return Err(Error::GridDimensions {
            width: grid.width,
            height: grid.height,
        });
    }

    let width = grid.width / PATTERN_SIZE;
    let height = grid.height / PATTERN_SIZE;
    let mut cells = Vec::with_capacity(width * height);
    let mut start_points = Vec::new();

    for by in 0..height {
        for bx in 0..width {
            let block = grid.block(bx, by);
            let pattern = Pattern::from_block(&block);
            let variant = table
                .lookup(pattern)
                .ok_or(Error::MalformedProgram { x: bx, y: by, pattern })?;
            let operand = variant.template().operand(&block);

            if let Some(direction) = variant.start_direction() {
                start_points.push(StartPoint {
                    x: bx as i64,
                    y: by as i64,
                    direction,
                });
            }
            cells.push(Decoded { variant, operand });
        }
    }

    tracing::debug!(
        width,
        height,
        start_points = start_points.len(),
        "decoded program grid"
    );

    Ok(Program {
        width,
        height,
        cells,
        start_points,
    })
}
