//! Per-thread memory wheel
//!
//! The wheel is an unbounded, two-directional tape of `i64` cells with a single
//! cursor. Only cells holding a non-zero value are stored, so moving the cursor
//! millions of positions costs nothing until something is written there.

use std::collections::BTreeMap;
use std::fmt;

/// Sparse two-directional integer tape with a cursor
///
/// # Example
///
/// ```rust
/// use tessel_core::MemoryWheel;
///
/// let mut wheel = MemoryWheel::new();
/// wheel.push(7);
/// wheel.move_right();
/// assert_eq!(wheel.pull(), 0);
/// wheel.move_left();
/// assert_eq!(wheel.pull(), 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemoryWheel {
    /// Non-zero cells keyed by tape position
    cells: BTreeMap<i64, i64>,

    /// Current cursor position (origin is 0)
    cursor: i64,
}

impl MemoryWheel {
    /// Create an empty wheel with the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value under the cursor
    pub fn pull(&self) -> i64 {
        self.cells.get(&self.cursor).copied().unwrap_or(0)
    }

    /// Overwrite the value under the cursor
    pub fn push(&mut self, value: i64) {
        if value == 0 {
            self.cells.remove(&self.cursor);
        } else {
            self.cells.insert(self.cursor, value);
        }
    }

    pub fn move_left(&mut self) {
        self.move_by(-1);
    }

    pub fn move_right(&mut self) {
        self.move_by(1);
    }

    /// Shift the cursor by a signed offset (negative is left)
    pub fn move_by(&mut self, offset: i64) {
        self.cursor = self.cursor.saturating_add(offset);
    }

    /// Current cursor position relative to the origin
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Number of cells holding a non-zero value
    pub fn materialized(&self) -> usize {
        self.cells.len()
    }

    /// Iterate non-zero cells in tape order
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells.iter().map(|(&position, &value)| (position, value))
    }
}

impl fmt::Display for MemoryWheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut cursor_shown = false;
        let mut first = true;
        for (position, value) in self.cells() {
            if !cursor_shown && position > self.cursor {
                write!(f, "{}({})", if first { "" } else { " " }, 0)?;
                cursor_shown = true;
                first = false;
            }
            let sep = if first { "" } else { " " };
            if position == self.cursor {
                write!(f, "{sep}({value})")?;
                cursor_shown = true;
            } else {
                write!(f, "{sep}{position}:{value}")?;
            }
            first = false;
        }
        if !cursor_shown {
            write!(f, "{}({})", if first { "" } else { " " }, 0)?;
        }
        write!(f, "] @{}", self.cursor)
    }
}
