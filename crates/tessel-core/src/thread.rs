//! Execution cursors ("threads")
//!
//! A thread is a cursor walking the program grid. It owns its registers and its
//! memory wheel; everything else it touches belongs to the machine.
//!
//! # States
//!
//! ```text
//!            execute + move                  pause(n)
//!   ┌──────────────────────┐     ┌──────────────────────────┐
//!   ▼                      │     │                          ▼
//! Running ─────────────────┴─────┘                    Paused(n)
//!   │   ▲                                                   │
//!   │   └──────────── counter reaches 0 (no execute) ───────┘
//!   │ kill
//!   ▼
//! Ended (pruned at the end of the cycle)
//! ```

use crate::error::{Error, Result};
use crate::wheel::MemoryWheel;
use std::fmt;

// ================================================================================================
// Direction
// ================================================================================================

/// Direction of travel, in clockwise order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`
    pub const CLOCKWISE: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Position in the clockwise cycle
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Direction at a clockwise index
    pub fn from_index(index: usize) -> Result<Self> {
        Self::CLOCKWISE
            .get(index)
            .copied()
            .ok_or(Error::InvalidDirection(index))
    }

    pub const fn turn_right(self) -> Self {
        Self::CLOCKWISE[(self.index() + 1) % 4]
    }

    pub const fn turn_left(self) -> Self {
        Self::CLOCKWISE[(self.index() + 3) % 4]
    }

    pub const fn reverse(self) -> Self {
        self.turn_left().turn_left()
    }

    pub const fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Left => self.turn_left(),
            Turn::Right => self.turn_right(),
        }
    }

    /// Unit step in block coordinates (`y` grows downwards)
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// Side a forked thread turns towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Left,
    Right,
}

// ================================================================================================
// Identity and state
// ================================================================================================

/// Unique thread identity assigned by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub u64);

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Observable execution state of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadState {
    Running,
    /// Remaining cycles to skip
    Paused(u64),
    Ended,
}

// ================================================================================================
// Thread
// ================================================================================================

/// A single instruction cursor
///
/// `Thread` does not implement `Clone`; threads are duplicated with
/// [`Thread::fork`].
#[derive(Debug, PartialEq, Eq)]
pub struct Thread {
    id: ThreadId,
    x: i64,
    y: i64,
    direction: Direction,

    /// First scratch register
    pub stage_1: i64,

    /// Second scratch register
    pub stage_2: i64,

    wheel: MemoryWheel,
    paused: bool,
    paused_counter: u64,
    ended: bool,
}

impl Thread {
    /// Create a running thread with empty registers and a fresh wheel
    pub fn new(id: ThreadId, x: i64, y: i64, direction: Direction) -> Self {
        Self {
            id,
            x,
            y,
            direction,
            stage_1: 0,
            stage_2: 0,
            wheel: MemoryWheel::new(),
            paused: false,
            paused_counter: 0,
            ended: false,
        }
    }

    /// Produce a new thread from this one
    ///
    /// | field              | rule                      |
    /// |--------------------|---------------------------|
    /// | id                 | `id` argument             |
    /// | position/direction | copied                    |
    /// | memory wheel       | deep copy (cells, cursor) |
    /// | stage_1 / stage_2  | reset to 0                |
    /// | pause state        | running                   |
    /// | ended              | false                     |
    pub fn fork(&self, id: ThreadId) -> Thread {
        Thread {
            wheel: self.wheel.clone(),
            ..Thread::new(id, self.x, self.y, self.direction)
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn wheel(&self) -> &MemoryWheel {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut MemoryWheel {
        &mut self.wheel
    }

    pub fn state(&self) -> ThreadState {
        if self.ended {
            ThreadState::Ended
        } else if self.paused {
            ThreadState::Paused(self.paused_counter)
        } else {
            ThreadState::Running
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn paused_counter(&self) -> u64 {
        self.paused_counter
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    // ============================================================================================
    // Movement primitives
    // ============================================================================================

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.turn_right();
    }

    /// Face the opposite way (two left turns)
    pub fn reverse(&mut self) {
        self.turn_left();
        self.turn_left();
    }

    /// Move `amount` blocks along the current direction (negative moves backwards)
    pub fn move_by(&mut self, amount: i64) {
        let (dx, dy) = self.direction.delta();
        self.x = self.x.saturating_add(dx.saturating_mul(amount));
        self.y = self.y.saturating_add(dy.saturating_mul(amount));
    }

    /// Move by an arbitrary relative offset
    pub fn jump(&mut self, dx: i64, dy: i64) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Wrap the position into a `width` × `height` grid (toroidal)
    pub(crate) fn wrap_into(&mut self, width: usize, height: usize) {
        self.x = self.x.rem_euclid(width as i64);
        self.y = self.y.rem_euclid(height as i64);
    }

    // ============================================================================================
    // Lifecycle
    // ============================================================================================

    /// Skip execution for the next `cycles` cycles; `pause(0)` does nothing
    pub fn pause(&mut self, cycles: u64) {
        if cycles == 0 {
            return;
        }
        self.paused = true;
        self.paused_counter = cycles;
    }

    pub fn unpause(&mut self) {
        self.paused = false;
        self.paused_counter = 0;
    }

    /// End the thread; it is removed from the machine at the end of the cycle
    pub fn kill(&mut self) {
        self.ended = true;
    }

    /// Consume one paused cycle; returns `true` if the turn was skipped
    pub(crate) fn tick_pause(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused_counter = self.paused_counter.saturating_sub(1);
        if self.paused_counter == 0 {
            self.unpause();
        }
        true
    }
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @({}, {}) {} s1={} s2={} mw={}",
            self.id, self.x, self.y, self.direction, self.stage_1, self.stage_2, self.wheel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_cycle_clockwise() {
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Down.reverse(), Direction::Up);
        for direction in Direction::CLOCKWISE {
            assert_eq!(direction.turn_left().turn_right(), direction);
            assert_eq!(direction.turn_right().turn_right().turn_right().turn_right(), direction);
        }
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Direction::from_index(2).unwrap(), Direction::Down);
        assert!(matches!(Direction::from_index(4), Err(Error::InvalidDirection(4))));
    }

    #[test]
    fn test_move_follows_direction() {
        let mut thread = Thread::new(ThreadId(0), 5, 5, Direction::Up);
        thread.move_by(1);
        assert_eq!(thread.position(), (5, 4));
        thread.turn_right();
        thread.move_by(3);
        assert_eq!(thread.position(), (8, 4));
        thread.reverse();
        thread.move_by(2);
        assert_eq!(thread.position(), (6, 4));
        thread.jump(-6, 10);
        assert_eq!(thread.position(), (0, 14));
    }

    #[test]
    fn test_wrap_into() {
        let mut thread = Thread::new(ThreadId(0), -1, 7, Direction::Left);
        thread.wrap_into(4, 3);
        assert_eq!(thread.position(), (3, 1));
    }

    #[test]
    fn test_fork_copies_wheel_and_resets_registers() {
        let mut parent = Thread::new(ThreadId(1), 2, 3, Direction::Down);
        parent.stage_1 = 11;
        parent.stage_2 = 22;
        parent.wheel_mut().push(99);
        parent.wheel_mut().move_right();

        let mut child = parent.fork(ThreadId(7));
        assert_eq!(child.id(), ThreadId(7));
        assert_eq!(child.position(), (2, 3));
        assert_eq!(child.direction(), Direction::Down);
        assert_eq!(child.stage_1, 0);
        assert_eq!(child.stage_2, 0);
        assert_eq!(child.wheel(), parent.wheel());
        assert_eq!(child.state(), ThreadState::Running);

        child.wheel_mut().move_left();
        child.wheel_mut().push(1);
        parent.wheel_mut().move_left();
        assert_eq!(parent.wheel().pull(), 99);
    }

    #[test]
    fn test_pause_counts_down() {
        let mut thread = Thread::new(ThreadId(0), 0, 0, Direction::Right);
        thread.pause(2);
        assert_eq!(thread.state(), ThreadState::Paused(2));
        assert!(thread.tick_pause());
        assert_eq!(thread.state(), ThreadState::Paused(1));
        assert!(thread.tick_pause());
        assert_eq!(thread.state(), ThreadState::Running);
        assert!(!thread.tick_pause());
    }

    #[test]
    fn test_pause_zero_is_noop() {
        let mut thread = Thread::new(ThreadId(0), 0, 0, Direction::Right);
        thread.pause(0);
        assert_eq!(thread.state(), ThreadState::Running);
    }

    #[test]
    fn test_kill() {
        let mut thread = Thread::new(ThreadId(0), 0, 0, Direction::Right);
        thread.pause(3);
        thread.kill();
        assert_eq!(thread.state(), ThreadState::Ended);
        assert!(thread.is_ended());
    }
}
