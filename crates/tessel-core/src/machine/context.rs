//! Machine-shared state and the per-turn execution context
//!
//! The machine's state is split in two:
//!
//! - the live thread sequence, each thread exclusively owned by the machine
//! - [`SharedState`]: global memory, input, output, the pending-fork list and
//!   the id/cycle counters, mutated by whichever thread holds the turn
//!
//! During a turn an instruction sees both halves through an [`ExecContext`].
//! Turns run one after another, so plain `&mut` access is all the
//! synchronization there is.

use crate::thread::{Thread, ThreadId, Turn};
use std::collections::BTreeMap;
use std::fmt;

/// Key into the machine's global memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKey {
    /// Numeric address
    Index(i64),
    /// Block coordinate of the program grid
    Cell { x: i64, y: i64 },
}

impl fmt::Display for MemoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryKey::Index(index) => write!(f, "[{index}]"),
            MemoryKey::Cell { x, y } => write!(f, "({x}, {y})"),
        }
    }
}

/// A forked thread waiting to join the live sequence at the end of the cycle
#[derive(Debug)]
pub(crate) struct PendingFork {
    pub parent: ThreadId,
    pub turn: Turn,
    pub thread: Thread,
}

/// State owned by the machine and shared by every thread
#[derive(Debug, Default)]
pub struct SharedState {
    pub(crate) memory: BTreeMap<MemoryKey, i64>,
    pub(crate) output: String,
    pub(crate) input: String,
    pub(crate) pending: Vec<PendingFork>,
    pub(crate) next_id: u64,
    pub(crate) cycle: u64,
}

impl SharedState {
    /// Fresh state holding `input` as the unconsumed input stream
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::default()
        }
    }

    /// Hand out a fresh thread identity
    pub fn make_id(&mut self) -> ThreadId {
        let id = ThreadId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Current cycle number (0-based)
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Read global memory (0 for unset keys)
    pub fn load(&self, key: MemoryKey) -> i64 {
        self.memory.get(&key).copied().unwrap_or(0)
    }

    /// Write global memory
    pub fn store(&mut self, key: MemoryKey, value: i64) {
        if value == 0 {
            self.memory.remove(&key);
        } else {
            self.memory.insert(key, value);
        }
    }

    pub fn write_output(&mut self, text: &str) {
        self.output.push_str(text);
        tracing::trace!(output = %self.output, "output changed");
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input not yet consumed
    pub fn remaining_input(&self) -> &str {
        &self.input
    }

    /// Consume the maximal leading run of ASCII digits as a number
    ///
    /// Returns 0 (and consumes nothing) when the input does not start with a
    /// digit. Values beyond `i64::MAX` saturate.
    pub fn grab_input_number(&mut self) -> i64 {
        let digits = self.input.bytes().take_while(u8::is_ascii_digit).count();
        let value = self.input[..digits].bytes().fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
        self.input.drain(..digits);
        value
    }

    /// Consume the next input character, `None` once the input is exhausted
    pub fn grab_input_char(&mut self) -> Option<u32> {
        let ch = self.input.chars().next()?;
        self.input.drain(..ch.len_utf8());
        Some(u32::from(ch))
    }

    /// Fork `parent`, turning the new thread and moving it one block forward
    ///
    /// The new thread is parked in the pending list and only joins the live
    /// sequence once every turn of the current cycle has run.
    pub fn fork_thread(&mut self, parent: &Thread, turn: Turn) -> ThreadId {
        let id = self.make_id();
        let mut thread = parent.fork(id);
        thread.set_direction(thread.direction().turn(turn));
        thread.move_by(1);

        tracing::debug!(parent = %parent.id(), child = %id, ?turn, cycle = self.cycle, "thread forked");
        self.pending.push(PendingFork {
            parent: parent.id(),
            turn,
            thread,
        });
        id
    }

    /// Number of forks waiting for the end of the cycle
    pub fn pending_forks(&self) -> usize {
        self.pending.len()
    }
}

/// Everything an instruction may touch during its turn
pub struct ExecContext<'a> {
    thread: &'a mut Thread,
    shared: &'a mut SharedState,
}

impl<'a> ExecContext<'a> {
    pub fn new(thread: &'a mut Thread, shared: &'a mut SharedState) -> Self {
        Self { thread, shared }
    }

    /// The thread holding the turn
    pub fn thread(&self) -> &Thread {
        self.thread
    }

    pub fn thread_mut(&mut self) -> &mut Thread {
        self.thread
    }

    pub fn shared(&self) -> &SharedState {
        self.shared
    }

    pub fn shared_mut(&mut self) -> &mut SharedState {
        self.shared
    }

    /// Request a fork of the current thread
    pub fn fork(&mut self, turn: Turn) -> ThreadId {
        self.shared.fork_thread(self.thread, turn)
    }

    pub fn write_output(&mut self, text: &str) {
        self.shared.write_output(text);
    }

    pub fn grab_input_number(&mut self) -> i64 {
        self.shared.grab_input_number()
    }

    pub fn grab_input_char(&mut self) -> Option<u32> {
        self.shared.grab_input_char()
    }

    pub fn load(&self, key: MemoryKey) -> i64 {
        self.shared.load(key)
    }

    pub fn store(&mut self, key: MemoryKey, value: i64) {
        self.shared.store(key, value);
    }

    /// Global memory key for the block the thread stands on
    pub fn here(&self) -> MemoryKey {
        let (x, y) = self.thread.position();
        MemoryKey::Cell { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thread::Direction;

    #[test]
    fn test_grab_input_number() {
        let mut shared = SharedState::new("123abc");
        assert_eq!(shared.grab_input_number(), 123);
        assert_eq!(shared.remaining_input(), "abc");
        assert_eq!(shared.grab_input_char(), Some(u32::from('a')));
        assert_eq!(shared.remaining_input(), "bc");
    }

    #[test]
    fn test_grab_input_number_without_digits() {
        let mut shared = SharedState::new("x9");
        assert_eq!(shared.grab_input_number(), 0);
        assert_eq!(shared.remaining_input(), "x9");
    }

    #[test]
    fn test_grab_input_number_saturates() {
        let mut shared = SharedState::new("99999999999999999999999 ");
        assert_eq!(shared.grab_input_number(), i64::MAX);
        assert_eq!(shared.remaining_input(), " ");
    }

    #[test]
    fn test_grab_input_char_exhaustion() {
        let mut shared = SharedState::new("é");
        assert_eq!(shared.grab_input_char(), Some(0xE9));
        assert_eq!(shared.grab_input_char(), None);
        assert_eq!(shared.remaining_input(), "");
    }

    #[test]
    fn test_memory_defaults_to_zero() {
        let mut shared = SharedState::default();
        assert_eq!(shared.load(MemoryKey::Index(3)), 0);
        shared.store(MemoryKey::Index(3), 8);
        shared.store(MemoryKey::Cell { x: 3, y: 0 }, 5);
        assert_eq!(shared.load(MemoryKey::Index(3)), 8);
        assert_eq!(shared.load(MemoryKey::Cell { x: 3, y: 0 }), 5);
        shared.store(MemoryKey::Index(3), 0);
        assert_eq!(shared.memory.len(), 1);
    }

    #[test]
    fn test_make_id_is_monotonic() {
        let mut shared = SharedState::default();
        assert_eq!(shared.make_id(), ThreadId(0));
        assert_eq!(shared.make_id(), ThreadId(1));
        assert_eq!(shared.make_id(), ThreadId(2));
    }

    #[test]
    fn test_fork_thread_is_deferred_and_moved() {
        let mut shared = SharedState::default();
        let parent_id = shared.make_id();
        let mut parent = Thread::new(parent_id, 4, 4, Direction::Up);
        parent.stage_1 = 3;
        parent.wheel_mut().push(12);

        let child_id = shared.fork_thread(&parent, Turn::Left);
        assert_eq!(child_id, ThreadId(1));
        assert_eq!(shared.pending_forks(), 1);

        let pending = &shared.pending[0];
        assert_eq!(pending.parent, parent_id);
        assert_eq!(pending.turn, Turn::Left);
        assert_eq!(pending.thread.direction(), Direction::Left);
        assert_eq!(pending.thread.position(), (3, 4));
        assert_eq!(pending.thread.stage_1, 0);
        assert_eq!(pending.thread.wheel().pull(), 12);
    }

    #[test]
    fn test_context_here() {
        let mut shared = SharedState::default();
        let mut thread = Thread::new(ThreadId(0), 2, 7, Direction::Down);
        let ctx = ExecContext::new(&mut thread, &mut shared);
        assert_eq!(ctx.here(), MemoryKey::Cell { x: 2, y: 7 });
    }
}
