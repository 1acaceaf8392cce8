//! Serializable views of machine state

use crate::thread::{Direction, Thread, ThreadId, ThreadState};
use crate::wheel::MemoryWheel;

/// Point-in-time copy of one thread
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThreadSnapshot {
    pub id: ThreadId,
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
    pub stage_1: i64,
    pub stage_2: i64,
    pub state: ThreadState,
    pub wheel: MemoryWheel,
}

impl From<&Thread> for ThreadSnapshot {
    fn from(thread: &Thread) -> Self {
        let (x, y) = thread.position();
        Self {
            id: thread.id(),
            x,
            y,
            direction: thread.direction(),
            stage_1: thread.stage_1,
            stage_2: thread.stage_2,
            state: thread.state(),
            wheel: thread.wheel().clone(),
        }
    }
}

/// Point-in-time copy of a machine, suitable for JSON dumps
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MachineSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cycle: u64,
    pub runs: u64,
    pub output: String,
    pub remaining_input: String,
    pub threads: Vec<ThreadSnapshot>,
}
