//! The scheduler
//!
//! A [`Machine`] owns a decoded [`Program`], the ordered sequence of live
//! threads and the [`SharedState`] they all mutate. Execution proceeds in
//! cycles:
//!
//! 1. every thread that is live when the cycle starts takes exactly one turn,
//!    in sequence order
//! 2. forks requested during those turns are merged next to their parents
//!    (left forks before the parent, right forks after it), in request order
//! 3. ended threads are pruned and the cycle counter advances
//!
//! Forked threads therefore never execute in the cycle that created them.

mod config;
mod context;
mod snapshot;

pub use config::{EdgePolicy, MachineConfig};
pub use context::{ExecContext, MemoryKey, SharedState};
pub use snapshot::{MachineSnapshot, ThreadSnapshot};

use crate::decoder::{Decoded, PixelGrid, Program};
use crate::error::{Error, Result};
use crate::isa::{Instruction, InstructionTable};
use crate::thread::{Thread, ThreadId, Turn};
use context::PendingFork;

/// How a bounded run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RunOutcome {
    /// Every thread ended
    Halted { cycles: u64 },
    /// The cycle ceiling was reached with threads still live
    CycleLimit { cycles: u64 },
}

impl RunOutcome {
    pub fn cycles(&self) -> u64 {
        match self {
            RunOutcome::Halted { cycles } | RunOutcome::CycleLimit { cycles } => *cycles,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, RunOutcome::Halted { .. })
    }
}

/// Interpreter for one decoded program
#[derive(Debug)]
pub struct Machine<I: Instruction> {
    name: Option<String>,
    program: Program<I>,
    config: MachineConfig,
    threads: Vec<Thread>,
    shared: SharedState,
    runs: u64,
}

impl<I: Instruction> Machine<I> {
    /// Build a machine and spawn one thread per start point
    pub fn new(program: Program<I>, config: MachineConfig) -> Self {
        let mut machine = Self {
            name: None,
            program,
            config,
            threads: Vec::new(),
            shared: SharedState::default(),
            runs: 0,
        };
        machine.reset();
        machine
    }

    /// Decode a pixel grid and build a machine for it
    pub fn from_grid(grid: &PixelGrid, table: &InstructionTable<I>, config: MachineConfig) -> Result<Self> {
        let program = Program::decode(grid, table)?;
        Ok(Self::new(program, config))
    }

    /// Attach a display name used in logs and snapshots
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // ============================================================================================
    // Lifecycle
    // ============================================================================================

    /// Return to the initial state and count a new run
    ///
    /// Clears output, global memory and pending forks, restores the configured
    /// input, restarts thread ids at 0 and spawns one thread per start point.
    pub fn reset(&mut self) {
        self.shared = SharedState::new(&self.config.input);
        let shared = &mut self.shared;
        self.threads = self
            .program
            .start_points()
            .iter()
            .map(|start| Thread::new(shared.make_id(), start.x, start.y, start.direction))
            .collect();
        self.runs += 1;

        tracing::info!(
            name = self.name.as_deref().unwrap_or("machine"),
            run = self.runs,
            threads = self.threads.len(),
            "machine reset"
        );
    }

    /// Step until no threads remain
    ///
    /// There is no intrinsic bound; use [`run_bounded`](Self::run_bounded)
    /// for programs that may not terminate.
    pub fn run(&mut self) -> Result<()> {
        while self.is_active() {
            self.step()?;
        }
        tracing::info!(
            name = self.name.as_deref().unwrap_or("machine"),
            cycles = self.shared.cycle,
            output_len = self.shared.output.len(),
            "machine halted"
        );
        Ok(())
    }

    /// Step until no threads remain or `max_cycles` cycles have run in total
    ///
    /// Without a configured ceiling this behaves like [`run`](Self::run).
    pub fn run_bounded(&mut self) -> Result<RunOutcome> {
        let Some(limit) = self.config.max_cycles else {
            self.run()?;
            return Ok(RunOutcome::Halted {
                cycles: self.shared.cycle,
            });
        };

        while self.is_active() {
            if self.shared.cycle >= limit {
                tracing::warn!(
                    name = self.name.as_deref().unwrap_or("machine"),
                    limit,
                    threads = self.threads.len(),
                    "cycle limit reached"
                );
                return Ok(RunOutcome::CycleLimit {
                    cycles: self.shared.cycle,
                });
            }
            self.step()?;
        }
        Ok(RunOutcome::Halted {
            cycles: self.shared.cycle,
        })
    }

    /// Run one cycle
    ///
    /// Does nothing when there are no live threads and no pending forks.
    ///
    /// # Errors
    ///
    /// The first failing turn ends the cycle: its error is returned and every
    /// thread is dropped, so later calls do nothing until [`reset`](Self::reset).
    pub fn step(&mut self) -> Result<()> {
        if !self.is_active() {
            return Ok(());
        }

        // Forks land in `shared.pending`, so the sequence is stable during the turns
        let edge_policy = self.config.edge_policy;
        let turns = self
            .threads
            .iter_mut()
            .try_for_each(|thread| Self::execute_turn(&self.program, edge_policy, thread, &mut self.shared));
        if let Err(err) = turns {
            self.halt_on_error(&err);
            return Err(err);
        }

        self.merge_pending();
        self.threads.retain(|thread| !thread.is_ended());
        self.shared.cycle += 1;
        Ok(())
    }

    fn execute_turn(
        program: &Program<I>,
        edge_policy: EdgePolicy,
        thread: &mut Thread,
        shared: &mut SharedState,
    ) -> Result<()> {
        if thread.is_ended() {
            return Ok(());
        }
        if thread.tick_pause() {
            tracing::trace!(thread = %thread.id(), remaining = thread.paused_counter(), "paused");
            return Ok(());
        }

        let Some(decoded) = Self::fetch(program, edge_policy, thread)? else {
            return Ok(());
        };

        let (x, y) = thread.position();
        tracing::debug!(
            thread = %thread.id(),
            cycle = shared.cycle,
            op = decoded.variant.mnemonic(),
            x,
            y,
            operand = %decoded.operand,
            "execute"
        );

        decoded.variant.run(&mut ExecContext::new(thread, shared), decoded.operand)?;
        if decoded.variant.advances() {
            thread.move_by(1);
        }

        tracing::trace!(thread = %thread, "after execute");
        Ok(())
    }

    /// Look up the block under a thread, applying the edge policy
    ///
    /// `Ok(None)` means the thread was halted at the edge.
    fn fetch(
        program: &Program<I>,
        edge_policy: EdgePolicy,
        thread: &mut Thread,
    ) -> Result<Option<Decoded<I>>> {
        let (x, y) = thread.position();
        if let Some(decoded) = program.get(x, y) {
            return Ok(Some(*decoded));
        }

        match edge_policy {
            EdgePolicy::Fault => Err(Error::OutOfBounds {
                thread: thread.id(),
                x,
                y,
            }),
            EdgePolicy::Wrap if !program.is_empty() => {
                thread.wrap_into(program.width(), program.height());
                let (x, y) = thread.position();
                program
                    .get(x, y)
                    .copied()
                    .map(Some)
                    .ok_or(Error::OutOfBounds {
                        thread: thread.id(),
                        x,
                        y,
                    })
            }
            EdgePolicy::Halt | EdgePolicy::Wrap => {
                tracing::warn!(thread = %thread.id(), x, y, "thread left the program grid, halting it");
                thread.kill();
                Ok(None)
            }
        }
    }

    /// Drop every thread and pending fork after a failed turn
    ///
    /// Output, memory and the cycle counter keep their values at the failure.
    /// The machine stays inactive until [`reset`](Self::reset).
    fn halt_on_error(&mut self, err: &Error) {
        tracing::error!(
            name = self.name.as_deref().unwrap_or("machine"),
            cycle = self.shared.cycle,
            threads = self.threads.len(),
            error = %err,
            "instruction failed, machine halted"
        );
        self.threads.clear();
        self.shared.pending.clear();
    }

    fn merge_pending(&mut self) {
        for PendingFork { parent, turn, thread } in std::mem::take(&mut self.shared.pending) {
            match self.threads.iter().position(|live| live.id() == parent) {
                Some(index) => {
                    let at = match turn {
                        Turn::Left => index,
                        Turn::Right => index + 1,
                    };
                    self.threads.insert(at, thread);
                }
                None => self.threads.push(thread),
            }
        }
    }

    fn is_active(&self) -> bool {
        !self.threads.is_empty() || !self.shared.pending.is_empty()
    }

    // ============================================================================================
    // Shared-state operations
    // ============================================================================================

    /// Fork a live thread outside of a turn
    ///
    /// The new thread joins the sequence when the next cycle completes.
    pub fn fork_thread(&mut self, parent: ThreadId, turn: Turn) -> Result<ThreadId> {
        let thread = self
            .threads
            .iter()
            .find(|thread| thread.id() == parent)
            .ok_or(Error::UnknownThread(parent))?;
        Ok(self.shared.fork_thread(thread, turn))
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

    pub fn make_id(&mut self) -> ThreadId {
        self.shared.make_id()
    }

    // ============================================================================================
    // Inspection
    // ============================================================================================

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Completed cycles since the last reset
    pub fn cycles(&self) -> u64 {
        self.shared.cycle
    }

    /// Number of resets, including the one performed by [`new`](Self::new)
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Live threads in sequence order
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|thread| thread.id() == id)
    }

    pub fn output(&self) -> &str {
        self.shared.output()
    }

    pub fn remaining_input(&self) -> &str {
        self.shared.remaining_input()
    }

    pub fn memory(&self, key: MemoryKey) -> i64 {
        self.shared.load(key)
    }

    pub fn program(&self) -> &Program<I> {
        &self.program
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            name: self.name.clone(),
            cycle: self.shared.cycle,
            runs: self.runs,
            output: self.shared.output.clone(),
            remaining_input: self.shared.input.clone(),
            threads: self.threads.iter().map(ThreadSnapshot::from).collect(),
        }
    }
}
