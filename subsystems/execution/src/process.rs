//! # Process Control Block
//!
//! Adds `priority` and `quantum_remaining` to a minimal process table, the
//! way the specification describes them as additions to "the existing
//! process control block" rather than a control block of their own.

use alloc::vec::Vec;

use spin::Mutex;

/// Lowest legal priority value (most preferred).
pub const MIN_PRIORITY: i32 = 0;
/// Highest legal priority value (least preferred).
pub const MAX_PRIORITY: i32 = 20;
/// Priority assigned to a process on fork, per spec.md §3.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Process identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u32);

/// Scheduling state of a process, as far as SPAS needs to know about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Runnable but not currently dispatched.
    Ready,
    /// Currently running on the (single, boot) CPU.
    Running,
    /// Waiting on something outside the scheduler's control.
    Blocked,
    /// Exited, awaiting reap.
    Zombie,
}

/// The fields SPAS contributes to a process's control block.
#[derive(Debug, Clone, Copy)]
pub struct ProcessControlBlock {
    /// Process identifier.
    pub pid: ProcessId,
    /// Scheduling state.
    pub state: ProcessState,
    /// `0..=20`, lower numbers preferred. A dispatcher hint only — it
    /// never preempts mid-slice, per spec.md §4.7.
    pub priority: i32,
    /// Ticks left in the current time slice.
    pub quantum_remaining: i32,
}

impl ProcessControlBlock {
    fn new(pid: ProcessId) -> Self {
        Self {
            pid,
            state: ProcessState::Ready,
            priority: DEFAULT_PRIORITY,
            quantum_remaining: 0,
        }
    }
}

/// Errors raised by process-table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    /// `setpriority` was asked for a value outside `0..=20`.
    InvalidPriority,
    /// The referenced pid has no entry in the table.
    UnknownProcess,
}

/// A minimal process table: just enough to exercise the quantum
/// dispatcher and the `setpriority`/`cpustat` syscalls without a real
/// kernel behind it. Mutation happens entirely under `lock` — the
/// process-table lock the specification's §5 concurrency model requires.
#[derive(Debug, Default)]
pub struct ProcessTable {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    processes: Vec<ProcessControlBlock>,
    next_pid: u32,
    current: Option<ProcessId>,
}

impl ProcessTable {
    /// Create an empty process table.
    pub fn new() -> Self {
        log::info!("Execution: process table initialized");
        Self {
            inner: Mutex::new(Inner {
                processes: Vec::new(),
                next_pid: 1,
                current: None,
            }),
        }
    }

    /// Create a new process at the default priority and return its pid.
    pub fn spawn(&self) -> ProcessId {
        let mut inner = self.inner.lock();
        let pid = ProcessId(inner.next_pid);
        inner.next_pid += 1;
        inner.processes.push(ProcessControlBlock::new(pid));
        log::debug!("spawned pid={}", pid.0);
        pid
    }

    /// Remove a process from the table (it has exited).
    pub fn exit(&self, pid: ProcessId) {
        let mut inner = self.inner.lock();
        inner.processes.retain(|p| p.pid != pid);
        if inner.current == Some(pid) {
            inner.current = None;
        }
    }

    /// Dispatch `pid`: mark it running, make it current, and hand it the
    /// quantum the frequency controller computed for this slice.
    pub fn dispatch(&self, pid: ProcessId, quantum: i32) -> Result<(), ExecutionError> {
        let mut inner = self.inner.lock();
        let proc = find_mut(&mut inner.processes, pid).ok_or(ExecutionError::UnknownProcess)?;
        proc.state = ProcessState::Running;
        proc.quantum_remaining = quantum;
        inner.current = Some(pid);
        Ok(())
    }

    /// The pid of the currently running process, if any.
    pub fn current(&self) -> Option<ProcessId> {
        self.inner.lock().current
    }

    /// Decrement the current running process's quantum by one tick.
    ///
    /// Returns `Some(new_value)` only when a decrement actually
    /// happened (a process is running and its quantum was positive);
    /// returns `None` if there is no current process, it isn't running,
    /// or its quantum was already exhausted. The `Some(0)` case is the
    /// caller's cue to force a yield, matching the "if it reaches 0,
    /// yield" wording: a quantum that was already at 0 does not fire
    /// the yield again.
    pub fn decrement_current_quantum(&self) -> Option<i32> {
        let mut inner = self.inner.lock();
        let pid = inner.current?;
        let proc = find_mut(&mut inner.processes, pid)?;
        if proc.state != ProcessState::Running || proc.quantum_remaining <= 0 {
            return None;
        }
        proc.quantum_remaining -= 1;
        Some(proc.quantum_remaining)
    }

    /// Mark the current process as having yielded: back to `Ready`, no
    /// longer current. The existing scheduler picks the next one.
    pub fn yield_current(&self) {
        let mut inner = self.inner.lock();
        if let Some(pid) = inner.current.take() {
            if let Some(proc) = find_mut(&mut inner.processes, pid) {
                if proc.state == ProcessState::Running {
                    proc.state = ProcessState::Ready;
                }
            }
        }
    }

    /// Set a process's priority. Validates the range and existence per
    /// spec.md §4.8/§7: out-of-range priority or unknown pid mutate
    /// nothing and report failure.
    pub fn set_priority(&self, pid: ProcessId, priority: i32) -> Result<(), ExecutionError> {
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
            log::debug!("setpriority: priority {} out of range", priority);
            return Err(ExecutionError::InvalidPriority);
        }
        let mut inner = self.inner.lock();
        let proc = find_mut(&mut inner.processes, pid).ok_or(ExecutionError::UnknownProcess)?;
        proc.priority = priority;
        log::debug!("setpriority: pid={} priority={}", pid.0, priority);
        Ok(())
    }

    /// Current priority of `pid`, if it exists.
    pub fn priority(&self, pid: ProcessId) -> Option<i32> {
        let inner = self.inner.lock();
        inner
            .processes
            .iter()
            .find(|p| p.pid == pid)
            .map(|p| p.priority)
    }

    /// Current remaining quantum of `pid`, if it exists.
    pub fn quantum_remaining(&self, pid: ProcessId) -> Option<i32> {
        let inner = self.inner.lock();
        inner
            .processes
            .iter()
            .find(|p| p.pid == pid)
            .map(|p| p.quantum_remaining)
    }

    /// Snapshot of a process's control block.
    pub fn get(&self, pid: ProcessId) -> Option<ProcessControlBlock> {
        self.inner
            .lock()
            .processes
            .iter()
            .find(|p| p.pid == pid)
            .copied()
    }
}

fn find_mut(processes: &mut [ProcessControlBlock], pid: ProcessId) -> Option<&mut ProcessControlBlock> {
    processes.iter_mut().find(|p| p.pid == pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_default_priority() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        assert_eq!(table.priority(pid), Some(DEFAULT_PRIORITY));
        assert_eq!(table.quantum_remaining(pid), Some(0));
    }

    #[test]
    fn dispatch_sets_quantum_and_current() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        table.dispatch(pid, 4).unwrap();
        assert_eq!(table.current(), Some(pid));
        assert_eq!(table.quantum_remaining(pid), Some(4));
    }

    #[test]
    fn tick_decrements_then_stops_firing_once_exhausted() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        table.dispatch(pid, 1).unwrap();
        assert_eq!(table.decrement_current_quantum(), Some(0));
        // Already at zero: no further decrement, no repeated Some(0).
        assert_eq!(table.decrement_current_quantum(), None);
    }

    #[test]
    fn yield_clears_current_and_requeues() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        table.dispatch(pid, 2).unwrap();
        table.yield_current();
        assert_eq!(table.current(), None);
        assert_eq!(table.get(pid).unwrap().state, ProcessState::Ready);
    }

    #[test]
    fn set_priority_rejects_out_of_range() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        assert_eq!(
            table.set_priority(pid, 99),
            Err(ExecutionError::InvalidPriority)
        );
        assert_eq!(table.priority(pid), Some(DEFAULT_PRIORITY));
    }

    #[test]
    fn set_priority_rejects_unknown_pid() {
        let table = ProcessTable::new();
        assert_eq!(
            table.set_priority(ProcessId(999), 5),
            Err(ExecutionError::UnknownProcess)
        );
    }

    #[test]
    fn set_priority_takes_effect_only_on_next_dispatch() {
        let table = ProcessTable::new();
        let pid = table.spawn();
        table.dispatch(pid, 4).unwrap();
        table.set_priority(pid, 3).unwrap();
        // Quantum already assigned this slice is unaffected.
        assert_eq!(table.quantum_remaining(pid), Some(4));
    }
}
