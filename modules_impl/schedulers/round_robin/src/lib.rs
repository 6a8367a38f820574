//! # Round-Robin Scheduler
//!
//! The "existing scheduler" the specification says SPAS augments
//! without replacing: a FIFO ready queue that picks the next process,
//! and nothing else. SPAS supplies the time quantum each dispatched
//! process receives through [`spas_core::SchedulerState::dispatch`];
//! this crate owns the selection policy and the idle/yield plumbing
//! SPAS treats as input/output ports.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

use alloc::collections::VecDeque;
use core::sync::atomic::{AtomicBool, Ordering};

use spin::Mutex;

use spas_core::SchedulerState;
use spas_execution::{ProcessId, ProcessTable};
use spas_hal::{IdleObserver, Yielder};

/// A single-CPU FIFO ready queue.
///
/// Doubles as the [`IdleObserver`]/[`Yielder`] SPAS's contracts expect:
/// `is_idle` is true whenever nothing has been dispatched since the
/// last yield, and `yield_current` just flips that flag back to true —
/// the actual context switch happens on the next call to
/// [`RoundRobinScheduler::tick`], the way the design notes describe the
/// idle flag as an input port the surrounding scheduler maintains.
pub struct RoundRobinScheduler {
    ready: Mutex<VecDeque<ProcessId>>,
    idle: AtomicBool,
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundRobinScheduler {
    /// An empty ready queue, idle, as at boot.
    pub const fn new() -> Self {
        Self {
            ready: Mutex::new(VecDeque::new()),
            idle: AtomicBool::new(true),
        }
    }

    /// Add a process to the back of the ready queue.
    pub fn enqueue(&self, pid: ProcessId) {
        self.ready.lock().push_back(pid);
    }

    /// Number of processes currently waiting to run.
    pub fn ready_len(&self) -> usize {
        self.ready.lock().len()
    }

    /// Pop the next ready process and dispatch it through SPAS, which
    /// assigns its quantum from the current frequency and its priority.
    /// Returns `None`, leaving the scheduler idle, if nothing is ready.
    pub fn dispatch_next(&self, table: &ProcessTable, spas: &SchedulerState) -> Option<ProcessId> {
        let pid = self.ready.lock().pop_front()?;
        spas.dispatch(table, pid);
        self.idle.store(false, Ordering::Relaxed);
        log::trace!("dispatched pid={}", pid.0);
        Some(pid)
    }

    /// One timer tick: runs SPAS's counter/analytics update, decrements
    /// the running process's quantum (forcing a yield if it just
    /// reached zero), then immediately picks a new process if the
    /// yield left the scheduler idle. `requeue_yielded` controls
    /// whether a process that just yielded goes back to the end of the
    /// ready queue (it does, for round robin) — the caller passes the
    /// pid SPAS reported as having been running before this tick, if
    /// any, so it can be requeued after the quantum decrement.
    pub fn tick(&self, table: &ProcessTable, spas: &SchedulerState, ticks: u32) {
        let running_before = table.current();
        spas.on_timer_tick(ticks, self);
        spas.dispatch_tick(table, self);

        if self.idle.load(Ordering::Relaxed) {
            if let Some(pid) = running_before {
                if table.current() != Some(pid) {
                    self.enqueue(pid);
                }
            }
            self.dispatch_next(table, spas);
        }
    }
}

impl IdleObserver for RoundRobinScheduler {
    fn is_idle(&self) -> bool {
        self.idle.load(Ordering::Relaxed)
    }
}

impl Yielder for RoundRobinScheduler {
    fn yield_current(&self) {
        self.idle.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spas_core::SpasConfig;

    #[test]
    fn dispatch_next_picks_fifo_order() {
        let scheduler = RoundRobinScheduler::new();
        let table = ProcessTable::new();
        let spas = SchedulerState::new(SpasConfig::default());
        let a = table.spawn();
        let b = table.spawn();
        scheduler.enqueue(a);
        scheduler.enqueue(b);

        assert_eq!(scheduler.dispatch_next(&table, &spas), Some(a));
        assert_eq!(scheduler.dispatch_next(&table, &spas), Some(b));
        assert_eq!(scheduler.dispatch_next(&table, &spas), None);
    }

    #[test]
    fn empty_queue_leaves_scheduler_idle() {
        let scheduler = RoundRobinScheduler::new();
        assert!(scheduler.is_idle());
        let table = ProcessTable::new();
        let spas = SchedulerState::new(SpasConfig::default());
        assert_eq!(scheduler.dispatch_next(&table, &spas), None);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn tick_requeues_after_quantum_exhaustion() {
        let scheduler = RoundRobinScheduler::new();
        let table = ProcessTable::new();
        let spas = SchedulerState::new(SpasConfig::default());
        let pid = table.spawn();
        scheduler.enqueue(pid);
        scheduler.dispatch_next(&table, &spas);

        // LOW frequency quantum is 1 tick: the very next tick exhausts it.
        let mut ticks = 0u32;
        ticks += 1;
        scheduler.tick(&table, &spas, ticks);

        // Exhausted, requeued, and immediately redispatched since it was
        // the only ready process.
        assert_eq!(table.current(), Some(pid));
        assert_eq!(scheduler.ready_len(), 0);
    }
}
