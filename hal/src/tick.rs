//! # Tick Counter and Scheduler Input Ports
//!
//! `TickCounter` is the lock-protected, monotonically increasing tick
//! counter the specification names as external collaborator (a): owned by
//! the kernel, incremented once per timer interrupt on the boot processor,
//! read by many (the adaptive-threshold controller's oscillation window,
//! `sleep`, `uptime`, ...).
//!
//! `IdleObserver` and `Yielder` are the input/output ports spec.md §9 calls
//! out explicitly: SPAS observes idleness but never sets it, and SPAS
//! causes yields but never picks the next process — that policy belongs to
//! the existing scheduler.

use spin::Mutex;

/// A monotonically increasing, lock-protected tick counter.
///
/// Mirrors xv6's `ticks` global plus `tickslock`: every write goes through
/// the same critical section a real timer interrupt handler would use.
#[derive(Debug)]
pub struct TickCounter {
    ticks: Mutex<u32>,
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter {
    /// Create a tick counter starting at zero.
    pub const fn new() -> Self {
        Self {
            ticks: Mutex::new(0),
        }
    }

    /// Advance the counter by one tick, returning the new value.
    ///
    /// Called from the timer interrupt handler while holding the tick
    /// lock; wraps on overflow rather than panicking, since a kernel that
    /// has been up for `u32::MAX` ticks should keep scheduling, not halt.
    pub fn advance(&self) -> u32 {
        let mut ticks = self.ticks.lock();
        *ticks = ticks.wrapping_add(1);
        *ticks
    }

    /// Read the current tick value.
    pub fn get(&self) -> u32 {
        *self.ticks.lock()
    }
}

/// A way to observe whether the scheduler is currently idle.
///
/// Set by the surrounding scheduler (true around the idle-halt loop,
/// false immediately before dispatching a process) — SPAS only reads it.
pub trait IdleObserver {
    /// Returns `true` if the scheduler has nothing runnable right now.
    fn is_idle(&self) -> bool;
}

/// A way to cause the current process to relinquish the CPU.
///
/// Implemented by the existing scheduler; SPAS calls this when a
/// process's time quantum is exhausted but never otherwise touches
/// scheduling policy.
pub trait Yielder {
    /// Force the currently running process to give up the CPU.
    fn yield_current(&self);
}
