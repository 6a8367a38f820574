//! # Quantum Dispatcher (C7)
//!
//! `quantum_for` is the total function from frequency and priority to a
//! time-slice length the spec calls for in §9 ("polymorphism over
//! frequency levels ... a total function to quantum length"). The
//! per-tick decrement-and-yield half of C7 lives on
//! [`crate::scheduler::SchedulerState::dispatch_tick`], since it needs
//! the process table and the yield capability, neither of which this
//! module owns.

use spas_execution::DEFAULT_PRIORITY;

use crate::config::Q_MAX;
use crate::frequency::FrequencyLevel;

/// Ticks granted to a dispatched process at LOW frequency and neutral
/// priority.
const BASE_LOW: i32 = 1;
/// Ticks granted to a dispatched process at MEDIUM frequency and
/// neutral priority.
const BASE_MEDIUM: i32 = 2;
/// Ticks granted to a dispatched process at HIGH frequency and neutral
/// priority. Equal to [`Q_MAX`].
const BASE_HIGH: i32 = 4;

/// Priority points per one tick of downward bias. A process at priority
/// `DEFAULT_PRIORITY + 7` gets one fewer tick than the neutral quantum,
/// `DEFAULT_PRIORITY + 14` gets two fewer, and so on.
const PRIORITY_BAND: i32 = 7;

/// Compute the time quantum, in ticks, for a process dispatched at
/// `frequency` with the given `priority`. Lower-numbered (preferred)
/// priorities never shrink the quantum; only priorities above the
/// neutral default do. Always clamps to `[1, Q_MAX]`.
pub fn quantum_for(frequency: FrequencyLevel, priority: i32) -> i32 {
    let base = match frequency {
        FrequencyLevel::Low => BASE_LOW,
        FrequencyLevel::Medium => BASE_MEDIUM,
        FrequencyLevel::High => BASE_HIGH,
    };
    let bias = (priority - DEFAULT_PRIORITY).max(0) / PRIORITY_BAND;
    (base - bias).clamp(1, Q_MAX)
}
