//! # Load Estimator (C2)
//!
//! Invoked exactly once per `LOAD_PERIOD` ticks, immediately after C1
//! finishes incrementing counters for the period.

use crate::counters::Counters;

/// Derive `cpu_load` (an integer percentage, `0..=100`) from the period's
/// counters. Saturates rather than panicking if `tot_ticks` is zero,
/// which the ordering guarantees does not happen in practice
/// (`LOAD_PERIOD >= 1`) but which §7 still calls out as a counter
/// anomaly to tolerate rather than divide-by-zero on.
pub fn cpu_load(counters: &Counters) -> i32 {
    if counters.tot_ticks == 0 {
        log::error!("counter anomaly: tot_ticks == 0, treating cpu_load as 0");
        return 0;
    }
    let busy = counters.tot_ticks.saturating_sub(counters.idle_ticks);
    let load = (busy as u64 * 100) / counters.tot_ticks as u64;
    load.min(100) as i32
}
