//! # Counters (C1)
//!
//! Per-period accumulators. The global tick itself lives outside this
//! crate (the kernel's lock-protected [`spas_hal::TickCounter`]); this
//! module only owns the two counters reset at the end of each period.

/// Period-local tick accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Ticks elapsed in the current sampling period.
    pub tot_ticks: u32,
    /// Subset of `tot_ticks` where the scheduler reported idle.
    pub idle_ticks: u32,
}

impl Counters {
    /// A fresh set of counters, as at boot.
    pub const fn new() -> Self {
        Self {
            tot_ticks: 0,
            idle_ticks: 0,
        }
    }

    /// Record one timer tick. Call exactly once per timer interrupt,
    /// inside the tick-lock critical section, before anything else.
    pub fn record_tick(&mut self, is_idle: bool) {
        self.tot_ticks += 1;
        if is_idle {
            self.idle_ticks += 1;
        }
    }

    /// Whether a full sampling period has elapsed.
    pub fn period_elapsed(&self, load_period: u32) -> bool {
        self.tot_ticks >= load_period
    }

    /// Reset both counters to zero. Must be called after C6, not before,
    /// so the adaptive-threshold controller observes the same
    /// `predicted_load` the frequency controller just used.
    pub fn reset(&mut self) {
        self.tot_ticks = 0;
        self.idle_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tick_counts_idle_subset() {
        let mut counters = Counters::new();
        counters.record_tick(true);
        counters.record_tick(false);
        counters.record_tick(true);
        assert_eq!(counters.tot_ticks, 3);
        assert_eq!(counters.idle_ticks, 2);
    }

    #[test]
    fn reset_clears_both_fields() {
        let mut counters = Counters::new();
        counters.record_tick(true);
        counters.reset();
        assert_eq!(counters, Counters::new());
    }

    /// Universal invariant 6: at the start of each period, both counters
    /// read zero — under a random number of random idle/busy ticks, not
    /// just the fixed single-tick case above.
    #[test]
    fn invariant_reset_zeroes_counters_under_random_tick_streams() {
        use crate::testutil::Xorshift64;

        let mut rng = Xorshift64::new(0xC0FFEE);
        for _ in 0..200 {
            let mut counters = Counters::new();
            let n_ticks = rng.next_range(0, 500);
            for _ in 0..n_ticks {
                counters.record_tick(rng.next_bool());
            }
            counters.reset();
            assert_eq!(counters.tot_ticks, 0);
            assert_eq!(counters.idle_ticks, 0);
        }
    }
}
