//! # Boot-Time Configuration
//!
//! The tunable constants the control loop reacts to. `HISTORY_SIZE` is
//! fixed at compile time because it sizes the ring buffer embedded in
//! [`crate::predictor::LoadHistory`]; everything else is a boot-time
//! default a host kernel may override before bringing SPAS online.

/// Depth of the load-history moving-average ring. Fixed at compile time.
pub const HISTORY_SIZE: usize = 10;

/// Quantum, in ticks, assigned at HIGH frequency with neutral priority.
/// The largest quantum any process may legally hold.
pub const Q_MAX: i32 = 4;

/// Boot-tunable control-loop constants.
///
/// Mirrors the suggested defaults in the component design; a host kernel
/// may construct a [`SpasConfig`] with different values at boot and hand
/// it to [`crate::scheduler::SchedulerState::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpasConfig {
    /// Ticks per sampling period.
    pub load_period: u32,
    /// Heat units added per 100% load per period.
    pub heating_factor: i32,
    /// Heat units removed per period.
    pub cooling_factor: i32,
    /// Lower bound for `virtual_temp`, in tenths of a degree.
    pub ambient_temp: i32,
    /// Upper `virtual_temp` bound before frequency is forced to LOW.
    pub temp_throttle_limit: i32,
    /// Ticks defining the oscillation window (stale-transition horizon).
    pub oscillation_window: u32,
    /// Transitions within the window that trigger threshold widening.
    pub max_oscillation: i32,
    /// Ticks between narrowing evaluations.
    pub adaptation_period: u32,
    /// Initial LOW↔MEDIUM decision boundary, in percent.
    pub initial_thresh_low_to_med: i32,
    /// Initial MEDIUM↔HIGH decision boundary, in percent.
    pub initial_thresh_med_to_high: i32,
}

impl Default for SpasConfig {
    fn default() -> Self {
        Self {
            load_period: 10,
            heating_factor: 10,
            cooling_factor: 3,
            ambient_temp: 250,
            temp_throttle_limit: 750,
            oscillation_window: 100,
            max_oscillation: 3,
            adaptation_period: 500,
            initial_thresh_low_to_med: 30,
            initial_thresh_med_to_high: 70,
        }
    }
}

static_assertions::const_assert!(Q_MAX >= 1);
