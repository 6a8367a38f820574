//! # Frequency Controller (C5)
//!
//! Maps `predicted_load` to one of three simulated frequency levels
//! through two mutable decision boundaries, then overrides the result
//! to LOW whenever the thermal model is throttling. Comparisons are
//! strict, so a load exactly on a threshold stays in the lower band.

use crate::config::SpasConfig;
use crate::thresholds::Thresholds;

/// Simulated CPU frequency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyLevel {
    /// Lowest simulated frequency.
    Low,
    /// Middle simulated frequency.
    Medium,
    /// Highest simulated frequency.
    High,
}

impl FrequencyLevel {
    /// The wire encoding used by the `cpustat` snapshot record:
    /// `0=LOW, 1=MEDIUM, 2=HIGH`.
    pub fn encode(self) -> i32 {
        match self {
            FrequencyLevel::Low => 0,
            FrequencyLevel::Medium => 1,
            FrequencyLevel::High => 2,
        }
    }
}

impl Default for FrequencyLevel {
    fn default() -> Self {
        FrequencyLevel::Low
    }
}

/// Decide the next frequency level from predicted load and the thermal
/// model's throttle state. A total function over the two thresholds and
/// the throttle override; never touches `current_frequency` itself —
/// the caller commits the result.
pub fn decide(
    predicted_load: i32,
    is_throttling: bool,
    thresholds: &Thresholds,
    _config: &SpasConfig,
) -> FrequencyLevel {
    let next = if predicted_load > thresholds.med_to_high() {
        FrequencyLevel::High
    } else if predicted_load > thresholds.low_to_med() {
        FrequencyLevel::Medium
    } else {
        FrequencyLevel::Low
    };

    if is_throttling {
        FrequencyLevel::Low
    } else {
        next
    }
}
