//! # Thermal Model (C4)
//!
//! A simulated thermal state: heating proportional to load, constant
//! cooling, and an ambient floor that is never a ceiling — sustained
//! load can push `virtual_temp` arbitrarily high, which is exactly the
//! condition the frequency controller's throttle reacts to.

use crate::config::SpasConfig;

/// Virtual temperature state, in tenths of a degree Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalModel {
    virtual_temp: i32,
}

impl ThermalModel {
    /// A thermal model starting at `config.ambient_temp`.
    pub fn new(config: &SpasConfig) -> Self {
        Self {
            virtual_temp: config.ambient_temp,
        }
    }

    /// Current virtual temperature.
    pub fn temp(&self) -> i32 {
        self.virtual_temp
    }

    /// Apply one period's heating and cooling, then clamp to the
    /// ambient floor.
    pub fn update(&mut self, cpu_load: i32, config: &SpasConfig) {
        self.virtual_temp += (cpu_load * config.heating_factor) / 100;
        self.virtual_temp -= config.cooling_factor;
        if self.virtual_temp < config.ambient_temp {
            self.virtual_temp = config.ambient_temp;
        }
    }

    /// Whether the current temperature exceeds the throttle limit.
    pub fn is_throttling(&self, config: &SpasConfig) -> bool {
        self.virtual_temp > config.temp_throttle_limit
    }
}
