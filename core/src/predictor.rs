//! # Predictor (C3)
//!
//! A fixed-length ring buffer of recent `cpu_load` samples. The mean of
//! the ring is `predicted_load`. Zero-initialised, so the first
//! `HISTORY_SIZE` periods are biased toward idle — a deliberate
//! cold-start conservatism, not a bug.

use crate::config::HISTORY_SIZE;

/// Ring buffer of recent load samples and their running mean.
#[derive(Debug, Clone, Copy)]
pub struct LoadHistory {
    samples: [i32; HISTORY_SIZE],
    index: usize,
}

impl Default for LoadHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadHistory {
    /// A history padded entirely with zeros, as at boot.
    pub const fn new() -> Self {
        Self {
            samples: [0; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Write `cpu_load` into the next slot, advance the index modulo
    /// `HISTORY_SIZE`, and return the new `predicted_load`.
    pub fn push(&mut self, cpu_load: i32) -> i32 {
        self.samples[self.index] = cpu_load;
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.mean()
    }

    /// The next slot that will be written by `push`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Integer mean of the ring, including any zero padding.
    pub fn mean(&self) -> i32 {
        let sum: i64 = self.samples.iter().map(|&s| s as i64).sum();
        (sum / HISTORY_SIZE as i64) as i32
    }
}
