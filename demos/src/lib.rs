//! # SPAS Host Simulation
//!
//! SPAS's kernel collaborators — trap dispatch, a real timer IRQ, a
//! real process table — are out of scope for the core crate. This
//! module is the minimal stand-in: a host-side "kernel" that drives
//! [`spas_core`] and [`spas_scheduler_round_robin`] from plain std code,
//! the way a from-scratch kernel would from its boot CPU's timer
//! handler, just without real interrupts or address spaces.
//!
//! The three binaries in `src/bin/` are user-space collaborators per
//! spec.md §6: they only ever go through the syscall boundary
//! ([`spas_core::syscall`]), never touching scheduler internals
//! directly.

use std::cell::RefCell;

use spas_core::{SchedulerState, SpasConfig};
use spas_execution::ProcessTable;
use spas_hal::{HalError, TickCounter, UserCopy};
use spas_scheduler_round_robin::RoundRobinScheduler;

/// The "address" the simulated `cpustat` destination buffer lives at.
/// Stands in for a real user-space virtual address, since this demo has
/// no address space to copy into.
pub const CPUSTAT_BUFFER_ADDR: usize = 0x4000_0000;

/// A host-side stand-in for the user-space memory `cpustat` copies a
/// snapshot into.
pub struct HostUserMemory {
    buffer: RefCell<[u8; 24]>,
}

impl Default for HostUserMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl HostUserMemory {
    /// A zeroed destination buffer.
    pub fn new() -> Self {
        Self {
            buffer: RefCell::new([0u8; 24]),
        }
    }

    /// Read back the last snapshot copied in.
    pub fn read(&self) -> [u8; 24] {
        *self.buffer.borrow()
    }
}

impl UserCopy for HostUserMemory {
    fn copy_out(&self, dest: usize, bytes: &[u8]) -> Result<(), HalError> {
        if dest != CPUSTAT_BUFFER_ADDR || bytes.len() != 24 {
            return Err(HalError::BadAddress);
        }
        self.buffer.borrow_mut().copy_from_slice(bytes);
        Ok(())
    }
}

/// A `cpustat` snapshot, decoded back out of its wire bytes the way a
/// user-space reporter would after the syscall returns.
#[derive(Debug, Clone, Copy)]
pub struct DecodedSnapshot {
    /// Last computed utilisation percentage.
    pub load: i32,
    /// Moving-average predicted load.
    pub predicted_load: i32,
    /// `0=LOW, 1=MEDIUM, 2=HIGH`.
    pub frequency_level: i32,
    /// Virtual temperature, tenths of a degree Celsius.
    pub temp: i32,
    /// Current LOW↔MEDIUM boundary.
    pub thresh_low_med: i32,
    /// Current MEDIUM↔HIGH boundary.
    pub thresh_med_high: i32,
}

impl DecodedSnapshot {
    /// Decode the fixed six-`i32` little-endian layout.
    pub fn from_bytes(bytes: [u8; 24]) -> Self {
        let field = |i: usize| i32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
        Self {
            load: field(0),
            predicted_load: field(1),
            frequency_level: field(2),
            temp: field(3),
            thresh_low_med: field(4),
            thresh_med_high: field(5),
        }
    }

    /// `"LOW" | "MEDIUM" | "HIGH"`, matching the original reporter's
    /// `freq_str` lookup table.
    pub fn frequency_label(&self) -> &'static str {
        match self.frequency_level {
            0 => "LOW",
            1 => "MEDIUM",
            _ => "HIGH",
        }
    }

    /// `D.d`, the display form spec.md §6 calls for (`temp/10` '.' `temp%10`).
    pub fn temp_display(&self) -> (i32, i32) {
        (self.temp / 10, self.temp % 10)
    }
}

/// A minimal host kernel: a simulated tick source, a process table, a
/// round-robin ready queue, and the SPAS core wired to all three.
pub struct SimKernel {
    /// The scheduler core under test.
    pub spas: SchedulerState,
    /// The process table SPAS's quantum dispatcher and `setpriority`
    /// mutate.
    pub table: ProcessTable,
    /// The existing scheduler SPAS augments.
    pub scheduler: RoundRobinScheduler,
    /// The monotonic tick source a real timer interrupt handler would
    /// advance — collaborator contract (a), exercised here instead of
    /// reimplemented.
    ticks: TickCounter,
}

impl SimKernel {
    /// Build a host kernel at the given boot-time configuration.
    pub fn new(config: SpasConfig) -> Self {
        Self {
            spas: SchedulerState::new(config),
            table: ProcessTable::new(),
            scheduler: RoundRobinScheduler::new(),
            ticks: TickCounter::new(),
        }
    }

    /// Current simulated tick count.
    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    /// Advance one simulated timer tick: SPAS's counters and (every
    /// `LOAD_PERIOD` ticks) its full analytics update, the quantum
    /// dispatcher's decrement-and-yield check, and a redispatch if the
    /// scheduler went idle.
    pub fn tick(&self) {
        let ticks = self.ticks.advance();
        self.scheduler.tick(&self.table, &self.spas, ticks);
    }

    /// Advance `n` simulated ticks, sleeping `LOAD_PERIOD` ticks'
    /// worth at a time is the caller's concern, not this one's — this
    /// just runs the control loop forward.
    pub fn advance(&self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }
}
