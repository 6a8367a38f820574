//! # SPAS Hardware / Kernel Contract Layer
//!
//! This crate is the seam between SPAS and the kernel collaborators the
//! specification explicitly keeps out of scope: trap dispatch, timer IRQ
//! plumbing, and the copy-to-user primitive. It defines the small set of
//! contracts SPAS needs from its host kernel, and nothing else.
//!
//! ## Contract
//!
//! 1. [`tick::TickCounter`] — a monotonically increasing tick counter
//!    protected by a lock.
//! 2. [`tick::IdleObserver`] — a way to observe whether the scheduler is
//!    currently idle.
//! 3. [`tick::Yielder`] — a way to cause the current process to relinquish
//!    the CPU.
//! 4. [`usercopy::UserCopy`] — a way to copy a fixed-size record into user
//!    memory.
//!
//! A real kernel implements these traits against its own trap frame,
//! run queue and page tables; SPAS only ever talks to the trait objects.

#![no_std]
#![warn(missing_docs)]

pub mod interrupts;
pub mod tick;
pub mod usercopy;

pub use interrupts::InterruptVector;
pub use tick::{IdleObserver, TickCounter, Yielder};
pub use usercopy::UserCopy;

/// Errors surfaced by the hardware contract layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// A user-space pointer failed validation (null, misaligned, or would
    /// overflow the addressable range).
    BadAddress,
}
