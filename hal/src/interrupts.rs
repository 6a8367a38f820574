//! # Interrupt Vectors
//!
//! The minimal vector set SPAS cares about. A real kernel's trap dispatch
//! routes far more vectors than this; SPAS only needs to know which one is
//! the timer.

/// Interrupt vector identifiers relevant to the scheduler core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InterruptVector {
    /// Periodic timer interrupt. SPAS's analytics update is driven from
    /// this vector on the boot processor.
    Timer = 0,
    /// Anything else. The scheduler core never registers a handler here;
    /// it exists so collaborators can route spurious/unrelated vectors
    /// through the same type without SPAS needing to know about them.
    Other = 1,
}
