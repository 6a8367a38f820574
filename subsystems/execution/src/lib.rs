//! # SPAS Execution Subsystem
//!
//! Owns the process control block fields SPAS adds to the existing
//! process table — `priority` and `quantum_remaining` — plus the minimal
//! process table needed to exercise the quantum dispatcher and the
//! `setpriority` syscall without a real kernel behind it.
//!
//! The real process table (address space, open files, trap frame, ...) is
//! an external collaborator per the specification; this crate models only
//! the slice of it SPAS is allowed to touch.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod process;

pub use process::{
    ExecutionError, ProcessControlBlock, ProcessId, ProcessState, ProcessTable,
    DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY,
};
