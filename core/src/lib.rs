//! # SPAS Core
//!
//! Self-adapting Predictive-And-Thermal-aware Scheduler: augments a
//! classical round-robin process scheduler with four tightly coupled
//! mechanisms — load estimation, load prediction, a virtual thermal
//! model with frequency control, and an adaptive-threshold controller —
//! plus a per-process priority interface feeding a dynamic time quantum.
//!
//! ## Control loop
//!
//! Per sampling period: [`counters`] (C1) feeds [`estimator`] (C2) feeds
//! [`predictor`] (C3) feeds [`thermal`] (C4) feeds [`frequency`] (C5)
//! feeds [`thresholds`] (C6). Per tick, independent of the period,
//! [`quantum`] (C7) decrements the running process's time slice.
//! [`syscall`] (C8) reads the period-driven state and writes the
//! per-process state; it never participates in the control loop
//! itself.
//!
//! [`scheduler::SchedulerState`] is the single record that owns all of
//! it, per the design notes: process-wide mutable state is intrinsic to
//! a kernel scheduler and is not something to refactor away.
//!
//! ## Trusted Computing Base
//!
//! This crate trusts its host kernel for the contracts in
//! [`spas_hal`]: the tick counter, idle observation, the yield
//! capability, and the copy-to-user primitive. It does not implement
//! real CPU frequency scaling, real temperature sensing, or multi-core
//! coordination — those are explicitly out of scope.

#![no_std]
#![warn(missing_docs)]

pub mod config;
pub mod counters;
pub mod estimator;
pub mod frequency;
pub mod predictor;
pub mod quantum;
pub mod scheduler;
pub mod syscall;
pub mod thermal;
pub mod thresholds;

#[cfg(test)]
mod testutil;

pub use config::{SpasConfig, HISTORY_SIZE, Q_MAX};
pub use frequency::FrequencyLevel;
pub use scheduler::{SchedulerState, Snapshot};
pub use syscall::SyscallError;
