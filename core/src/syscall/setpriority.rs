//! `setpriority(pid, prio) -> 0 | -1`

use spas_execution::{ExecutionError, ProcessId, ProcessTable};

use super::SyscallError;

/// Validate `priority` and, under the process table's own lock, assign
/// it. Mutates nothing on failure. Taking effect on the next dispatch
/// rather than immediately is [`ProcessTable::dispatch`]'s responsibility,
/// not this function's — it only ever writes `priority`, never `quantum_remaining`.
pub fn setpriority(
    table: &ProcessTable,
    pid: ProcessId,
    priority: i32,
) -> Result<(), SyscallError> {
    table.set_priority(pid, priority).map_err(|e| match e {
        ExecutionError::InvalidPriority => SyscallError::InvalidArgument,
        ExecutionError::UnknownProcess => SyscallError::NoProcess,
    })
}
