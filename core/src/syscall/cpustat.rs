//! `cpustat(ptr) -> 0 | -1`

use spas_hal::{usercopy::validate_user_ptr, UserCopy};

use super::SyscallError;
use crate::scheduler::SchedulerState;

/// Copy a snapshot of scheduler state to the user-supplied destination.
///
/// Takes the snapshot into a local record first, then releases no lock
/// at all before copying — `SchedulerState::snapshot` already took the
/// (brief) lock and returned. The copy-out itself may fault, which is
/// why it happens after the scheduler-side read is fully done.
pub fn cpustat<C: UserCopy>(
    state: &SchedulerState,
    copier: &C,
    dest: usize,
) -> Result<(), SyscallError> {
    let snapshot = state.snapshot();
    let bytes = snapshot.to_le_bytes();
    validate_user_ptr(dest, bytes.len()).map_err(|_| SyscallError::BadAddress)?;
    copier
        .copy_out(dest, &bytes)
        .map_err(|_| SyscallError::BadAddress)
}
