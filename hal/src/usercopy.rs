//! # Copy-to-User Primitive
//!
//! `cpustat`'s snapshot record has to cross the kernel/user boundary. The
//! real copy (page-table walk, fault handling) is arch-specific and out of
//! scope for SPAS; this module defines the contract and the pointer
//! validation the syscall layer runs before trusting a user pointer.

use crate::HalError;

/// A way to copy a fixed-size record into user memory.
///
/// A real kernel implements this against its page tables (xv6's
/// `copyout(pgdir, addr, data, len)`); SPAS only ever calls through the
/// trait, after validating the destination with [`validate_user_ptr`].
pub trait UserCopy {
    /// Copy `bytes` to the user-space address `dest`.
    ///
    /// Returns [`HalError::BadAddress`] if the destination is not mapped
    /// writable for the calling process.
    fn copy_out(&self, dest: usize, bytes: &[u8]) -> Result<(), HalError>;
}

/// Validate a user-space destination pointer before attempting a copy.
///
/// Rejects the null pointer and any `(ptr, size)` pair that would
/// overflow the address space.
pub fn validate_user_ptr(ptr: usize, size: usize) -> Result<(), HalError> {
    if ptr == 0 {
        return Err(HalError::BadAddress);
    }
    if ptr.checked_add(size).is_none() {
        return Err(HalError::BadAddress);
    }
    Ok(())
}
