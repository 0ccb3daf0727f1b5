/*
 * User Memory Access
 *
 * Byte-granular copies across the user/kernel boundary. The console moves
 * one byte at a time so that a fault part-way through a buffer ends the
 * transfer with the count already copied.
 *
 * Kernel slices implement both traits and never fault. The syscall layer
 * wraps raw user pointers in `UserSlice` / `UserSliceMut`, which check every
 * byte address against the user half of the address space.
 */

use super::Errno;

/// Source of a write(): bytes copied in from the caller.
pub trait CopyIn {
    /// Number of bytes the caller asked to transfer.
    fn len(&self) -> usize;

    /// Copy the byte at `index` into the kernel.
    fn copy_in(&self, index: usize) -> Result<u8, Errno>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Destination of a read(): bytes copied out to the caller.
pub trait CopyOut {
    /// Capacity of the caller's buffer.
    fn len(&self) -> usize;

    /// Copy `byte` to position `index` of the caller's buffer.
    fn copy_out(&mut self, index: usize, byte: u8) -> Result<(), Errno>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CopyIn for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_in(&self, index: usize) -> Result<u8, Errno> {
        self.get(index).copied().ok_or(Errno::EFAULT)
    }
}

impl CopyOut for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn copy_out(&mut self, index: usize, byte: u8) -> Result<(), Errno> {
        let slot = self.get_mut(index).ok_or(Errno::EFAULT)?;
        *slot = byte;
        Ok(())
    }
}

/// Upper bound (exclusive) of user-space addresses.
pub const USER_SPACE_END: usize = 0x0000_8000_0000_0000;

/// Returns true if `addr` is a non-null user-space address.
fn is_user_addr(addr: usize) -> bool {
    addr != 0 && addr < USER_SPACE_END
}

/// Read-only view of a user buffer.
pub struct UserSlice {
    ptr: *const u8,
    len: usize,
}

impl UserSlice {
    /// # Safety
    ///
    /// Every user-half address in `ptr..ptr + len` must be mapped in the
    /// current address space for the lifetime of the slice.
    pub unsafe fn new(ptr: *const u8, len: usize) -> Self {
        Self { ptr, len }
    }
}

impl CopyIn for UserSlice {
    fn len(&self) -> usize {
        self.len
    }

    fn copy_in(&self, index: usize) -> Result<u8, Errno> {
        if index >= self.len {
            return Err(Errno::EFAULT);
        }
        let addr = (self.ptr as usize).checked_add(index).ok_or(Errno::EFAULT)?;
        if !is_user_addr(addr) {
            return Err(Errno::EFAULT);
        }
        // SAFETY: address checked against the user half; mapping guaranteed by `new`.
        Ok(unsafe { core::ptr::read_volatile(addr as *const u8) })
    }
}

/// Writable view of a user buffer.
pub struct UserSliceMut {
    ptr: *mut u8,
    len: usize,
}

impl UserSliceMut {
    /// # Safety
    ///
    /// Every user-half address in `ptr..ptr + len` must be mapped writable in
    /// the current address space for the lifetime of the slice.
    pub unsafe fn new(ptr: *mut u8, len: usize) -> Self {
        Self { ptr, len }
    }
}

impl CopyOut for UserSliceMut {
    fn len(&self) -> usize {
        self.len
    }

    fn copy_out(&mut self, index: usize, byte: u8) -> Result<(), Errno> {
        if index >= self.len {
            return Err(Errno::EFAULT);
        }
        let addr = (self.ptr as usize).checked_add(index).ok_or(Errno::EFAULT)?;
        if !is_user_addr(addr) {
            return Err(Errno::EFAULT);
        }
        // SAFETY: address checked against the user half; mapping guaranteed by `new`.
        unsafe { core::ptr::write_volatile(addr as *mut u8, byte) };
        Ok(())
    }
}
