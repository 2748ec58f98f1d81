// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Zeroization helpers shared by the growbuf buffers.
//!
//! Buffers clear memory they stop using: bytes exposed by a relocation,
//! slots vacated by a pop, the tail left behind by a shorter replacement and
//! the whole payload on release. All of that goes through the functions in
//! this crate so the clearing cannot be optimized away.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

/// Fills a byte slice with a repeating pattern byte.
///
/// Mostly useful in tests to simulate stale data before checking that a
/// buffer cleared it.
///
/// # Example
///
/// ```
/// use growbuf_util::fill_bytes_with_pattern;
///
/// let mut buffer = [0u8; 8];
/// fill_bytes_with_pattern(&mut buffer, 0xAB);
/// assert!(buffer.iter().all(|&b| b == 0xAB));
/// ```
#[inline]
pub fn fill_bytes_with_pattern(slice: &mut [u8], pattern: u8) {
    for byte in slice.iter_mut() {
        *byte = pattern;
    }
}

/// Verifies that every byte of a slice is zero.
///
/// # Example
///
/// ```
/// use growbuf_util::is_slice_zeroized;
///
/// assert!(is_slice_zeroized(&[0u8; 10]));
/// assert!(!is_slice_zeroized(&[0u8, 1, 0, 0]));
/// ```
#[inline(always)]
pub fn is_slice_zeroized(slice: &[u8]) -> bool {
    slice.iter().all(|&b| b == 0)
}

/// Zeroizes `len` bytes starting at `ptr`.
///
/// Uses `write_bytes` (memset) followed by a volatile read so the optimizer
/// cannot drop the write as dead.
///
/// # Safety
///
/// `ptr` must be valid for writes of `len` bytes. The bytes may be
/// uninitialized; afterwards they are initialized to zero.
#[inline(always)]
pub unsafe fn zeroize_raw(ptr: *mut u8, len: usize) {
    if len == 0 {
        return;
    }

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees `ptr..ptr + len` is writable
        core::ptr::write_bytes(ptr, 0, len);
        core::ptr::read_volatile(ptr);
    }
}

/// Fast bulk zeroization of a slice of any element type.
///
/// # Safety
///
/// All-zero bytes must be a valid value of `T`, or the slice must not be
/// read as `T` again before being overwritten.
///
/// # Example
///
/// ```
/// use growbuf_util::fast_zeroize_slice;
///
/// let mut ints = [0xDEADBEEFu32; 10];
/// unsafe { fast_zeroize_slice(&mut ints) };
/// assert!(ints.iter().all(|&v| v == 0));
/// ```
#[inline(always)]
pub unsafe fn fast_zeroize_slice<T>(slice: &mut [T]) {
    let byte_len = core::mem::size_of_val(slice);

    unsafe {
        // SAFETY (PRECONDITIONS ARE MET): the slice covers exactly `byte_len` writable bytes
        zeroize_raw(slice.as_mut_ptr().cast::<u8>(), byte_len);
    }
}

/// Reads `len` raw bytes starting at `ptr` and reports whether all are zero.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` initialized bytes.
#[inline(never)]
pub unsafe fn is_raw_zeroized(ptr: *const u8, len: usize) -> bool {
    if len == 0 {
        return true;
    }

    // SAFETY (PRECONDITIONS ARE MET): caller guarantees `len` readable initialized bytes
    let bytes = unsafe { core::slice::from_raw_parts(ptr, len) };
    is_slice_zeroized(bytes)
}
