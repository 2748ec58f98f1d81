// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growth policy shared by byte strings and typed arrays.
//!
//! Both functions answer the same question before an insertion: does the
//! buffer have to grow, and if so to which capacity. They only do arithmetic;
//! the relocation itself is [`RawBuf::grow_to`](crate::RawBuf::grow_to).

use crate::error::AllocError;

/// Capacity of a freshly created buffer, in bytes or elements.
pub const INITIAL_CAPACITY: usize = 32;

/// Capacity a byte buffer needs so that `needed` occupied bytes fit.
///
/// `capacity` is the raw capacity, terminator slot included, so growth fires
/// once `needed` reaches `capacity`. The new capacity is
/// `(capacity << 1) + needed`: doubling dominates small appends while a single
/// large append is absorbed in one step.
///
/// Returns `Ok(None)` when the buffer is large enough.
///
/// # Errors
///
/// [`AllocError::CapacityOverflow`] if the doubling or the addition wraps.
///
/// # Example
///
/// ```
/// use growbuf_alloc::{next_byte_capacity, AllocError};
///
/// assert_eq!(next_byte_capacity(32, 31), Ok(None));
/// assert_eq!(next_byte_capacity(32, 32), Ok(Some(96)));
/// assert_eq!(next_byte_capacity(usize::MAX / 2 + 1, usize::MAX / 2 + 1), Err(AllocError::CapacityOverflow));
/// ```
pub fn next_byte_capacity(capacity: usize, needed: usize) -> Result<Option<usize>, AllocError> {
    if needed < capacity {
        return Ok(None);
    }

    let new_capacity = capacity
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_add(needed))
        .ok_or_else(|| {
            log_warn!(capacity, needed, "byte capacity overflow");
            AllocError::CapacityOverflow
        })?;

    // An empty raw buffer would double to zero.
    Ok(Some(new_capacity.max(needed.saturating_add(1))))
}

/// Capacity a typed array needs so that one more element fits after `len`.
///
/// Doubles when full. A zero capacity restarts at [`INITIAL_CAPACITY`].
///
/// Returns `Ok(None)` when there is room.
///
/// # Errors
///
/// [`AllocError::CapacityOverflow`] if doubling wraps.
///
/// # Example
///
/// ```
/// use growbuf_alloc::next_element_capacity;
///
/// assert_eq!(next_element_capacity(32, 31), Ok(None));
/// assert_eq!(next_element_capacity(32, 32), Ok(Some(64)));
/// assert_eq!(next_element_capacity(0, 0), Ok(Some(32)));
/// ```
pub fn next_element_capacity(capacity: usize, len: usize) -> Result<Option<usize>, AllocError> {
    if len < capacity {
        return Ok(None);
    }

    if capacity == 0 {
        return Ok(Some(INITIAL_CAPACITY));
    }

    capacity.checked_mul(2).map(Some).ok_or_else(|| {
        log_warn!(capacity, "element capacity overflow");
        AllocError::CapacityOverflow
    })
}
