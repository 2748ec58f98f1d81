// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for growbuf-alloc.
use thiserror::Error;

/// Errors raised when a buffer cannot obtain the storage it needs.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// Capacity arithmetic wrapped, or the total allocation size (header
    /// included) would exceed `isize::MAX`.
    ///
    /// Detected before the allocator is called, so no allocation is attempted.
    #[error("capacity overflow: requested allocation exceeds the representable size")]
    CapacityOverflow,

    /// The allocator returned no memory for a request of `size` bytes.
    #[error("allocator failed to provide {size} bytes")]
    OutOfMemory {
        /// Total size of the rejected request, header included.
        size: usize,
    },
}
