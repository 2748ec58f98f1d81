// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable, null-terminated byte string.
//!
//! [`GrowString`] keeps its bookkeeping in a header placed before the bytes,
//! in the same allocation, and always keeps a zero byte after the content.
//! Its pointer can therefore be handed to anything expecting a C string.
//!
//! # Core Guarantees
//!
//! - **Terminated**: `as_bytes_with_nul()[len] == 0` after every operation.
//! - **No stale handles**: mutations relocate inside the value, never behind
//!   a copy the caller still holds.
//! - **Overflow-checked growth**: capacity requests that wrap or exceed the
//!   addressable size fail with [`AllocError::CapacityOverflow`] before any
//!   allocation is attempted.
//! - **Cleared memory**: shrinking replacements, `clear()` and release zeroize
//!   the bytes they give up.
//!
//! # Example
//!
//! ```rust
//! use growbuf_string::{GrowString, StringError, grow_format};
//!
//! fn example() -> Result<(), StringError> {
//!     let mut s = GrowString::new()?;
//!     for byte in *b"vince" {
//!         s.push_byte(byte)?;
//!     }
//!     assert_eq!(s, "vince");
//!
//!     let formatted = grow_format!("{} {} {} {}", "vince", 'v', 420, 69)?;
//!     assert_eq!(formatted, "vince v 420 69");
//!     assert_eq!(formatted.available(), 0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Custom Allocators
//!
//! Every constructor has an `_in` variant taking a [`RawAlloc`]:
//!
//! ```rust
//! use growbuf_alloc::{AllocBehaviour, AllocError, TrackingAlloc};
//! use growbuf_string::GrowString;
//!
//! let tracker = TrackingAlloc::new();
//! let mut s = GrowString::with_capacity_in(4, &tracker).unwrap();
//!
//! tracker.change_behaviour(AllocBehaviour::FailAtResize);
//! assert!(matches!(s.push_str("too long"), Err(AllocError::OutOfMemory { .. })));
//!
//! // The string is untouched and still owns its allocation.
//! assert!(s.is_empty());
//! drop(s);
//! assert_eq!(tracker.live_allocations(), 0);
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod error;
mod grow_string;

#[cfg(test)]
mod tests;

pub use error::StringError;
pub use grow_string::GrowString;

pub use growbuf_alloc::{AllocError, Heap, RawAlloc};

/// Creates a [`GrowString`] from a format string, sized exactly to the output.
///
/// Expands to [`GrowString::format`] and returns
/// `Result<GrowString, StringError>`.
///
/// ```rust
/// use growbuf_string::grow_format;
///
/// let s = grow_format!("{}-{}", "a", 1).unwrap();
/// assert_eq!(s, "a-1");
/// ```
#[macro_export]
macro_rules! grow_format {
    ($($arg:tt)*) => {
        $crate::GrowString::format(::core::format_args!($($arg)*))
    };
}
