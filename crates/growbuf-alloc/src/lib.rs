// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocation discipline shared by the growbuf buffers.
//!
//! # Core Pieces
//!
//! - **Allocator seam**: [`RawAlloc`] bundles allocate, resize and release.
//!   [`Heap`] is the default; a host swaps all three at once by implementing
//!   the trait.
//! - **Growth policy**: [`next_byte_capacity`] and [`next_element_capacity`]
//!   decide when and how far to grow, with overflow-checked arithmetic.
//! - **Header-prefixed allocation**: [`RawBuf`] stores length and capacity in
//!   a header placed right before the payload, in the same allocation, and
//!   hands out a pointer to the payload.
//!
//! # Clearing
//!
//! Fresh allocations and bytes exposed by a relocation are zero-filled. The
//! whole allocation is zeroized again before it goes back to the allocator.
//!
//! # Example
//!
//! ```rust
//! use growbuf_alloc::{next_element_capacity, AllocError, RawBuf};
//!
//! fn example() -> Result<(), AllocError> {
//!     let mut buf = RawBuf::<u32>::try_with_capacity(2)?;
//!
//!     for value in 0..3u32 {
//!         if let Some(capacity) = next_element_capacity(buf.capacity(), buf.len())? {
//!             buf.grow_to(capacity)?;
//!         }
//!
//!         let len = buf.len();
//!         unsafe {
//!             buf.as_mut_ptr().add(len).write(value);
//!             buf.set_len(len + 1);
//!         }
//!     }
//!
//!     assert_eq!(buf.as_slice(), &[0, 1, 2]);
//!     assert_eq!(buf.capacity(), 4);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to get [`TrackingAlloc`], an instrumented
//! heap allocator with sticky failure injection through [`AllocBehaviour`]:
//!
//! ```toml
//! [dev-dependencies]
//! growbuf-alloc = { version = "*", features = ["test-utils"] }
//! ```
//!
//! # Logging
//!
//! With the `tracing` feature, allocations, relocations, releases and failures
//! are reported as `tracing` events.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[macro_use]
mod macros;

mod error;
mod policy;
mod raw_buf;
mod seam;

#[cfg(any(test, feature = "test-utils"))]
mod tracking;

#[cfg(test)]
mod tests;

pub use error::AllocError;
pub use policy::{INITIAL_CAPACITY, next_byte_capacity, next_element_capacity};
pub use raw_buf::RawBuf;
pub use seam::{Heap, RawAlloc};

#[cfg(any(test, feature = "test-utils"))]
pub use tracking::{AllocBehaviour, TrackingAlloc};
