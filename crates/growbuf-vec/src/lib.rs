// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable typed array and lookahead iterator.
//!
//! [`GrowVec<T>`] stores its length and capacity in a header right before
//! the elements, in a single allocation obtained through a
//! [`RawAlloc`](growbuf_alloc::RawAlloc). The element size is fixed by `T`.
//!
//! # Core Guarantees
//!
//! - **Doubling growth**: a push into a full array doubles the capacity, with
//!   overflow-checked arithmetic.
//! - **Unchanged on failure**: a failed growth leaves the array exactly as it
//!   was; its storage is still released on drop.
//! - **Cleared slots**: `pop`, `clear` and release zeroize what they vacate.
//! - **Ordered finalization**: elements are dropped, or handed to the
//!   finalizer of [`GrowVec::release_with`], in index order.
//!
//! # Example
//!
//! ```rust
//! use growbuf_vec::GrowVec;
//! use growbuf_alloc::AllocError;
//!
//! fn example() -> Result<(), AllocError> {
//!     let mut numbers = GrowVec::with_capacity(2)?;
//!     for n in [1, 2, 3] {
//!         numbers.push(n)?;
//!     }
//!     assert_eq!(numbers.capacity(), 4);
//!
//!     let pairs: Vec<_> = numbers
//!         .lookahead()
//!         .map(|(current, next)| (*current, next.copied()))
//!         .collect();
//!     assert_eq!(pairs, [(1, Some(2)), (2, Some(3)), (3, None)]);
//!
//!     let mut seen = Vec::new();
//!     numbers.release_with(|n| seen.push(n));
//!     assert_eq!(seen, [1, 2, 3]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod grow_vec;
mod lookahead;

#[cfg(test)]
mod tests;

pub use grow_vec::GrowVec;
pub use lookahead::Lookahead;

pub use growbuf_alloc::{AllocError, Heap, RawAlloc};
