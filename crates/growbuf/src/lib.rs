// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Growable buffers that keep their bookkeeping in front of the data.</em></p>
//!
//! ---
//!
//! growbuf provides two growable buffers whose length and capacity live in a
//! private header placed right before the payload, in the same allocation:
//!
//! - [`GrowVec<T>`](vec::GrowVec): a dense array of `T` with push, pop and a
//!   lookahead iterator.
//! - [`GrowString`](string::GrowString): a null-terminated byte string whose
//!   pointer can be handed to anything expecting a C string.
//!
//! # Features
//!
//! - **Amortized growth**: arrays double, strings grow to
//!   `(capacity << 1) + needed`
//! - **Overflow-checked**: oversized requests fail with an error before the
//!   allocator is called
//! - **Pluggable allocator**: allocate, resize and release form one trait,
//!   [`RawAlloc`](alloc::RawAlloc)
//! - **Zeroized memory**: vacated slots and released allocations are cleared
//! - **`no_std` compatible**: only `alloc` is required
//!
//! # Installation
//!
//! ```toml
//! [dependencies]
//! growbuf = { version = "0.1.0-rc.1" }
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use growbuf::string::{GrowString, StringError};
//! use growbuf::vec::GrowVec;
//! use growbuf::grow_format;
//!
//! fn main() -> Result<(), StringError> {
//!     let mut name = GrowString::from_bytes(b"vince")?;
//!     name.set(b"vince is cool")?;
//!     assert_eq!(name.len(), 13);
//!
//!     let line = grow_format!("{} {} {} {}", "vince", 'v', 420, 69)?;
//!     assert_eq!(line, "vince v 420 69");
//!
//!     let mut lines = GrowVec::new()?;
//!     lines.push(name)?;
//!     lines.push(line)?;
//!
//!     let last = lines.pop();
//!     assert_eq!(last.as_ref().and_then(|s| s.as_c_str()), Some(c"vince v 420 69"));
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! | Feature | Effect |
//! |---------|--------|
//! | `tracing` | Emits allocation, relocation and failure events through `tracing` |
//! | `test-utils` | Exposes `TrackingAlloc` for failure injection and leak checks |
//! | `std` | Marker for hosts that link `std`; the crates themselves only need `alloc` |
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use growbuf_alloc as alloc;
pub use growbuf_string as string;
pub use growbuf_util as util;
pub use growbuf_vec as vec;

pub use growbuf_string::grow_format;
