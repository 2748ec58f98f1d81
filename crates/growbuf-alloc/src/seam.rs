// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The allocator seam: allocate, resize and release.

use core::alloc::Layout;
use core::ptr::NonNull;

/// Backing storage primitives used by every growbuf buffer.
///
/// The three operations are one seam. Substituting the allocator means
/// implementing this trait, and the trait has no default methods, so a host
/// cannot swap one primitive while silently keeping the others.
///
/// Buffers are generic over `A: RawAlloc` with [`Heap`] as the default, so the
/// choice is made at compile time.
///
/// # Safety
///
/// Implementors must uphold the usual allocator contract:
///
/// - `allocate` returns memory valid for `layout.size()` bytes and aligned to
///   `layout.align()`, or `None`.
/// - `resize` returns memory valid for `new_size` bytes with the same
///   alignment, preserving the first `min(layout.size(), new_size)` bytes.
///   On `None` the original block must remain valid and untouched.
/// - `release` accepts any block produced by this allocator's `allocate` or
///   `resize`, together with the layout it currently has.
pub unsafe trait RawAlloc {
    /// Allocates a block for `layout`.
    ///
    /// # Safety
    ///
    /// `layout.size()` must be non-zero.
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Resizes the block at `ptr` from `layout` to `new_size` bytes, possibly
    /// moving it.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator and currently have `layout`.
    /// `new_size` must be non-zero and, rounded up to `layout.align()`, must
    /// not exceed `isize::MAX`.
    unsafe fn resize(&self, ptr: NonNull<u8>, layout: Layout, new_size: usize)
    -> Option<NonNull<u8>>;

    /// Returns the block at `ptr` to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator and currently have `layout`.
    /// It must not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

/// The ambient heap allocator (`alloc::alloc`).
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Heap;

unsafe impl RawAlloc for Heap {
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees a non-zero size
        NonNull::new(unsafe { alloc::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // SAFETY (PRECONDITIONS ARE MET): ptr was allocated by the global allocator with `layout`
        NonNull::new(unsafe { alloc::alloc::realloc(ptr.as_ptr(), layout, new_size) })
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY (PRECONDITIONS ARE MET): ptr was allocated by the global allocator with `layout`
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

unsafe impl<A> RawAlloc for &A
where
    A: RawAlloc + ?Sized,
{
    #[inline]
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        unsafe { (**self).allocate(layout) }
    }

    #[inline]
    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        unsafe { (**self).resize(ptr, layout, new_size) }
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { (**self).release(ptr, layout) }
    }
}
