// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Header-prefixed single allocation.
//!
//! ```text
//!   base                      data (handle)
//!    |                          |
//!    v                          v
//!    +--------+-----+---------+------------------------------+
//!    | len    | cap | padding | payload: cap * size_of::<T>() |
//!    +--------+-----+---------+------------------------------+
//!    <-------- OFFSET -------->
//! ```
//!
//! The buffer keeps a pointer to the first payload element. The header lives
//! at a fixed negative offset from it, so the handle can be handed out as a
//! flat pointer while the bookkeeping stays private. All pointer arithmetic
//! between the two lives in this module.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;

use growbuf_util::zeroize_raw;
#[cfg(any(test, feature = "test-utils"))]
use growbuf_util::is_raw_zeroized;

use crate::error::AllocError;
use crate::seam::{Heap, RawAlloc};

#[derive(Debug, Clone, Copy)]
#[repr(C)]
struct Header {
    len: usize,
    capacity: usize,
}

/// An owned, header-prefixed allocation holding up to `capacity` values of `T`.
///
/// `RawBuf` manages storage only. It tracks how many leading elements are
/// initialized (`len`), but never constructs or drops elements itself: that is
/// the owning collection's job. On drop it clears the whole allocation and
/// returns it to the allocator.
///
/// Invariants:
///
/// - `len <= capacity`, and the first `len` elements are initialized.
/// - Every byte of the payload past `len` is zero.
pub struct RawBuf<T, A: RawAlloc = Heap> {
    data: NonNull<T>,
    alloc: A,
    _marker: PhantomData<T>,
}

// Safety: RawBuf owns its allocation exclusively; sharing follows T and A.
unsafe impl<T: Send, A: RawAlloc + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RawBuf<T, A> {}

impl<T, A: RawAlloc> core::fmt::Debug for RawBuf<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawBuf")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<T> RawBuf<T, Heap> {
    /// Allocates a zeroed buffer for `capacity` elements on the heap.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::try_with_capacity_in(capacity, Heap)
    }
}

impl<T, A: RawAlloc> RawBuf<T, A> {
    const ALIGN: usize = if align_of::<T>() > align_of::<Header>() {
        align_of::<T>()
    } else {
        align_of::<Header>()
    };

    /// Distance in bytes from the start of the allocation to the payload.
    ///
    /// The header size rounded up to the payload alignment.
    pub const OFFSET: usize = (size_of::<Header>() + Self::ALIGN - 1) & !(Self::ALIGN - 1);

    /// Layout of the whole allocation (header and payload) for `capacity`.
    ///
    /// # Errors
    ///
    /// [`AllocError::CapacityOverflow`] if the size computation wraps or the
    /// total exceeds `isize::MAX`.
    pub fn layout_for(capacity: usize) -> Result<Layout, AllocError> {
        capacity
            .checked_mul(size_of::<T>())
            .and_then(|payload| payload.checked_add(Self::OFFSET))
            .and_then(|size| Layout::from_size_align(size, Self::ALIGN).ok())
            .ok_or_else(|| {
                log_warn!(capacity, "allocation size overflow");
                AllocError::CapacityOverflow
            })
    }

    /// Allocates a zeroed buffer for `capacity` elements from `alloc`.
    ///
    /// # Errors
    ///
    /// - [`AllocError::CapacityOverflow`] if the layout cannot be represented.
    /// - [`AllocError::OutOfMemory`] if the allocator fails.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        let layout = Self::layout_for(capacity)?;

        // SAFETY (PRECONDITIONS ARE MET): layout.size() >= OFFSET >= size_of::<Header>() > 0
        let base = unsafe { alloc.allocate(layout) }.ok_or_else(|| {
            log_warn!(size = layout.size(), "allocation failed");
            AllocError::OutOfMemory {
                size: layout.size(),
            }
        })?;

        let data = unsafe {
            // SAFETY (PRECONDITIONS ARE MET): base is valid for layout.size() bytes and aligned to ALIGN
            zeroize_raw(base.as_ptr(), layout.size());
            base.as_ptr().cast::<Header>().write(Header { len: 0, capacity });
            NonNull::new_unchecked(base.as_ptr().add(Self::OFFSET).cast::<T>())
        };

        log_debug!(capacity, size = layout.size(), "buffer allocated");

        Ok(Self {
            data,
            alloc,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    fn base_ptr(&self) -> *mut u8 {
        // SAFETY (PRECONDITIONS ARE MET): data always sits OFFSET bytes into its allocation
        unsafe { self.data.as_ptr().cast::<u8>().sub(Self::OFFSET) }
    }

    #[inline(always)]
    fn header(&self) -> &Header {
        // SAFETY (PRECONDITIONS ARE MET): the allocation starts with an initialized, aligned Header
        unsafe { &*self.base_ptr().cast::<Header>() }
    }

    #[inline(always)]
    fn header_mut(&mut self) -> &mut Header {
        // SAFETY (PRECONDITIONS ARE MET): as in header(), and &mut self guarantees exclusivity
        unsafe { &mut *self.base_ptr().cast::<Header>() }
    }

    /// Number of initialized leading elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.header().len
    }

    /// Returns `true` if no element is initialized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the payload can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.header().capacity
    }

    /// Sets the number of initialized elements.
    ///
    /// # Safety
    ///
    /// `len` must not exceed the capacity and the first `len` elements must be
    /// initialized. Payload bytes past `len` must be zero again by the time
    /// the calling operation returns.
    #[inline]
    pub unsafe fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.header_mut().len = len;
    }

    /// Pointer to the first payload element. Stable until the next relocation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Mutable pointer to the first payload element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_ptr()
    }

    /// The initialized elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): the first len elements are initialized
        unsafe { core::slice::from_raw_parts(self.as_ptr(), self.len()) }
    }

    /// The initialized elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len();
        // SAFETY (PRECONDITIONS ARE MET): the first len elements are initialized, &mut self is exclusive
        unsafe { core::slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    /// Returns `true` if every payload byte past the initialized elements is
    /// zero.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn is_spare_zeroized(&self) -> bool {
        let spare = (self.capacity() - self.len()) * size_of::<T>();

        // SAFETY (PRECONDITIONS ARE MET): the spare range lies inside the payload
        unsafe { is_raw_zeroized(self.as_ptr().add(self.len()).cast::<u8>(), spare) }
    }

    /// The allocator backing this buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Relocates the buffer so that it holds `new_capacity` elements.
    ///
    /// Header and initialized elements are carried over by the allocator's
    /// resize. Every byte from the occupied length up to the new capacity is
    /// zero afterwards.
    ///
    /// On error the buffer is left exactly as it was: still valid, still
    /// owned, and released normally on drop.
    ///
    /// # Errors
    ///
    /// - [`AllocError::CapacityOverflow`] if the new layout cannot be represented.
    /// - [`AllocError::OutOfMemory`] if the allocator refuses the resize.
    pub fn grow_to(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity >= old_capacity);

        let old_layout = Self::layout_for(old_capacity)?;
        let new_layout = Self::layout_for(new_capacity)?;

        // SAFETY (PRECONDITIONS ARE MET): base_ptr was produced by self.alloc with old_layout,
        // and new_layout.size() is non-zero and bounded by isize::MAX
        let base = unsafe {
            self.alloc.resize(
                NonNull::new_unchecked(self.base_ptr()),
                old_layout,
                new_layout.size(),
            )
        }
        .ok_or_else(|| {
            log_warn!(
                old_capacity,
                new_capacity,
                size = new_layout.size(),
                "relocation failed"
            );
            AllocError::OutOfMemory {
                size: new_layout.size(),
            }
        })?;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): base holds the relocated header followed by the payload
            self.data = NonNull::new_unchecked(base.as_ptr().add(Self::OFFSET).cast::<T>());

            let len = self.len();
            let fresh = self.data.as_ptr().add(len).cast::<u8>();
            zeroize_raw(fresh, (new_capacity - len) * size_of::<T>());
        }

        self.header_mut().capacity = new_capacity;

        log_trace!(old_capacity, new_capacity, "buffer relocated");

        Ok(())
    }
}

impl<T, A: RawAlloc> Drop for RawBuf<T, A> {
    fn drop(&mut self) {
        let capacity = self.capacity();

        // Cannot fail: the same computation succeeded when this capacity was set.
        if let Ok(layout) = Self::layout_for(capacity) {
            let base = self.base_ptr();

            unsafe {
                // SAFETY (PRECONDITIONS ARE MET): base is the live allocation of layout.size() bytes;
                // elements were already dropped by the owner
                zeroize_raw(base, layout.size());
                self.alloc.release(NonNull::new_unchecked(base), layout);
            }

            log_trace!(capacity, "buffer released");
        }
    }
}
