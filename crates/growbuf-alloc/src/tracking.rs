// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Allocator instrumentation for tests.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use crate::seam::{Heap, RawAlloc};

/// Failure injection for [`TrackingAlloc`].
///
/// The behaviour is sticky: once set, it stays active until changed.
///
/// # Example
///
/// ```rust
/// use growbuf_alloc::{AllocBehaviour, AllocError, RawBuf, TrackingAlloc};
///
/// let tracker = TrackingAlloc::new();
/// tracker.change_behaviour(AllocBehaviour::FailAtAllocate);
///
/// let result = RawBuf::<u8, _>::try_with_capacity_in(8, &tracker);
/// assert!(matches!(result, Err(AllocError::OutOfMemory { .. })));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AllocBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every `allocate()` call returns no memory.
    FailAtAllocate,
    /// Every `resize()` call returns no memory, leaving the block untouched.
    FailAtResize,
}

/// Heap-backed allocator that counts what passes through the seam.
///
/// Meant to be borrowed by the buffers under test (`&TrackingAlloc`
/// implements [`RawAlloc`]) so the counters stay observable afterwards.
/// Uses `Cell`, so it is single-threaded like the buffers themselves.
#[derive(Debug, Default)]
pub struct TrackingAlloc {
    allocations: Cell<usize>,
    resizes: Cell<usize>,
    releases: Cell<usize>,
    live_bytes: Cell<usize>,
    behaviour: Cell<AllocBehaviour>,
}

impl TrackingAlloc {
    /// Creates a tracker with zeroed counters and no injected failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the failure injection behaviour.
    pub fn change_behaviour(&self, behaviour: AllocBehaviour) {
        self.behaviour.set(behaviour);
    }

    /// Successful `allocate()` calls.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Successful `resize()` calls.
    pub fn resizes(&self) -> usize {
        self.resizes.get()
    }

    /// `release()` calls.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Blocks currently handed out and not yet released.
    pub fn live_allocations(&self) -> usize {
        self.allocations.get() - self.releases.get()
    }

    /// Bytes currently handed out and not yet released.
    pub fn live_bytes(&self) -> usize {
        self.live_bytes.get()
    }
}

unsafe impl RawAlloc for TrackingAlloc {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if self.behaviour.get() == AllocBehaviour::FailAtAllocate {
            return None;
        }

        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller
        let ptr = unsafe { Heap.allocate(layout) }?;
        self.allocations.set(self.allocations.get() + 1);
        self.live_bytes.set(self.live_bytes.get() + layout.size());

        Some(ptr)
    }

    unsafe fn resize(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if self.behaviour.get() == AllocBehaviour::FailAtResize {
            return None;
        }

        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller
        let new_ptr = unsafe { Heap.resize(ptr, layout, new_size) }?;
        self.resizes.set(self.resizes.get() + 1);
        self.live_bytes
            .set(self.live_bytes.get() - layout.size() + new_size);

        Some(new_ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY (PRECONDITIONS ARE MET): forwarded from the caller
        unsafe { Heap.release(ptr, layout) };
        self.releases.set(self.releases.get() + 1);
        self.live_bytes.set(self.live_bytes.get() - layout.size());
    }
}
