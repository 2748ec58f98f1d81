// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::mem::size_of;
use core::ops::{Deref, DerefMut};

use growbuf_alloc::{AllocError, Heap, INITIAL_CAPACITY, RawAlloc, RawBuf, next_element_capacity};
use growbuf_util::zeroize_raw;

use crate::lookahead::Lookahead;

/// A growable array of `T` stored after a private header in one allocation.
///
/// Capacity doubles whenever a push finds the array full. Slots vacated by
/// [`pop`](Self::pop) or [`clear`](Self::clear) are zeroized, and the whole
/// allocation is zeroized again before it is released.
///
/// Elements are dropped in index order when the array is dropped. Use
/// [`release_with`](Self::release_with) to hand each element to a finalizer
/// instead.
///
/// # Example
///
/// ```rust
/// use growbuf_vec::GrowVec;
/// use growbuf_alloc::AllocError;
///
/// fn example() -> Result<(), AllocError> {
///     let mut stack = GrowVec::new()?;
///     stack.push("A")?;
///     stack.push("B")?;
///     stack.push("C")?;
///
///     assert_eq!(stack.pop(), Some("C"));
///     assert_eq!(stack.pop(), Some("B"));
///     assert_eq!(stack.pop(), Some("A"));
///     assert_eq!(stack.pop(), None);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct GrowVec<T, A: RawAlloc = Heap> {
    raw: RawBuf<T, A>,
}

impl<T> GrowVec<T, Heap> {
    /// Creates an empty array with room for 32 elements.
    pub fn new() -> Result<Self, AllocError> {
        Self::new_in(Heap)
    }

    /// Creates an empty array with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// [`AllocError::CapacityOverflow`] if `capacity` elements plus the header
    /// do not fit the addressable size.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::with_capacity_in(capacity, Heap)
    }
}

impl<T, A: RawAlloc> GrowVec<T, A> {
    /// Creates an empty array in `alloc`.
    pub fn new_in(alloc: A) -> Result<Self, AllocError> {
        Self::with_capacity_in(INITIAL_CAPACITY, alloc)
    }

    /// Creates an empty array in `alloc` with room for `capacity` elements.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        let raw = RawBuf::try_with_capacity_in(capacity, alloc)?;
        Ok(Self { raw })
    }

    /// Size in bytes of one element slot.
    #[inline]
    pub const fn element_size(&self) -> usize {
        size_of::<T>()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Number of elements the array can hold before growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Appends `value` at the end, doubling the capacity if the array is full.
    ///
    /// # Errors
    ///
    /// [`AllocError`] if growth was needed and failed. The array is left
    /// unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        let len = self.len();

        if let Some(new_capacity) = next_element_capacity(self.capacity(), len)? {
            self.raw.grow_to(new_capacity)?;
        }

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): len < capacity after the growth check
            self.raw.as_mut_ptr().add(len).write(value);
            self.raw.set_len(len + 1);
        }

        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the array is
    /// empty. The vacated slot is zeroized.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): slot `last` is initialized and read exactly once
            let slot = self.raw.as_mut_ptr().add(last);
            let value = slot.read();

            zeroize_raw(slot.cast::<u8>(), size_of::<T>());
            self.raw.set_len(last);

            Some(value)
        }
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// The elements, in index order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.raw.as_slice()
    }

    /// The elements, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.raw.as_mut_slice()
    }

    /// Drops every element in index order and zeroizes their slots. Keeps the
    /// capacity.
    pub fn clear(&mut self) {
        let len = self.len();
        let ptr = self.raw.as_mut_ptr();

        unsafe {
            // A panicking element drop leaks the remaining elements rather than
            // dropping them twice.
            self.raw.set_len(0);

            // SAFETY (PRECONDITIONS ARE MET): the first len slots were initialized
            core::ptr::drop_in_place(core::ptr::slice_from_raw_parts_mut(ptr, len));
            zeroize_raw(ptr.cast::<u8>(), len * size_of::<T>());
        }
    }

    /// Iterates over `(current, lookahead)` windows of the elements.
    pub fn lookahead(&self) -> Lookahead<'_, T> {
        Lookahead::new(self.as_slice())
    }

    /// The allocator backing this array.
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Returns `true` if every slot past the last element is zero.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn is_spare_zeroized(&self) -> bool {
        self.raw.is_spare_zeroized()
    }

    /// Drops every element in index order, then zeroizes and deallocates.
    ///
    /// Equivalent to dropping the array.
    pub fn release(self) {
        drop(self);
    }

    /// Moves every element into `finalizer` in index order, then zeroizes and
    /// deallocates.
    ///
    /// If `finalizer` panics, the elements not yet handed over are leaked; the
    /// storage is still released.
    pub fn release_with<F>(mut self, mut finalizer: F)
    where
        F: FnMut(T),
    {
        let len = self.len();
        let ptr = self.raw.as_mut_ptr();

        // SAFETY (PRECONDITIONS ARE MET): ownership of the elements moves to the loop below
        unsafe { self.raw.set_len(0) };

        for index in 0..len {
            // SAFETY (PRECONDITIONS ARE MET): slot `index` is initialized and read exactly once
            let value = unsafe { ptr.add(index).read() };
            finalizer(value);
        }
    }
}

impl<T, A: RawAlloc> Drop for GrowVec<T, A> {
    fn drop(&mut self) {
        // RawBuf zeroizes and releases the storage right after.
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): the slice covers exactly the initialized elements
            core::ptr::drop_in_place(self.raw.as_mut_slice());
        }
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for GrowVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowVec")
            .field("data", &self.as_slice())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T, A: RawAlloc> Deref for GrowVec<T, A> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for GrowVec<T, A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> AsRef<[T]> for GrowVec<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a GrowVec<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: PartialEq, A: RawAlloc, B: RawAlloc> PartialEq<GrowVec<T, B>> for GrowVec<T, A> {
    fn eq(&self, other: &GrowVec<T, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: RawAlloc> Eq for GrowVec<T, A> {}

impl<T: PartialEq, A: RawAlloc> PartialEq<[T]> for GrowVec<T, A> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, A: RawAlloc, const N: usize> PartialEq<[T; N]> for GrowVec<T, A> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}
