// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ffi::{CStr, c_char};
use core::fmt;
use core::ops::{Deref, DerefMut};

use growbuf_alloc::{AllocError, Heap, INITIAL_CAPACITY, RawAlloc, RawBuf, next_byte_capacity};
use growbuf_util::{fast_zeroize_slice, zeroize_raw};

use crate::error::StringError;

/// A growable, null-terminated byte string.
///
/// Length and capacity live in a header placed right before the bytes, in the
/// same allocation. The string itself only holds a pointer to the first byte,
/// so [`as_ptr`](Self::as_ptr) can be passed anywhere a C string is expected.
///
/// Content is opaque bytes. A zero byte always follows the last occupied
/// byte, and every byte after it up to the capacity is zero as well.
///
/// When an append needs more room the buffer relocates to
/// `(raw_capacity << 1) + needed`, where the raw capacity includes the
/// terminator slot. Relocation happens in place: there is never a stale copy
/// of the string to misuse.
///
/// # Example
///
/// ```rust
/// use growbuf_string::GrowString;
/// use growbuf_alloc::AllocError;
///
/// fn example() -> Result<(), AllocError> {
///     let mut s = GrowString::from_bytes(b"vince")?;
///     s.push_str(" is cool")?;
///
///     assert_eq!(s, "vince is cool");
///     assert_eq!(s.as_bytes_with_nul().last(), Some(&0));
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct GrowString<A: RawAlloc = Heap> {
    raw: RawBuf<u8, A>,
}

impl GrowString<Heap> {
    /// Creates an empty string with room for 31 bytes plus the terminator.
    pub fn new() -> Result<Self, AllocError> {
        Self::new_in(Heap)
    }

    /// Creates an empty string that can hold `capacity` bytes before growing.
    ///
    /// # Errors
    ///
    /// [`AllocError::CapacityOverflow`] if `capacity` plus the terminator and
    /// header does not fit the addressable size.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::with_capacity_in(capacity, Heap)
    }

    /// Creates a string holding an exact copy of `bytes`, with no spare room.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AllocError> {
        Self::from_bytes_in(bytes, Heap)
    }

    /// Creates a string holding a copy of `s` (terminator excluded).
    pub fn from_c_str(s: &CStr) -> Result<Self, AllocError> {
        Self::from_c_str_in(s, Heap)
    }

    /// Renders `args` into a string sized exactly to the output.
    ///
    /// See [`format_in`](Self::format_in). Usually called through
    /// [`grow_format!`](crate::grow_format).
    pub fn format(args: fmt::Arguments<'_>) -> Result<Self, StringError> {
        Self::format_in(args, Heap)
    }
}

impl<A: RawAlloc> GrowString<A> {
    /// Creates an empty string in `alloc`.
    pub fn new_in(alloc: A) -> Result<Self, AllocError> {
        let raw = RawBuf::try_with_capacity_in(INITIAL_CAPACITY, alloc)?;
        Ok(Self { raw })
    }

    /// Creates an empty string in `alloc` that can hold `capacity` bytes.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        let raw_capacity = capacity
            .checked_add(1)
            .ok_or(AllocError::CapacityOverflow)?;
        let raw = RawBuf::try_with_capacity_in(raw_capacity, alloc)?;

        Ok(Self { raw })
    }

    /// Creates a string in `alloc` holding an exact copy of `bytes`.
    pub fn from_bytes_in(bytes: &[u8], alloc: A) -> Result<Self, AllocError> {
        let mut s = Self::with_capacity_in(bytes.len(), alloc)?;
        s.push_bytes(bytes)?;
        Ok(s)
    }

    /// Creates a string in `alloc` holding a copy of `s` (terminator excluded).
    pub fn from_c_str_in(s: &CStr, alloc: A) -> Result<Self, AllocError> {
        Self::from_bytes_in(s.to_bytes(), alloc)
    }

    /// Renders `args` into a string allocated from `alloc`.
    ///
    /// Formatting runs twice: a first pass only measures the output, then the
    /// string is allocated with exactly that capacity and the second pass
    /// renders into it.
    ///
    /// # Errors
    ///
    /// - [`StringError::Format`] if a formatting trait implementation fails.
    /// - [`StringError::Alloc`] if the storage cannot be obtained.
    pub fn format_in(args: fmt::Arguments<'_>, alloc: A) -> Result<Self, StringError> {
        let mut counter = ByteCounter(0);
        fmt::write(&mut counter, args).map_err(|_| StringError::Format)?;

        let mut s = Self::with_capacity_in(counter.0, alloc)?;
        s.write_args(args)?;

        Ok(s)
    }

    /// Creates an independent copy with its own allocation.
    ///
    /// The copy is sized exactly to the content, like
    /// [`from_bytes`](GrowString::from_bytes).
    pub fn duplicate(&self) -> Result<Self, AllocError>
    where
        A: Clone,
    {
        Self::from_bytes_in(self.as_bytes(), self.raw.allocator().clone())
    }

    /// Grows so that `needed` occupied bytes plus the terminator fit.
    fn reserve_for(&mut self, needed: usize) -> Result<(), AllocError> {
        if let Some(new_capacity) = next_byte_capacity(self.raw.capacity(), needed)? {
            self.raw.grow_to(new_capacity)?;
        }

        debug_assert!(needed < self.raw.capacity());
        Ok(())
    }

    /// Appends one byte.
    ///
    /// # Errors
    ///
    /// [`AllocError`] if growth was needed and failed. The string is left
    /// unchanged in that case.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), AllocError> {
        self.push_bytes(core::slice::from_ref(&byte))
    }

    /// Appends all of `bytes`.
    ///
    /// # Errors
    ///
    /// [`AllocError`] if growth was needed and failed. The string is left
    /// unchanged in that case.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        let len = self.len();
        let needed = len
            .checked_add(bytes.len())
            .ok_or(AllocError::CapacityOverflow)?;

        self.reserve_for(needed)?;

        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): reserve_for guarantees room for `needed` bytes
            // plus the terminator; `bytes` cannot alias self (shared vs exclusive borrow)
            core::ptr::copy_nonoverlapping(
                bytes.as_ptr(),
                self.raw.as_mut_ptr().add(len),
                bytes.len(),
            );
            // The byte at `needed` was past the old length, hence already zero.
            self.raw.set_len(needed);
        }

        Ok(())
    }

    /// Appends the first `n` bytes of `bytes`.
    ///
    /// A truncating copy: `push_bytes_len(b"vincent", 5)` appends `vince`.
    /// If `n` exceeds `bytes.len()` the whole slice is appended.
    pub fn push_bytes_len(&mut self, bytes: &[u8], n: usize) -> Result<(), AllocError> {
        self.push_bytes(&bytes[..n.min(bytes.len())])
    }

    /// Appends the UTF-8 bytes of `s`.
    pub fn push_str(&mut self, s: &str) -> Result<(), AllocError> {
        self.push_bytes(s.as_bytes())
    }

    /// Appends the bytes of `s`, terminator excluded.
    pub fn push_c_str(&mut self, s: &CStr) -> Result<(), AllocError> {
        self.push_bytes(s.to_bytes())
    }

    /// Replaces the whole content with `bytes`.
    ///
    /// Grows only if `bytes` does not fit the current capacity. When the new
    /// content is shorter, the previously occupied tail is zeroized.
    ///
    /// # Errors
    ///
    /// [`AllocError`] if growth was needed and failed. The string is left
    /// unchanged in that case.
    pub fn set(&mut self, bytes: &[u8]) -> Result<(), AllocError> {
        let old_len = self.len();
        let new_len = bytes.len();

        self.reserve_for(new_len)?;

        unsafe {
            let ptr = self.raw.as_mut_ptr();

            // SAFETY (PRECONDITIONS ARE MET): reserve_for guarantees room for new_len + 1 bytes
            core::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr, new_len);

            if old_len > new_len {
                // SAFETY (PRECONDITIONS ARE MET): old_len bytes were occupied, so the range is in bounds
                zeroize_raw(ptr.add(new_len), old_len - new_len);
            }

            self.raw.set_len(new_len);
        }

        Ok(())
    }

    /// Removes all content, zeroizing it. Keeps the capacity.
    pub fn clear(&mut self) {
        unsafe {
            // SAFETY (PRECONDITIONS ARE MET): zero is a valid u8
            fast_zeroize_slice(self.raw.as_mut_slice());
            self.raw.set_len(0);
        }
    }

    /// Number of occupied bytes, terminator excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the string holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Bytes the string can hold before growing, terminator slot excluded.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity() - 1
    }

    /// Bytes that can still be appended before the next growth.
    #[inline]
    pub fn available(&self) -> usize {
        self.raw.capacity() - self.raw.len() - 1
    }

    /// The occupied bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.raw.as_slice()
    }

    /// The occupied bytes, mutably. The terminator is not reachable.
    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        self.raw.as_mut_slice()
    }

    /// The occupied bytes followed by the terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY (PRECONDITIONS ARE MET): len < raw capacity, and the byte at len is an initialized zero
        unsafe { core::slice::from_raw_parts(self.raw.as_ptr(), self.len() + 1) }
    }

    /// Flat pointer to the first byte, valid as a C string until the next
    /// mutation.
    #[inline]
    pub fn as_ptr(&self) -> *const c_char {
        self.raw.as_ptr().cast::<c_char>()
    }

    /// Borrows the content as a `CStr`.
    ///
    /// Returns `None` if the content contains an interior zero byte.
    pub fn as_c_str(&self) -> Option<&CStr> {
        CStr::from_bytes_with_nul(self.as_bytes_with_nul()).ok()
    }

    /// Borrows the content as `str` if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Returns `true` if the terminator and every byte after it are zero.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn is_spare_zeroized(&self) -> bool {
        self.raw.is_spare_zeroized()
    }

    /// The allocator backing this string.
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Zeroizes and deallocates the string.
    ///
    /// Equivalent to dropping it.
    pub fn release(self) {
        drop(self);
    }

    fn write_args(&mut self, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        let mut render = Render {
            target: self,
            error: None,
        };

        fmt::write(&mut render, args).map_err(|_| match render.error {
            Some(e) => StringError::Alloc(e),
            None => StringError::Format,
        })
    }
}

/// Measuring pass of formatted construction.
struct ByteCounter(usize);

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.saturating_add(s.len());
        Ok(())
    }
}

/// Rendering pass of formatted construction. Keeps the allocation error that
/// `fmt::Error` cannot carry.
struct Render<'a, A: RawAlloc> {
    target: &'a mut GrowString<A>,
    error: Option<AllocError>,
}

impl<A: RawAlloc> fmt::Write for Render<'_, A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.target.push_str(s).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}

impl<A: RawAlloc> fmt::Write for GrowString<A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

impl<A: RawAlloc> fmt::Debug for GrowString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowString")
            .field(
                "data",
                &format_args!("\"{}\"", self.as_bytes().escape_ascii()),
            )
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<A: RawAlloc> Deref for GrowString<A> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl<A: RawAlloc> DerefMut for GrowString<A> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_bytes()
    }
}

impl<A: RawAlloc> AsRef<[u8]> for GrowString<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: RawAlloc, B: RawAlloc> PartialEq<GrowString<B>> for GrowString<A> {
    fn eq(&self, other: &GrowString<B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: RawAlloc> Eq for GrowString<A> {}

impl<A: RawAlloc> PartialEq<[u8]> for GrowString<A> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<A: RawAlloc> PartialEq<&[u8]> for GrowString<A> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<A: RawAlloc, const N: usize> PartialEq<[u8; N]> for GrowString<A> {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl<A: RawAlloc, const N: usize> PartialEq<&[u8; N]> for GrowString<A> {
    fn eq(&self, other: &&[u8; N]) -> bool {
        self.as_bytes() == *other
    }
}

impl<A: RawAlloc> PartialEq<str> for GrowString<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: RawAlloc> PartialEq<&str> for GrowString<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
