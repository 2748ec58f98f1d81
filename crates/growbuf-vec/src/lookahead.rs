// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Two-element sliding window over a slice.

use core::fmt;
use core::iter::FusedIterator;
use core::mem;
use core::slice;

/// Walks a slice exposing the current element and the one after it.
///
/// Construction primes the window: [`current`](Self::current) is the first
/// element and [`peek`](Self::peek) the second. Every
/// [`advance`](Self::advance) shifts the lookahead into the current position
/// and loads the next element. The bound is fixed when the iterator is
/// created; the borrow keeps the slice from changing underneath.
///
/// As an [`Iterator`] it yields `(current, lookahead)` pairs, one per element.
///
/// # Example
///
/// ```rust
/// use growbuf_vec::Lookahead;
///
/// let tokens = ["let", "x", "=", "1"];
/// let mut it = Lookahead::new(&tokens);
///
/// assert_eq!(it.current(), Some(&"let"));
/// assert_eq!(it.peek(), Some(&"x"));
///
/// it.advance();
/// assert_eq!(it.current(), Some(&"x"));
/// assert_eq!(it.peek(), Some(&"="));
///
/// let rest: Vec<_> = it.collect();
/// assert_eq!(rest, [(&"x", Some(&"=")), (&"=", Some(&"1")), (&"1", None)]);
/// ```
pub struct Lookahead<'a, T> {
    rest: slice::Iter<'a, T>,
    current: Option<&'a T>,
    lookahead: Option<&'a T>,
}

impl<'a, T> Lookahead<'a, T> {
    /// Creates a primed iterator over `items`.
    pub fn new(items: &'a [T]) -> Self {
        let mut it = Self {
            rest: items.iter(),
            current: None,
            lookahead: None,
        };

        it.advance();
        it.advance();
        it
    }

    /// The element at the current position, or `None` once exhausted.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        self.current
    }

    /// The element after the current one, or `None` at the end.
    #[inline]
    pub fn peek(&self) -> Option<&'a T> {
        self.lookahead
    }

    /// Returns `true` once every element has been passed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Shifts the window by one element.
    ///
    /// Returns the new current element. Advancing an exhausted iterator does
    /// nothing.
    pub fn advance(&mut self) -> Option<&'a T> {
        self.current = mem::replace(&mut self.lookahead, self.rest.next());
        self.current
    }
}

impl<'a, T> Iterator for Lookahead<'a, T> {
    type Item = (&'a T, Option<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        let window = (self.current?, self.lookahead);
        self.advance();
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.current.is_some())
            + usize::from(self.lookahead.is_some())
            + self.rest.len();

        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Lookahead<'_, T> {}

impl<T> FusedIterator for Lookahead<'_, T> {}

impl<T> Clone for Lookahead<'_, T> {
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
            current: self.current,
            lookahead: self.lookahead,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Lookahead<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookahead")
            .field("current", &self.current)
            .field("lookahead", &self.lookahead)
            .field("remaining", &self.rest.len())
            .finish()
    }
}
