// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{GrowVec, Lookahead};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_empty() {
    let items: [u8; 0] = [];
    let mut it = Lookahead::new(&items);

    assert!(it.is_done());
    assert_eq!(it.current(), None);
    assert_eq!(it.peek(), None);
    assert_eq!(it.len(), 0);
    assert_eq!(it.next(), None);
}

#[test]
fn test_single_element() {
    let items = [42];
    let mut it = Lookahead::new(&items);

    assert_eq!(it.current(), Some(&42));
    assert_eq!(it.peek(), None);
    assert_eq!(it.len(), 1);

    assert_eq!(it.advance(), None);
    assert!(it.is_done());
}

#[test]
fn test_two_elements() {
    let items = ['a', 'b'];
    let mut it = Lookahead::new(&items);

    assert_eq!(it.current(), Some(&'a'));
    assert_eq!(it.peek(), Some(&'b'));

    assert_eq!(it.advance(), Some(&'b'));
    assert_eq!(it.peek(), None);

    assert_eq!(it.advance(), None);
    assert!(it.is_done());
}

// =============================================================================
// advance()
// =============================================================================

#[test]
fn test_advance_walks_every_element() {
    let items = [1, 2, 3, 4, 5];
    let mut it = Lookahead::new(&items);
    let mut windows = Vec::new();

    while let Some(current) = it.current() {
        windows.push((*current, it.peek().copied()));
        it.advance();
    }

    assert_eq!(
        windows,
        [(1, Some(2)), (2, Some(3)), (3, Some(4)), (4, Some(5)), (5, None)]
    );
}

#[test]
fn test_advance_past_end_is_noop() {
    let items = [1];
    let mut it = Lookahead::new(&items);

    for _ in 0..5 {
        it.advance();
    }

    assert!(it.is_done());
    assert_eq!(it.peek(), None);
}

// =============================================================================
// Iterator
// =============================================================================

#[test]
fn test_iterator_yields_windows() {
    let items = ["fn", "main", "(", ")"];
    let windows: Vec<_> = Lookahead::new(&items).collect();

    assert_eq!(
        windows,
        [
            (&"fn", Some(&"main")),
            (&"main", Some(&"(")),
            (&"(", Some(&")")),
            (&")", None),
        ]
    );
}

#[test]
fn test_iterator_exact_size() {
    let items = [0u8; 7];
    let mut it = Lookahead::new(&items);

    assert_eq!(it.len(), 7);
    it.next();
    assert_eq!(it.len(), 6);
    assert_eq!(it.by_ref().count(), 6);
    assert_eq!(it.len(), 0);
}

#[test]
fn test_iterator_is_fused() {
    let items = [1, 2];
    let mut it = Lookahead::new(&items);

    assert!(it.next().is_some());
    assert!(it.next().is_some());
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn test_abandon_midway() {
    let items = [1, 2, 3];
    let mut it = Lookahead::new(&items);
    it.advance();

    let fork = it.clone();
    drop(it);

    assert_eq!(fork.current(), Some(&2));
    assert_eq!(fork.count(), 2);
}

// =============================================================================
// GrowVec::lookahead()
// =============================================================================

#[test]
fn test_grow_vec_lookahead_pairs_adjacent_elements() {
    let mut vec = GrowVec::new().expect("Failed to new()");
    for n in [10, 20, 30] {
        vec.push(n).expect("Failed to push(..)");
    }

    let deltas: Vec<i32> = vec
        .lookahead()
        .filter_map(|(current, next)| next.map(|next| next - current))
        .collect();

    assert_eq!(deltas, [10, 10]);
}

#[test]
fn test_grow_vec_lookahead_debug() {
    let mut vec = GrowVec::new().expect("Failed to new()");
    vec.push(1u8).expect("Failed to push(..)");

    assert_eq!(
        format!("{:?}", vec.lookahead()),
        "Lookahead { current: Some(1), lookahead: None, remaining: 0 }"
    );
}
