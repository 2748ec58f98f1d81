// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use growbuf_util::{
    fast_zeroize_slice, fill_bytes_with_pattern, is_raw_zeroized, is_slice_zeroized, zeroize_raw,
};

// =============================================================================
// zeroize_raw()
// =============================================================================

#[test]
fn test_zeroize_raw_clears_range_only() {
    let mut data = [0xFFu8; 16];

    unsafe { zeroize_raw(data.as_mut_ptr().add(4), 8) };

    assert!(data[..4].iter().all(|&b| b == 0xFF));
    assert!(is_slice_zeroized(&data[4..12]));
    assert!(data[12..].iter().all(|&b| b == 0xFF));
}

#[test]
fn test_zeroize_raw_zero_len_is_noop() {
    let mut data = [0xAAu8; 4];

    unsafe { zeroize_raw(data.as_mut_ptr(), 0) };

    assert_eq!(data, [0xAA; 4]);
}

// =============================================================================
// fast_zeroize_slice()
// =============================================================================

#[test]
fn test_fast_zeroize_slice_u64() {
    let mut data = [u64::MAX; 32];

    unsafe { fast_zeroize_slice(&mut data) };

    assert!(data.iter().all(|&v| v == 0));
}

#[test]
fn test_fast_zeroize_slice_empty() {
    let mut data: [u32; 0] = [];

    unsafe { fast_zeroize_slice(&mut data) };

    assert!(data.is_empty());
}

// =============================================================================
// is_raw_zeroized() / fill_bytes_with_pattern()
// =============================================================================

#[test]
fn test_is_raw_zeroized_detects_pattern() {
    let mut data = [0u8; 64];
    assert!(unsafe { is_raw_zeroized(data.as_ptr(), data.len()) });

    fill_bytes_with_pattern(&mut data[10..11], 0x01);
    assert!(!unsafe { is_raw_zeroized(data.as_ptr(), data.len()) });
    assert!(unsafe { is_raw_zeroized(data.as_ptr(), 10) });
}

#[test]
fn test_is_raw_zeroized_empty_range() {
    let data = [0xFFu8; 1];
    assert!(unsafe { is_raw_zeroized(data.as_ptr(), 0) });
}
