// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::mem::{align_of, size_of};

use growbuf_util::{fill_bytes_with_pattern, is_raw_zeroized};

use crate::{AllocBehaviour, AllocError, RawBuf, TrackingAlloc};

fn push<T, A: crate::RawAlloc>(buf: &mut RawBuf<T, A>, value: T) {
    let len = buf.len();
    assert!(len < buf.capacity());
    unsafe {
        buf.as_mut_ptr().add(len).write(value);
        buf.set_len(len + 1);
    }
}

// =============================================================================
// layout / OFFSET
// =============================================================================

#[test]
fn test_offset_is_header_size_for_small_alignment() {
    assert_eq!(RawBuf::<u8>::OFFSET, 2 * size_of::<usize>());
    assert_eq!(RawBuf::<u64>::OFFSET, 2 * size_of::<usize>());
}

#[test]
fn test_offset_respects_large_alignment() {
    #[repr(align(64))]
    struct Wide(#[allow(dead_code)] [u8; 64]);

    assert_eq!(RawBuf::<Wide>::OFFSET, 64);

    let buf = RawBuf::<Wide>::try_with_capacity(2).expect("Failed to try_with_capacity(..)");
    assert_eq!(buf.as_ptr() as usize % align_of::<Wide>(), 0);
}

#[test]
fn test_layout_for_includes_header() {
    let layout = RawBuf::<u32>::layout_for(10).expect("Failed to layout_for(..)");
    assert_eq!(layout.size(), RawBuf::<u32>::OFFSET + 40);
}

#[test]
fn test_layout_for_rejects_overflow() {
    assert_eq!(
        RawBuf::<u8>::layout_for(usize::MAX - 2).unwrap_err(),
        AllocError::CapacityOverflow
    );
    assert_eq!(
        RawBuf::<u64>::layout_for(usize::MAX / 4).unwrap_err(),
        AllocError::CapacityOverflow
    );
    // Fits in usize but not in isize.
    assert_eq!(
        RawBuf::<u8>::layout_for(isize::MAX as usize).unwrap_err(),
        AllocError::CapacityOverflow
    );
}

// =============================================================================
// try_with_capacity()
// =============================================================================

#[test]
fn test_try_with_capacity_is_empty_and_zeroed() {
    let buf = RawBuf::<u8>::try_with_capacity(32).expect("Failed to try_with_capacity(..)");

    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 32);
    assert!(unsafe { is_raw_zeroized(buf.as_ptr(), 32) });
}

#[test]
fn test_try_with_capacity_overflow_does_not_allocate() {
    let tracker = TrackingAlloc::new();

    let result = RawBuf::<u8, _>::try_with_capacity_in(usize::MAX - 2, &tracker);

    assert_eq!(result.unwrap_err(), AllocError::CapacityOverflow);
    assert_eq!(tracker.allocations(), 0);
}

#[test]
fn test_try_with_capacity_allocator_failure() {
    let tracker = TrackingAlloc::new();
    tracker.change_behaviour(AllocBehaviour::FailAtAllocate);

    let result = RawBuf::<u64, _>::try_with_capacity_in(4, &tracker);

    assert_eq!(
        result.unwrap_err(),
        AllocError::OutOfMemory {
            size: RawBuf::<u64>::OFFSET + 32
        }
    );
    assert_eq!(tracker.live_allocations(), 0);
}

#[test]
fn test_zero_capacity_allocates_header_only() {
    let buf = RawBuf::<u32>::try_with_capacity(0).expect("Failed to try_with_capacity(..)");

    assert_eq!(buf.capacity(), 0);
    assert!(buf.as_slice().is_empty());
}

// =============================================================================
// grow_to()
// =============================================================================

#[test]
fn test_grow_to_preserves_elements() {
    let mut buf = RawBuf::<u32>::try_with_capacity(2).expect("Failed to try_with_capacity(..)");
    push(&mut buf, 7);
    push(&mut buf, 9);

    buf.grow_to(16).expect("Failed to grow_to(..)");

    assert_eq!(buf.capacity(), 16);
    assert_eq!(buf.as_slice(), &[7, 9]);
}

#[test]
fn test_grow_to_zero_fills_exposed_bytes() {
    let mut buf = RawBuf::<u8>::try_with_capacity(8).expect("Failed to try_with_capacity(..)");
    push(&mut buf, b'a');

    buf.grow_to(4096).expect("Failed to grow_to(..)");

    let spare = unsafe { buf.as_ptr().add(1) };
    assert!(unsafe { is_raw_zeroized(spare, 4095) });
    assert!(buf.is_spare_zeroized());
}

#[test]
fn test_is_spare_zeroized_detects_dirty_bytes() {
    let mut buf = RawBuf::<u16>::try_with_capacity(4).expect("Failed to try_with_capacity(..)");
    push(&mut buf, 1);
    assert!(buf.is_spare_zeroized());

    // Write past len without publishing it.
    unsafe { buf.as_mut_ptr().add(3).write(0xBEEF) };
    assert!(!buf.is_spare_zeroized());
}

#[test]
fn test_grow_to_overflow_leaves_buffer_intact() {
    let tracker = TrackingAlloc::new();
    let mut buf =
        RawBuf::<u8, _>::try_with_capacity_in(4, &tracker).expect("Failed to try_with_capacity_in(..)");
    push(&mut buf, 1);

    assert_eq!(
        buf.grow_to(usize::MAX).unwrap_err(),
        AllocError::CapacityOverflow
    );
    assert_eq!(buf.capacity(), 4);
    assert_eq!(buf.as_slice(), &[1]);
    assert_eq!(tracker.resizes(), 0);
}

#[test]
fn test_grow_to_resize_failure_leaves_buffer_intact() {
    let tracker = TrackingAlloc::new();
    let mut buf =
        RawBuf::<u16, _>::try_with_capacity_in(2, &tracker).expect("Failed to try_with_capacity_in(..)");
    push(&mut buf, 11);
    push(&mut buf, 22);

    tracker.change_behaviour(AllocBehaviour::FailAtResize);

    assert!(matches!(
        buf.grow_to(4),
        Err(AllocError::OutOfMemory { .. })
    ));
    assert_eq!(buf.capacity(), 2);
    assert_eq!(buf.as_slice(), &[11, 22]);

    drop(buf);
    assert_eq!(tracker.live_allocations(), 0);
}

// =============================================================================
// as_mut_slice()
// =============================================================================

#[test]
fn test_as_mut_slice_writes_through() {
    let mut buf = RawBuf::<u8>::try_with_capacity(4).expect("Failed to try_with_capacity(..)");
    push(&mut buf, 0);
    push(&mut buf, 0);

    fill_bytes_with_pattern(buf.as_mut_slice(), 0x5A);

    assert_eq!(buf.as_slice(), &[0x5A, 0x5A]);
}

// =============================================================================
// drop
// =============================================================================

#[test]
fn test_drop_releases_exactly_once() {
    let tracker = TrackingAlloc::new();

    {
        let mut buf = RawBuf::<u64, _>::try_with_capacity_in(1, &tracker)
            .expect("Failed to try_with_capacity_in(..)");
        buf.grow_to(2).expect("Failed to grow_to(..)");
        buf.grow_to(4).expect("Failed to grow_to(..)");

        assert_eq!(tracker.live_allocations(), 1);
        assert_eq!(tracker.live_bytes(), RawBuf::<u64>::OFFSET + 32);
    }

    assert_eq!(tracker.allocations(), 1);
    assert_eq!(tracker.resizes(), 2);
    assert_eq!(tracker.releases(), 1);
    assert_eq!(tracker.live_bytes(), 0);
}

#[test]
fn test_debug_does_not_dump_payload() {
    let buf = RawBuf::<u8>::try_with_capacity(3).expect("Failed to try_with_capacity(..)");
    let debug = format!("{:?}", buf);

    assert!(debug.contains("len: 0"));
    assert!(debug.contains("capacity: 3"));
}
