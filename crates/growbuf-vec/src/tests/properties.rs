// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use proptest::prelude::*;

use crate::{GrowVec, Lookahead};

#[derive(Debug, Clone)]
enum Op {
    Push(u64),
    Pop,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<u64>().prop_map(Op::Push),
            2 => Just(Op::Pop),
        ],
        0..300,
    )
}

proptest! {
    #[test]
    fn behaves_like_a_stack(ops in ops()) {
        let mut vec = GrowVec::with_capacity(1).expect("Failed to with_capacity(..)");
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    vec.push(value).expect("Failed to push(..)");
                    model.push(value);
                }
                Op::Pop => prop_assert_eq!(vec.pop(), model.pop()),
            }

            prop_assert_eq!(vec.as_slice(), model.as_slice());
            prop_assert!(vec.len() <= vec.capacity());
            prop_assert!(vec.is_spare_zeroized());
        }
    }

    #[test]
    fn pops_return_pushes_reversed(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let mut vec = GrowVec::new().expect("Failed to new()");
        for value in &values {
            vec.push(*value).expect("Failed to push(..)");
        }

        let mut popped = Vec::new();
        while let Some(value) = vec.pop() {
            popped.push(value);
        }
        popped.reverse();

        prop_assert_eq!(popped, values);
    }

    #[test]
    fn lookahead_pairs_each_element_with_its_successor(
        values in prop::collection::vec(any::<u16>(), 0..100),
    ) {
        let windows: Vec<_> = Lookahead::new(&values).collect();

        prop_assert_eq!(windows.len(), values.len());
        for (index, (current, next)) in windows.into_iter().enumerate() {
            prop_assert_eq!(*current, values[index]);
            prop_assert_eq!(next, values.get(index + 1));
        }
    }
}
