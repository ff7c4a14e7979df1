//! Property-based tests for the traversal engine.
//!
//! The unrolled, blocked, and generic kernels must visit exactly the same
//! buffer offsets as a brute-force enumeration, for any shape and any stride
//! signs.

use proptest::prelude::*;
use strided_traverse::index::{bind2vind, vind2bind};
use strided_traverse::layout::{numel, stride_to_offset};
use strided_traverse::{
    compute_increments, loop_order, traverse, traverse_blocked, traverse_generic, unary_into,
    ArrayView, IndexMode, Order, StridedArray,
};

// ============================================================================
// Test Utilities
// ============================================================================

/// Shapes with strides of either sign, each dimension 0..=3 long.
fn layout_strategy(max_rank: usize) -> impl Strategy<Value = (Vec<usize>, Vec<isize>)> {
    (0..=max_rank).prop_flat_map(|rank| {
        (
            prop::collection::vec(0usize..=3, rank),
            prop::collection::vec(-6isize..=6, rank),
        )
    })
}

/// Offset that keeps every addressed index non-negative.
fn base_offset(dims: &[usize], strides: &[isize]) -> usize {
    dims.iter()
        .zip(strides)
        .map(|(&n, &s)| if n == 0 { 0 } else { stride_to_offset(n, s) })
        .sum()
}

/// Every buffer offset of the layout, by explicit subscript enumeration.
fn brute_force(dims: &[usize], strides: &[isize], offset: usize) -> Vec<usize> {
    let total = numel(dims);
    let mut out = Vec::with_capacity(total);
    if dims.contains(&0) {
        return out;
    }
    let mut idx = vec![0usize; dims.len()];
    for _ in 0..total {
        let o = idx
            .iter()
            .zip(strides)
            .fold(offset as isize, |acc, (&i, &s)| acc + i as isize * s);
        out.push(o as usize);
        for d in 0..dims.len() {
            idx[d] += 1;
            if idx[d] < dims[d] {
                break;
            }
            idx[d] = 0;
        }
    }
    out.sort_unstable();
    out
}

fn as_rows(v: &[isize]) -> Vec<[isize; 1]> {
    v.iter().map(|&x| [x]).collect()
}

fn sorted(mut v: Vec<usize>) -> Vec<usize> {
    v.sort_unstable();
    v
}

// ============================================================================
// Kernel Equivalence
// ============================================================================

proptest! {
    /// Property: nested, generic, and blocked kernels visit the same offsets
    #[test]
    fn prop_kernels_agree((dims, strides) in layout_strategy(7), block in 1usize..5) {
        let offset = base_offset(&dims, &strides);
        let expected = brute_force(&dims, &strides, offset);
        let inc = as_rows(&compute_increments(&dims, &strides));

        let mut nested = Vec::new();
        traverse(&dims, [offset], &inc, |[o]| nested.push(o));
        prop_assert_eq!(sorted(nested), expected.clone());

        let mut generic = Vec::new();
        traverse_generic(&dims, [offset], &inc, |[o]| generic.push(o));
        prop_assert_eq!(sorted(generic), expected.clone());

        let mut blocked = Vec::new();
        traverse_blocked(&dims, [offset], &as_rows(&strides), block, |[o]| blocked.push(o));
        prop_assert_eq!(sorted(blocked), expected);
    }

    /// Property: nested and generic kernels agree in visiting order too
    #[test]
    fn prop_nested_matches_generic_order((dims, strides) in layout_strategy(7)) {
        let offset = base_offset(&dims, &strides);
        let inc = as_rows(&compute_increments(&dims, &strides));
        let mut nested = Vec::new();
        traverse(&dims, [offset], &inc, |[o]| nested.push(o));
        let mut generic = Vec::new();
        traverse_generic(&dims, [offset], &inc, |[o]| generic.push(o));
        prop_assert_eq!(nested, generic);
    }

    /// Property: ranks above the unrolled kernels fall back correctly
    #[test]
    fn prop_high_rank(
        dims in prop::collection::vec(1usize..=2, 11..=12),
        signs in prop::collection::vec(any::<bool>(), 12),
    ) {
        let mut strides = Vec::with_capacity(dims.len());
        let mut acc = 1isize;
        for (d, &n) in dims.iter().enumerate() {
            strides.push(if signs[d] { acc } else { -acc });
            acc *= n as isize;
        }
        let offset = base_offset(&dims, &strides);
        let inc = as_rows(&compute_increments(&dims, &strides));
        let mut seen = Vec::new();
        traverse(&dims, [offset], &inc, |[o]| seen.push(o));
        let total = numel(&dims);
        prop_assert_eq!(sorted(seen), (0..total).collect::<Vec<_>>());
    }
}

// ============================================================================
// Planning and Mapping
// ============================================================================

proptest! {
    /// Property: loop order is a deterministic permutation
    #[test]
    fn prop_loop_order_is_permutation((dims, strides) in layout_strategy(8)) {
        let perm = loop_order(&dims, &strides, None);
        prop_assert_eq!(sorted(perm.clone()), (0..dims.len()).collect::<Vec<_>>());
        prop_assert_eq!(perm, loop_order(&dims, &strides, None));
    }

    /// Property: copying any strided view reproduces it element by element
    #[test]
    fn prop_copy_matches_get(
        (dims, strides) in layout_strategy(5),
        order in prop_oneof![Just(Order::RowMajor), Just(Order::ColumnMajor)],
    ) {
        let offset = base_offset(&dims, &strides);
        let len = brute_force(&dims, &strides, offset).last().map_or(offset + 1, |&m| m + 1);
        let data: Vec<f64> = (0..len).map(|v| v as f64).collect();
        let x = ArrayView::<f64>::new(&data, &dims, &strides, offset, order).unwrap();
        let mut out = StridedArray::<f64>::zeros(&dims, order);
        unary_into(&x, &mut out.view_mut(), |v| v).unwrap();
        let y = out.view();
        let mut idx = vec![0usize; dims.len()];
        for _ in 0..out.len() {
            prop_assert_eq!(y.get(&idx), x.get(&idx));
            for d in 0..dims.len() {
                idx[d] += 1;
                if idx[d] < dims[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
    }

    /// Property: bind2vind inverts vind2bind for distinct-address views
    #[test]
    fn prop_vind_bind_inverse(
        dims in prop::collection::vec(1usize..=4, 1..=4),
        signs in prop::collection::vec(any::<bool>(), 4),
        order in prop_oneof![Just(Order::RowMajor), Just(Order::ColumnMajor)],
    ) {
        let mut strides = strided_traverse::layout::shape_to_strides(&dims, order);
        for (s, &positive) in strides.iter_mut().zip(&signs) {
            if !positive {
                *s = -*s;
            }
        }
        let offset = base_offset(&dims, &strides);
        for v in 0..numel(&dims) as isize {
            let b = vind2bind(&dims, &strides, offset, order, v, IndexMode::Throw).unwrap();
            let back = bind2vind(&dims, &strides, offset, order, b as isize, IndexMode::Throw).unwrap();
            prop_assert_eq!(back as isize, v);
        }
    }
}
