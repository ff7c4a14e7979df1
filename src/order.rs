//! Loop-order planning.
//!
//! Picks the dimension permutation used by the traversal kernels so that the
//! innermost loop walks the primary array with its smallest stride.

use crate::auxiliary::index_order;

/// Compute the loop order for a traversal, innermost dimension first.
///
/// Dimensions are sorted by ascending absolute stride of `primary`. Ties are
/// broken by the rank of the dimension's stride in `secondary` (see
/// [`index_order`]), then by dimension index. The sort is stable, so equal
/// inputs always produce the same permutation.
///
/// Arrays whose preferred orders disagree still traverse correctly; only the
/// secondary array's cache behavior suffers.
///
/// # Arguments
/// * `shape` - Shared shape of every array in the traversal
/// * `primary` - Strides of the array whose access pattern wins
/// * `secondary` - Optional strides used to break ties
///
/// # Returns
/// A permutation of `0..shape.len()`; `perm[0]` is the innermost loop.
pub fn loop_order(shape: &[usize], primary: &[isize], secondary: Option<&[isize]>) -> Vec<usize> {
    let rank = shape.len();
    debug_assert_eq!(primary.len(), rank);
    if rank <= 1 {
        return (0..rank).collect();
    }

    let tie_rank = secondary.map(index_order);

    let mut perm: Vec<usize> = (0..rank).collect();
    perm.sort_by(|&a, &b| {
        let by_primary = primary[a].unsigned_abs().cmp(&primary[b].unsigned_abs());
        let by_secondary = match &tie_rank {
            Some(r) => r[a].cmp(&r[b]),
            None => std::cmp::Ordering::Equal,
        };
        by_primary.then(by_secondary).then_with(|| a.cmp(&b))
    });
    perm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_order_row_major() {
        // Row-major [2, 3, 4]: last dimension has the smallest stride
        let order = loop_order(&[2, 3, 4], &[12, 4, 1], None);
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_loop_order_column_major() {
        let order = loop_order(&[2, 3, 4], &[1, 2, 6], None);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_loop_order_negative_strides() {
        // Sign does not matter, only magnitude
        let order = loop_order(&[2, 3, 4], &[-12, 4, -1], None);
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_loop_order_permuted() {
        let order = loop_order(&[4, 2, 3], &[1, 12, 4], None);
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_loop_order_tie_broken_by_secondary() {
        // Primary is a broadcast scalar: all strides tie at zero
        let order = loop_order(&[2, 3], &[0, 0], Some(&[3, 1]));
        assert_eq!(order, vec![1, 0]);

        let order = loop_order(&[2, 3], &[0, 0], Some(&[1, 2]));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_loop_order_tie_broken_by_index() {
        let order = loop_order(&[2, 2, 2], &[1, 1, 1], None);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_loop_order_partial_broadcast() {
        // x broadcast along dim 0: stride 0 sorts innermost
        let order = loop_order(&[5, 3], &[0, 1], Some(&[3, 1]));
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_loop_order_small_ranks() {
        assert!(loop_order(&[], &[], None).is_empty());
        assert_eq!(loop_order(&[7], &[-3], None), vec![0]);
    }

    #[test]
    fn test_loop_order_deterministic() {
        let shape = [3, 1, 4, 1, 5];
        let strides = [20, 20, 5, 5, 1];
        let secondary = [1, 3, 3, 12, 12];
        let first = loop_order(&shape, &strides, Some(&secondary));
        for _ in 0..10 {
            assert_eq!(loop_order(&shape, &strides, Some(&secondary)), first);
        }
        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }
}
