//! Dimension collapsing for loop plans.
//!
//! Removes singleton dimensions and merges adjacent loop dimensions that are
//! contiguous for every array, so the traversal kernels run fewer, longer
//! loops.

/// Collapse loop dimensions in place.
///
/// `dims` and `strides` are in loop order (innermost first); `strides[d][k]`
/// is the stride of array `k` along loop dimension `d`.
///
/// 1. Dimensions of size 1 are dropped (they contribute nothing to any offset).
/// 2. Dimension `d + 1` is fused into its inner neighbor `d` when
///    `strides[d + 1][k] == dims[d] * strides[d][k]` for every array `k`. The
///    fused dimension keeps the inner stride.
///
/// Must not be called on empty shapes; a zero dimension would fuse with
/// anything.
pub(crate) fn collapse_dims<const M: usize>(dims: &mut Vec<usize>, strides: &mut Vec<[isize; M]>) {
    debug_assert_eq!(dims.len(), strides.len());
    debug_assert!(!dims.contains(&0));

    // Drop singleton dimensions
    let mut w = 0;
    for d in 0..dims.len() {
        if dims[d] != 1 {
            dims[w] = dims[d];
            strides[w] = strides[d];
            w += 1;
        }
    }
    dims.truncate(w);
    strides.truncate(w);

    if dims.len() <= 1 {
        return;
    }

    // Fuse each outer dimension into the current inner one when possible
    let mut out = 0;
    for d in 1..dims.len() {
        let inner_len = dims[out] as isize;
        let can_merge = (0..M).all(|k| strides[d][k] == inner_len * strides[out][k]);
        if can_merge {
            dims[out] *= dims[d];
        } else {
            out += 1;
            dims[out] = dims[d];
            strides[out] = strides[d];
        }
    }
    dims.truncate(out + 1);
    strides.truncate(out + 1);
}
