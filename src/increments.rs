//! Offset increments for odometer-style traversal.
//!
//! Given loop dimensions ordered innermost first, the increment of dimension
//! `d` is the amount added to a running buffer offset when the loop over `d`
//! advances, after every loop inside it has run to completion:
//!
//! ```text
//! inc[0] = s[0]
//! inc[d] = s[d] - shape[d-1] * s[d-1]
//! ```
//!
//! Adding `inc[0]` once per innermost step and `inc[d]` once per step of loop
//! `d` leaves the running offset at `offset + sum(i[d] * s[d])`. Negative and
//! zero strides need no special handling.

/// Compute odometer increments for one array.
///
/// # Arguments
/// * `shape` - Loop dimensions, innermost first
/// * `strides` - Strides permuted into the same order
pub fn compute_increments(shape: &[usize], strides: &[isize]) -> Vec<isize> {
    debug_assert_eq!(shape.len(), strides.len());
    let mut inc = Vec::with_capacity(shape.len());
    for d in 0..shape.len() {
        if d == 0 {
            inc.push(strides[0]);
        } else {
            inc.push(strides[d] - shape[d - 1] as isize * strides[d - 1]);
        }
    }
    inc
}

/// Compute odometer increments for `M` arrays at once into `out`.
///
/// `strides[d][k]` is the stride of array `k` along loop dimension `d`.
/// Writing into a caller-owned buffer lets the blocked kernel recompute
/// increments per tile without allocating.
pub(crate) fn fill_increments<const M: usize>(
    shape: &[usize],
    strides: &[[isize; M]],
    out: &mut [[isize; M]],
) {
    debug_assert_eq!(shape.len(), strides.len());
    debug_assert_eq!(shape.len(), out.len());
    for d in 0..shape.len() {
        for k in 0..M {
            out[d][k] = if d == 0 {
                strides[0][k]
            } else {
                strides[d][k] - shape[d - 1] as isize * strides[d - 1][k]
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increments_row_major() {
        // Row-major [2, 3] permuted innermost first: shape [3, 2], strides [1, 3]
        assert_eq!(compute_increments(&[3, 2], &[1, 3]), vec![1, 0]);
    }

    #[test]
    fn test_increments_padded() {
        // Rows of length 3 stored with a pitch of 5
        assert_eq!(compute_increments(&[3, 2], &[1, 5]), vec![1, 2]);
    }

    #[test]
    fn test_increments_negative_stride() {
        assert_eq!(compute_increments(&[3, 2], &[-1, 3]), vec![-1, 6]);
        assert_eq!(compute_increments(&[4], &[-2]), vec![-2]);
    }

    #[test]
    fn test_increments_zero_stride() {
        // Broadcast along the inner dimension rewinds nothing
        assert_eq!(compute_increments(&[3, 2], &[0, 1]), vec![0, 1]);
        // Broadcast along the outer dimension rewinds the inner walk
        assert_eq!(compute_increments(&[3, 2], &[1, 0]), vec![1, -3]);
    }

    #[test]
    fn test_increments_empty() {
        assert!(compute_increments(&[], &[]).is_empty());
    }

    #[test]
    fn test_increments_reach_every_offset() {
        let shape = [2, 3, 4];
        let strides = [7, -2, 11];
        let inc = compute_increments(&shape, &strides);
        let mut offset = 30isize;
        for i2 in 0..shape[2] {
            for i1 in 0..shape[1] {
                for i0 in 0..shape[0] {
                    let expected =
                        30 + i0 as isize * strides[0] + i1 as isize * strides[1] + i2 as isize * strides[2];
                    assert_eq!(offset, expected);
                    offset += inc[0];
                }
                offset += inc[1];
            }
            offset += inc[2];
        }
    }

    #[test]
    fn test_fill_increments_matches_single() {
        let shape = [3, 4];
        let strides = [[1, 4], [3, -1]];
        let mut out = [[0isize; 2]; 2];
        fill_increments(&shape, &strides, &mut out);
        assert_eq!(
            compute_increments(&shape, &[1, 3]),
            vec![out[0][0], out[1][0]]
        );
        assert_eq!(
            compute_increments(&shape, &[4, -1]),
            vec![out[0][1], out[1][1]]
        );
    }
}
