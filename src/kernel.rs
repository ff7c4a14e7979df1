//! Traversal kernels.
//!
//! Every kernel walks `M` arrays in lockstep and hands the callback the
//! current buffer index of each array. Loop dimensions are given innermost
//! first, together with per-dimension increments from
//! [`compute_increments`](crate::compute_increments) (or strides, for the
//! blocked kernel).
//!
//! [`traverse`] runs hand-unrolled nested loops for ranks up to
//! [`MAX_UNROLLED_RANK`](crate::MAX_UNROLLED_RANK) and falls back to
//! [`traverse_generic`] above that. The generic odometer defines the reference
//! visiting order; the unrolled loops visit the same offsets in the same order.

use crate::increments::fill_increments;

#[inline(always)]
fn advance<const M: usize>(offsets: &mut [isize; M], inc: &[isize; M]) {
    for k in 0..M {
        offsets[k] += inc[k];
    }
}

#[inline(always)]
fn current<const M: usize>(offsets: &[isize; M]) -> [usize; M] {
    offsets.map(|o| o as usize)
}

// ============================================================================
// Unrolled nested loops
// ============================================================================

/// Emit nested loops over the listed loop dimensions, outermost first.
macro_rules! nested_loops {
    ($dims:ident, $inc:ident, $o:ident, $f:ident; $d:tt) => {
        for _ in 0..$dims[$d] {
            $f(current(&$o));
            advance(&mut $o, &$inc[$d]);
        }
    };
    ($dims:ident, $inc:ident, $o:ident, $f:ident; $d:tt, $($rest:tt),+) => {
        for _ in 0..$dims[$d] {
            nested_loops!($dims, $inc, $o, $f; $($rest),+);
            advance(&mut $o, &$inc[$d]);
        }
    };
}

/// Define a kernel of fixed rank.
macro_rules! unrolled_kernel {
    ($name:ident; $($d:tt),+) => {
        #[inline]
        fn $name<const M: usize, F>(
            dims: &[usize],
            offsets: [usize; M],
            inc: &[[isize; M]],
            f: &mut F,
        ) where
            F: FnMut([usize; M]),
        {
            let mut o = offsets.map(|v| v as isize);
            nested_loops!(dims, inc, o, f; $($d),+);
        }
    };
}

unrolled_kernel!(kernel_1d; 0);
unrolled_kernel!(kernel_2d; 1, 0);
unrolled_kernel!(kernel_3d; 2, 1, 0);
unrolled_kernel!(kernel_4d; 3, 2, 1, 0);
unrolled_kernel!(kernel_5d; 4, 3, 2, 1, 0);
unrolled_kernel!(kernel_6d; 5, 4, 3, 2, 1, 0);
unrolled_kernel!(kernel_7d; 6, 5, 4, 3, 2, 1, 0);
unrolled_kernel!(kernel_8d; 7, 6, 5, 4, 3, 2, 1, 0);
unrolled_kernel!(kernel_9d; 8, 7, 6, 5, 4, 3, 2, 1, 0);
unrolled_kernel!(kernel_10d; 9, 8, 7, 6, 5, 4, 3, 2, 1, 0);

/// Visit every element of `M` arrays sharing the loop shape `dims`.
///
/// # Arguments
/// * `dims` - Loop dimensions, innermost first
/// * `offsets` - Buffer index of the first element of each array
/// * `increments` - `increments[d][k]` is the odometer increment of array `k`
///   along loop dimension `d`
/// * `f` - Called once per element with the buffer index of each array
///
/// Rank 0 calls `f` exactly once; any zero dimension means no calls.
pub fn traverse<const M: usize, F>(
    dims: &[usize],
    offsets: [usize; M],
    increments: &[[isize; M]],
    mut f: F,
) where
    F: FnMut([usize; M]),
{
    debug_assert_eq!(dims.len(), increments.len());
    if dims.contains(&0) {
        return;
    }
    match dims.len() {
        0 => f(offsets),
        1 => kernel_1d(dims, offsets, increments, &mut f),
        2 => kernel_2d(dims, offsets, increments, &mut f),
        3 => kernel_3d(dims, offsets, increments, &mut f),
        4 => kernel_4d(dims, offsets, increments, &mut f),
        5 => kernel_5d(dims, offsets, increments, &mut f),
        6 => kernel_6d(dims, offsets, increments, &mut f),
        7 => kernel_7d(dims, offsets, increments, &mut f),
        8 => kernel_8d(dims, offsets, increments, &mut f),
        9 => kernel_9d(dims, offsets, increments, &mut f),
        10 => kernel_10d(dims, offsets, increments, &mut f),
        _ => traverse_generic(dims, offsets, increments, f),
    }
}

// ============================================================================
// Generic odometer
// ============================================================================

/// Rank-independent traversal with the same contract as [`traverse`].
///
/// Keeps one counter per loop dimension. After each element the innermost
/// counter advances; a counter that reaches its extent resets and carries
/// into the next dimension.
pub fn traverse_generic<const M: usize, F>(
    dims: &[usize],
    offsets: [usize; M],
    increments: &[[isize; M]],
    mut f: F,
) where
    F: FnMut([usize; M]),
{
    debug_assert_eq!(dims.len(), increments.len());
    let rank = dims.len();
    if dims.contains(&0) {
        return;
    }
    if rank == 0 {
        f(offsets);
        return;
    }

    let mut o = offsets.map(|v| v as isize);
    let mut counter = vec![0usize; rank];
    loop {
        f(current(&o));
        let mut d = 0;
        loop {
            advance(&mut o, &increments[d]);
            counter[d] += 1;
            if counter[d] < dims[d] {
                break;
            }
            counter[d] = 0;
            d += 1;
            if d == rank {
                return;
            }
        }
    }
}

// ============================================================================
// Blocked traversal
// ============================================================================

/// Tile size in elements for the given element widths.
///
/// The widest known element decides; when no width is known (generic
/// buffers) the size is [`BLOCK_SIZE_IN_ELEMENTS`](crate::BLOCK_SIZE_IN_ELEMENTS).
pub fn block_size(bytes_per_element: &[Option<usize>]) -> usize {
    match bytes_per_element.iter().flatten().max() {
        Some(&bytes) if bytes > 0 => (crate::BLOCK_SIZE_IN_BYTES / bytes).max(1),
        _ => crate::BLOCK_SIZE_IN_ELEMENTS,
    }
}

/// Visit every element tile by tile.
///
/// Each loop dimension is cut into tiles of at most `block_size` elements and
/// the tiles are walked with [`traverse`], so arrays whose preferred loop
/// orders conflict still touch a bounded working set. Unlike the other
/// kernels this one takes strides, not increments, because edge tiles have
/// their own increments.
///
/// Every element is visited exactly once, but in tile order rather than the
/// order of [`traverse`].
pub fn traverse_blocked<const M: usize, F>(
    dims: &[usize],
    offsets: [usize; M],
    strides: &[[isize; M]],
    block_size: usize,
    mut f: F,
) where
    F: FnMut([usize; M]),
{
    debug_assert_eq!(dims.len(), strides.len());
    let rank = dims.len();
    if dims.contains(&0) {
        return;
    }
    if rank == 0 {
        f(offsets);
        return;
    }

    let bsize = block_size.max(1);
    let mut origin = vec![0usize; rank];
    let mut tile = vec![0usize; rank];
    let mut tile_inc = vec![[0isize; M]; rank];
    loop {
        let mut base = offsets.map(|v| v as isize);
        for d in 0..rank {
            tile[d] = bsize.min(dims[d] - origin[d]);
            for k in 0..M {
                base[k] += origin[d] as isize * strides[d][k];
            }
        }
        fill_increments(&tile, strides, &mut tile_inc);
        traverse(&tile, current(&base), &tile_inc, &mut f);

        let mut d = 0;
        loop {
            origin[d] += bsize;
            if origin[d] < dims[d] {
                break;
            }
            origin[d] = 0;
            d += 1;
            if d == rank {
                return;
            }
        }
    }
}

// ============================================================================
// Index-tracking traversal
// ============================================================================

/// Visit every element while tracking its logical subscripts.
///
/// `perm[d]` names the array dimension walked by loop dimension `d`; the
/// callback receives subscripts in array dimension order (not loop order)
/// along with the buffer indices. Loop dimensions must not have been
/// collapsed.
pub fn traverse_indexed<const M: usize, F>(
    dims: &[usize],
    perm: &[usize],
    offsets: [usize; M],
    increments: &[[isize; M]],
    mut f: F,
) where
    F: FnMut(&[usize], [usize; M]),
{
    debug_assert_eq!(dims.len(), perm.len());
    debug_assert_eq!(dims.len(), increments.len());
    let rank = dims.len();
    if dims.contains(&0) {
        return;
    }
    if rank == 0 {
        f(&[], offsets);
        return;
    }

    let mut o = offsets.map(|v| v as isize);
    let mut index = vec![0usize; rank];
    loop {
        f(&index, current(&o));
        let mut d = 0;
        loop {
            advance(&mut o, &increments[d]);
            let axis = perm[d];
            index[axis] += 1;
            if index[axis] < dims[d] {
                break;
            }
            index[axis] = 0;
            d += 1;
            if d == rank {
                return;
            }
        }
    }
}
