//! One-dimensional strided kernels.
//!
//! These take BLAS-like argument lists: an element count `n`, then for each
//! array its buffer, stride, and the buffer index of its first element.
//! Negative strides walk backwards from the offset; use
//! [`stride_to_offset`](crate::layout::stride_to_offset) to get the usual
//! offset for a reversed walk over a whole buffer. With `n == 0` nothing is
//! read or written.
//!
//! Each kernel wraps the buffers in rank-1 views, so descriptors are checked
//! against buffer lengths before the first callback.
//!
//! # Example
//! ```rust
//! use strided_traverse::strided;
//!
//! let x = [1.0, 2.0, 3.0, 4.0];
//! let mut y = [0.0; 4];
//! // y[0], y[2] = x[3], x[2] * 10 (x walked backwards)
//! strided::unary(2, &x, -1, 3, &mut y, 2, 0, |v: f64| v * 10.0).unwrap();
//! assert_eq!(y, [40.0, 0.0, 30.0, 0.0]);
//! ```

use crate::accessor::{Accessor, Generic, Mutator};
use crate::layout::Order;
use crate::map;
use crate::plan::LoopPlan;
use crate::view::{StridedView, StridedViewMut};
use crate::Result;

fn view<T: Clone>(
    n: usize,
    buf: &[T],
    stride: isize,
    offset: usize,
) -> Result<StridedView<'_, Generic<T>>> {
    StridedView::new(buf, &[n], &[stride], offset, Order::RowMajor)
}

fn view_mut<T: Clone>(
    n: usize,
    buf: &mut [T],
    stride: isize,
    offset: usize,
) -> Result<StridedViewMut<'_, Generic<T>>> {
    StridedViewMut::new(buf, &[n], &[stride], offset, Order::RowMajor)
}

/// Fill `n` elements of `y` with values produced by `f`.
pub fn nullary<U, F>(n: usize, y: &mut [U], stride_y: isize, offset_y: usize, f: F) -> Result<()>
where
    U: Clone,
    F: FnMut() -> U,
{
    let mut yv = view_mut(n, y, stride_y, offset_y)?;
    map::nullary_into(&mut yv, f)
}

/// Apply `f` to `n` elements of `x`, writing results into `y`.
#[allow(clippy::too_many_arguments)]
pub fn unary<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
    f: F,
) -> Result<()>
where
    T: Clone,
    U: Clone,
    F: FnMut(T) -> U,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let mut yv = view_mut(n, y, stride_y, offset_y)?;
    map::unary_into(&xv, &mut yv, f)
}

/// Apply `f` to `n` pairs of elements of `x` and `y`, writing results into
/// `z`.
#[allow(clippy::too_many_arguments)]
pub fn binary<T, S, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[S],
    stride_y: isize,
    offset_y: usize,
    z: &mut [U],
    stride_z: isize,
    offset_z: usize,
    f: F,
) -> Result<()>
where
    T: Clone,
    S: Clone,
    U: Clone,
    F: FnMut(T, S) -> U,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let yv = view(n, y, stride_y, offset_y)?;
    let mut zv = view_mut(n, z, stride_z, offset_z)?;
    map::binary_into(&xv, &yv, &mut zv, f)
}

/// Apply `f` to `n` triples of elements of `x`, `y`, and `z`, writing results
/// into `w`.
#[allow(clippy::too_many_arguments)]
pub fn ternary<T, S, R, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[S],
    stride_y: isize,
    offset_y: usize,
    z: &[R],
    stride_z: isize,
    offset_z: usize,
    w: &mut [U],
    stride_w: isize,
    offset_w: usize,
    mut f: F,
) -> Result<()>
where
    T: Clone,
    S: Clone,
    R: Clone,
    U: Clone,
    F: FnMut(T, S, R) -> U,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let yv = view(n, y, stride_y, offset_y)?;
    let zv = view(n, z, stride_z, offset_z)?;
    let mut wv = view_mut(n, w, stride_w, offset_w)?;
    let plan = LoopPlan::new(
        &[n],
        [xv.operand(), yv.operand(), zv.operand(), wv.operand()],
        0,
    )?;
    let (xs, ys, zs) = (xv.data(), yv.data(), zv.data());
    let dst = wv.data_mut();
    plan.execute(|[ix, iy, iz, iw]| {
        let v = f(
            Generic::<T>::get(xs, ix),
            Generic::<S>::get(ys, iy),
            Generic::<R>::get(zs, iz),
        );
        Generic::<U>::set(dst, iw, v);
    });
    Ok(())
}

/// Apply `f` to the elements of `x` whose `mask` element equals its default
/// value (zero, `false`), writing results into `y`. Masked elements of `y`
/// are left untouched.
#[allow(clippy::too_many_arguments)]
pub fn mask_unary<T, K, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    mask: &[K],
    stride_mask: isize,
    offset_mask: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
    f: F,
) -> Result<()>
where
    T: Clone,
    K: Clone + Default + PartialEq,
    U: Clone,
    F: FnMut(T) -> U,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let mv = view(n, mask, stride_mask, offset_mask)?;
    let mut yv = view_mut(n, y, stride_y, offset_y)?;
    map::mask_unary_into(&xv, &mv, &mut yv, f)
}

/// Apply `f(value, i)` to `n` elements of `x`, where `i` counts elements
/// from zero. Results of `Some(v)` are written to `y`; `None` leaves the
/// corresponding element of `y` unchanged.
#[allow(clippy::too_many_arguments)]
pub fn map_by<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> Result<()>
where
    T: Clone,
    U: Clone,
    F: FnMut(T, usize) -> Option<U>,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let mut yv = view_mut(n, y, stride_y, offset_y)?;
    let plan = LoopPlan::new_indexed(&[n], [xv.operand(), yv.operand()], 0)?;
    let src = xv.data();
    let dst = yv.data_mut();
    plan.execute_indexed(|idx, [ix, iy]| {
        if let Some(v) = f(Generic::<T>::get(src, ix), idx[0]) {
            Generic::<U>::set(dst, iy, v);
        }
    });
    Ok(())
}

/// Like [`map_by`] for two inputs: apply `f(a, b, i)` to `n` pairs of
/// elements of `x` and `y`, writing `Some` results into `z`.
#[allow(clippy::too_many_arguments)]
pub fn map_by2<T, S, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[S],
    stride_y: isize,
    offset_y: usize,
    z: &mut [U],
    stride_z: isize,
    offset_z: usize,
    mut f: F,
) -> Result<()>
where
    T: Clone,
    S: Clone,
    U: Clone,
    F: FnMut(T, S, usize) -> Option<U>,
{
    let xv = view(n, x, stride_x, offset_x)?;
    let yv = view(n, y, stride_y, offset_y)?;
    let mut zv = view_mut(n, z, stride_z, offset_z)?;
    let plan = LoopPlan::new_indexed(&[n], [xv.operand(), yv.operand(), zv.operand()], 0)?;
    let (xs, ys) = (xv.data(), yv.data());
    let dst = zv.data_mut();
    plan.execute_indexed(|idx, [ix, iy, iz]| {
        if let Some(v) = f(Generic::<T>::get(xs, ix), Generic::<S>::get(ys, iy), idx[0]) {
            Generic::<U>::set(dst, iz, v);
        }
    });
    Ok(())
}
