//! Element-wise operations over strided views.
//!
//! Every entry point validates shapes, broadcasts inputs when it says so,
//! builds a [`LoopPlan`] with the first input as the primary array, and runs the
//! callback once per element. Each callback arity has its own entry point.

use crate::accessor::{Accessor, Mutator};
use crate::broadcast::broadcast_shapes;
use crate::dtype::Element;
use crate::plan::LoopPlan;
use crate::view::{StridedArray, StridedView, StridedViewMut};
use crate::{Result, StridedError};

fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a.len() != b.len() {
        return Err(StridedError::RankMismatch(a.len(), b.len()));
    }
    if let Some(dim) = a.iter().zip(b).position(|(x, y)| x != y) {
        return Err(StridedError::ShapeMismatch {
            dim,
            left: a.to_vec(),
            right: b.to_vec(),
        });
    }
    Ok(())
}

// ============================================================================
// Unary
// ============================================================================

/// Apply `f` to each element of `x`, writing results into `y`.
///
/// `x` and `y` must have the same dims.
pub fn unary_into<A, B, F>(
    x: &StridedView<'_, A>,
    y: &mut StridedViewMut<'_, B>,
    mut f: F,
) -> Result<()>
where
    A: Accessor,
    B: Mutator,
    F: FnMut(A::Value) -> B::Value,
{
    ensure_same_shape(x.dims(), y.dims())?;
    let plan = LoopPlan::new(y.dims(), [x.operand(), y.operand()], 0)?;
    let src = x.data();
    let dst = y.data_mut();
    plan.execute(|[ix, iy]| B::set(dst, iy, f(A::get(src, ix))));
    Ok(())
}

/// Like [`unary_into`], but `x` is first broadcast to the dims of `y`.
pub fn broadcasted_unary_into<A, B, F>(
    x: &StridedView<'_, A>,
    y: &mut StridedViewMut<'_, B>,
    f: F,
) -> Result<()>
where
    A: Accessor,
    B: Mutator,
    F: FnMut(A::Value) -> B::Value,
{
    let xb = x.broadcast(y.dims())?;
    unary_into(&xb, y, f)
}

/// Apply `f(value, subscripts)` to each element of `x`, writing into `y`.
///
/// Subscripts are given in array dimension order.
pub fn unary_indexed_into<A, B, F>(
    x: &StridedView<'_, A>,
    y: &mut StridedViewMut<'_, B>,
    mut f: F,
) -> Result<()>
where
    A: Accessor,
    B: Mutator,
    F: FnMut(A::Value, &[usize]) -> B::Value,
{
    ensure_same_shape(x.dims(), y.dims())?;
    let plan = LoopPlan::new_indexed(y.dims(), [x.operand(), y.operand()], 0)?;
    let src = x.data();
    let dst = y.data_mut();
    plan.execute_indexed(|idx, [ix, iy]| B::set(dst, iy, f(A::get(src, ix), idx)));
    Ok(())
}

/// Apply `f(value, subscripts, source)` to each element of `x`, writing into
/// `y`. The callback can read neighbouring elements through `source`.
pub fn unary_with_source_into<'a, A, B, F>(
    x: &StridedView<'a, A>,
    y: &mut StridedViewMut<'_, B>,
    mut f: F,
) -> Result<()>
where
    A: Accessor,
    B: Mutator,
    F: FnMut(A::Value, &[usize], &StridedView<'a, A>) -> B::Value,
{
    ensure_same_shape(x.dims(), y.dims())?;
    let plan = LoopPlan::new_indexed(y.dims(), [x.operand(), y.operand()], 0)?;
    let src = x.data();
    let dst = y.data_mut();
    plan.execute_indexed(|idx, [ix, iy]| B::set(dst, iy, f(A::get(src, ix), idx, x)));
    Ok(())
}

/// Apply `f` to each element of `x` where the corresponding `mask` element
/// is zero (equal to its default value). Masked elements of `y` are left
/// untouched.
pub fn mask_unary_into<A, K, B, F>(
    x: &StridedView<'_, A>,
    mask: &StridedView<'_, K>,
    y: &mut StridedViewMut<'_, B>,
    mut f: F,
) -> Result<()>
where
    A: Accessor,
    K: Accessor,
    K::Value: Default + PartialEq,
    B: Mutator,
    F: FnMut(A::Value) -> B::Value,
{
    ensure_same_shape(x.dims(), y.dims())?;
    ensure_same_shape(mask.dims(), y.dims())?;
    let plan = LoopPlan::new(y.dims(), [x.operand(), mask.operand(), y.operand()], 0)?;
    let src = x.data();
    let mbuf = mask.data();
    let dst = y.data_mut();
    let unmasked = K::Value::default();
    plan.execute(|[ix, im, iy]| {
        if K::get(mbuf, im) == unmasked {
            B::set(dst, iy, f(A::get(src, ix)));
        }
    });
    Ok(())
}

/// Apply `f` and collect the results into a new array with the dims and
/// order of `x`.
pub fn unary<A, U, F>(x: &StridedView<'_, A>, f: F) -> Result<StridedArray<U>>
where
    A: Accessor,
    U: Element,
    F: FnMut(A::Value) -> U,
{
    let mut out = StridedArray::<U>::zeros(x.dims(), x.order());
    unary_into(x, &mut out.view_mut(), f)?;
    Ok(out)
}

// ============================================================================
// Nullary
// ============================================================================

/// Fill `y` with values produced by `f`.
pub fn nullary_into<B, F>(y: &mut StridedViewMut<'_, B>, mut f: F) -> Result<()>
where
    B: Mutator,
    F: FnMut() -> B::Value,
{
    let plan = LoopPlan::new(y.dims(), [y.operand()], 0)?;
    let dst = y.data_mut();
    plan.execute(|[iy]| B::set(dst, iy, f()));
    Ok(())
}

/// Fill `y` with `value`.
pub fn fill<B>(y: &mut StridedViewMut<'_, B>, value: B::Value) -> Result<()>
where
    B: Mutator,
    B::Value: Clone,
{
    nullary_into(y, || value.clone())
}

// ============================================================================
// Binary
// ============================================================================

/// Apply `f` element-wise to `x` and `y`, writing results into `z`.
///
/// Both inputs are broadcast to the dims of `z`.
pub fn binary_into<A, B, C, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    z: &mut StridedViewMut<'_, C>,
    mut f: F,
) -> Result<()>
where
    A: Accessor,
    B: Accessor,
    C: Mutator,
    F: FnMut(A::Value, B::Value) -> C::Value,
{
    let xb = x.broadcast(z.dims())?;
    let yb = y.broadcast(z.dims())?;
    let plan = LoopPlan::new(z.dims(), [xb.operand(), yb.operand(), z.operand()], 0)?;
    let xs = xb.data();
    let ys = yb.data();
    let dst = z.data_mut();
    plan.execute(|[ix, iy, iz]| C::set(dst, iz, f(A::get(xs, ix), B::get(ys, iy))));
    Ok(())
}

/// Apply `f` element-wise to `x` and `y` broadcast together, collecting the
/// results into a new array in the order of `x`.
///
/// # Example
/// ```rust
/// use strided_traverse::{binary, Order, StridedArray};
///
/// let a = StridedArray::from_vec(vec![1, 2, 3], &[3], Order::RowMajor).unwrap();
/// let b = StridedArray::from_vec(vec![100, 200], &[2, 1], Order::RowMajor).unwrap();
/// let c = binary(&a.view(), &b.view(), |x: i32, y: i32| x + y).unwrap();
/// assert_eq!(c.data(), &[101, 102, 103, 201, 202, 203]);
/// ```
pub fn binary<A, B, U, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    f: F,
) -> Result<StridedArray<U>>
where
    A: Accessor,
    B: Accessor,
    U: Element,
    F: FnMut(A::Value, B::Value) -> U,
{
    let dims = broadcast_shapes(&[x.dims(), y.dims()])?;
    let mut out = StridedArray::<U>::zeros(&dims, x.order());
    binary_into(x, y, &mut out.view_mut(), f)?;
    Ok(out)
}

// ============================================================================
// Visit and reduce
// ============================================================================

/// Call `f` with every element of `x`.
pub fn for_each<A, F>(x: &StridedView<'_, A>, mut f: F) -> Result<()>
where
    A: Accessor,
    F: FnMut(A::Value),
{
    let plan = LoopPlan::new(x.dims(), [x.operand()], 0)?;
    let src = x.data();
    plan.execute(|[ix]| f(A::get(src, ix)));
    Ok(())
}

/// Call `f` with every element of `x` and its subscripts.
pub fn for_each_indexed<A, F>(x: &StridedView<'_, A>, mut f: F) -> Result<()>
where
    A: Accessor,
    F: FnMut(A::Value, &[usize]),
{
    let plan = LoopPlan::new_indexed(x.dims(), [x.operand()], 0)?;
    let src = x.data();
    plan.execute_indexed(|idx, [ix]| f(A::get(src, ix), idx));
    Ok(())
}

/// Fold every element of `x` into an accumulator.
///
/// The visiting order is unspecified; `f` should be associative and
/// commutative for results that do not depend on layout.
pub fn reduce<A, Acc, F>(x: &StridedView<'_, A>, init: Acc, mut f: F) -> Result<Acc>
where
    A: Accessor,
    F: FnMut(Acc, A::Value) -> Acc,
{
    let plan = LoopPlan::new(x.dims(), [x.operand()], 0)?;
    let src = x.data();
    let mut acc = Some(init);
    plan.execute(|[ix]| {
        if let Some(current) = acc.take() {
            acc = Some(f(current, A::get(src, ix)));
        }
    });
    acc.ok_or(StridedError::OffsetOverflow)
}

/// Fold pairs of corresponding elements of `x` and `y` into an accumulator.
///
/// Both arrays must have the same dims.
pub fn zip_reduce<A, B, Acc, F>(
    x: &StridedView<'_, A>,
    y: &StridedView<'_, B>,
    init: Acc,
    mut f: F,
) -> Result<Acc>
where
    A: Accessor,
    B: Accessor,
    F: FnMut(Acc, A::Value, B::Value) -> Acc,
{
    ensure_same_shape(x.dims(), y.dims())?;
    let plan = LoopPlan::new(x.dims(), [x.operand(), y.operand()], 0)?;
    let xs = x.data();
    let ys = y.data();
    let mut acc = Some(init);
    plan.execute(|[ix, iy]| {
        if let Some(current) = acc.take() {
            acc = Some(f(current, A::get(xs, ix), B::get(ys, iy)));
        }
    });
    acc.ok_or(StridedError::OffsetOverflow)
}
