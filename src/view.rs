//! Dynamic-rank strided views and owned arrays.
//!
//! A view is an n-dimensional descriptor over a borrowed buffer: shape,
//! element strides (possibly negative or zero), the buffer index of the first
//! element, and the memory order used to linearize subscripts. Element access
//! goes through the view's [`Accessor`].

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::accessor::{Accessor, Direct, Mutator};
use crate::broadcast::broadcast_strides;
use crate::dtype::{Dtype, Element};
use crate::index::{vind2bind, IndexMode};
use crate::layout::{self, numel, shape_to_strides, Order};
use crate::plan::Operand;
use crate::{Result, StridedError};

/// Immutable view over plain [`Element`] slices.
pub type ArrayView<'a, T> = StridedView<'a, Direct<T>>;

/// Mutable view over plain [`Element`] slices.
pub type ArrayViewMut<'a, T> = StridedViewMut<'a, Direct<T>>;

// ============================================================================
// Descriptor validation
// ============================================================================

/// Check that every element a descriptor addresses lies inside a buffer of
/// `len` elements.
fn validate_descriptor(len: usize, dims: &[usize], strides: &[isize], offset: usize) -> Result<()> {
    if strides.len() != dims.len() {
        return Err(StridedError::StrideLengthMismatch {
            dims: dims.len(),
            strides: strides.len(),
        });
    }
    if dims.contains(&0) {
        // Empty array, nothing is ever read
        return Ok(());
    }

    let start = isize::try_from(offset).map_err(|_| StridedError::OffsetOverflow)?;
    let mut min = start;
    let mut max = start;
    for (&n, &s) in dims.iter().zip(strides) {
        let last = isize::try_from(n - 1).map_err(|_| StridedError::OffsetOverflow)?;
        let span = last.checked_mul(s).ok_or(StridedError::OffsetOverflow)?;
        if span >= 0 {
            max = max.checked_add(span).ok_or(StridedError::OffsetOverflow)?;
        } else {
            min = min.checked_add(span).ok_or(StridedError::OffsetOverflow)?;
        }
    }

    if min < 0 || max >= len as isize {
        return Err(StridedError::OutOfBounds { min, max, len });
    }
    Ok(())
}

fn validate_permutation(perm: &[usize], rank: usize) -> Result<()> {
    if perm.len() != rank {
        return Err(StridedError::RankMismatch(perm.len(), rank));
    }
    let mut seen = vec![false; rank];
    for &p in perm {
        if p >= rank || seen[p] {
            return Err(StridedError::InvalidPermutation(perm.to_vec()));
        }
        seen[p] = true;
    }
    Ok(())
}

/// Buffer index of the element at `indices`. Panics on a bad subscript.
fn buffer_index(dims: &[usize], strides: &[isize], offset: usize, indices: &[usize]) -> usize {
    assert_eq!(indices.len(), dims.len(), "wrong number of indices");
    let mut idx = offset as isize;
    for (i, &index) in indices.iter().enumerate() {
        assert!(
            index < dims[i],
            "index {} out of bounds for dim {}",
            index,
            dims[i]
        );
        idx += index as isize * strides[i];
    }
    idx as usize
}

// ============================================================================
// StridedView
// ============================================================================

/// Dynamic-rank immutable strided view.
///
/// # Type Parameters
/// - `'a`: Lifetime of the underlying buffer
/// - `A`: Accessor deciding how buffer slots map to element values
pub struct StridedView<'a, A: Accessor> {
    data: &'a A::Buffer,
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
    _accessor: PhantomData<A>,
}

impl<A: Accessor> Clone for StridedView<'_, A> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
            _accessor: PhantomData,
        }
    }
}

impl<A: Accessor> fmt::Debug for StridedView<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedView")
            .field("dtype", &A::DTYPE)
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, A: Accessor> StridedView<'a, A> {
    /// Create a view, checking that every addressed element is inside `data`.
    pub fn new(
        data: &'a A::Buffer,
        dims: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_descriptor(A::len(data), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
            order,
            _accessor: PhantomData,
        })
    }

    /// Create a view without bounds checking.
    ///
    /// # Safety
    /// `strides.len()` must equal `dims.len()` and every index combination
    /// must stay inside `data`. Violations surface as panics in the accessor
    /// or as reads of unrelated elements.
    pub unsafe fn new_unchecked(
        data: &'a A::Buffer,
        dims: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Self {
        Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
            order,
            _accessor: PhantomData,
        }
    }

    /// View a whole buffer as a contiguous array in the given order.
    pub fn from_slice(data: &'a A::Buffer, dims: &[usize], order: Order) -> Result<Self> {
        let strides = shape_to_strides(dims, order);
        Self::new(data, dims, &strides, 0, order)
    }

    #[inline]
    pub fn data(&self) -> &'a A::Buffer {
        self.data
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn dtype(&self) -> Dtype {
        A::DTYPE
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.dims)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    pub fn is_contiguous(&self) -> bool {
        layout::is_contiguous(&self.dims, &self.strides)
    }

    /// Traversal description of this view.
    pub fn operand(&self) -> Operand<'_> {
        Operand {
            strides: &self.strides,
            offset: self.offset,
            order: self.order,
            bytes_per_element: A::DTYPE.bytes_per_element(),
        }
    }

    /// Get an element by subscripts. Panics on a bad subscript.
    pub fn get(&self, indices: &[usize]) -> A::Value {
        A::get(
            self.data,
            buffer_index(&self.dims, &self.strides, self.offset, indices),
        )
    }

    /// Get an element by its linear index in the view's memory order.
    pub fn iget(&self, idx: isize, mode: IndexMode) -> Result<A::Value> {
        let bind = vind2bind(&self.dims, &self.strides, self.offset, self.order, idx, mode)?;
        Ok(A::get(self.data, bind))
    }

    /// Read-only view of this array stretched to `target` dims.
    ///
    /// Missing leading dimensions and size-1 dimensions are repeated with
    /// stride 0; no data is copied.
    pub fn broadcast(&self, target: &[usize]) -> Result<StridedView<'a, A>> {
        let strides = broadcast_strides(&self.dims, &self.strides, target)?;
        Ok(StridedView {
            data: self.data,
            dims: Arc::from(target),
            strides: Arc::from(strides),
            offset: self.offset,
            order: self.order,
            _accessor: PhantomData,
        })
    }

    /// Permute dimensions: dimension `i` of the result is dimension `perm[i]`
    /// of `self`.
    pub fn permute(&self, perm: &[usize]) -> Result<StridedView<'a, A>> {
        validate_permutation(perm, self.dims.len())?;
        let dims: Vec<usize> = perm.iter().map(|&p| self.dims[p]).collect();
        let strides: Vec<isize> = perm.iter().map(|&p| self.strides[p]).collect();
        Ok(StridedView {
            data: self.data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset: self.offset,
            order: self.order,
            _accessor: PhantomData,
        })
    }
}

// ============================================================================
// StridedViewMut
// ============================================================================

/// Dynamic-rank mutable strided view.
///
/// Cannot be broadcast: a zero stride would make several logical elements
/// alias one writable slot.
pub struct StridedViewMut<'a, A: Mutator> {
    data: &'a mut A::Buffer,
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
    _accessor: PhantomData<A>,
}

impl<A: Mutator> fmt::Debug for StridedViewMut<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedViewMut")
            .field("dtype", &A::DTYPE)
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, A: Mutator> StridedViewMut<'a, A> {
    /// Create a mutable view, checking that every addressed element is
    /// inside `data`.
    pub fn new(
        data: &'a mut A::Buffer,
        dims: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_descriptor(A::len(data), dims, strides, offset)?;
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
            order,
            _accessor: PhantomData,
        })
    }

    /// Create a mutable view without bounds checking.
    ///
    /// # Safety
    /// Same contract as [`StridedView::new_unchecked`].
    pub unsafe fn new_unchecked(
        data: &'a mut A::Buffer,
        dims: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Self {
        Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset,
            order,
            _accessor: PhantomData,
        }
    }

    /// View a whole buffer as a contiguous array in the given order.
    pub fn from_slice(data: &'a mut A::Buffer, dims: &[usize], order: Order) -> Result<Self> {
        let strides = shape_to_strides(dims, order);
        Self::new(data, dims, &strides, 0, order)
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn dtype(&self) -> Dtype {
        A::DTYPE
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.dims)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    #[inline]
    pub fn data(&self) -> &A::Buffer {
        &*self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut A::Buffer {
        &mut *self.data
    }

    /// Traversal description of this view.
    pub fn operand(&self) -> Operand<'_> {
        Operand {
            strides: &self.strides,
            offset: self.offset,
            order: self.order,
            bytes_per_element: A::DTYPE.bytes_per_element(),
        }
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> StridedView<'_, A> {
        StridedView {
            data: &*self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
            _accessor: PhantomData,
        }
    }

    /// Permute dimensions, consuming the view.
    pub fn permute(self, perm: &[usize]) -> Result<StridedViewMut<'a, A>> {
        validate_permutation(perm, self.dims.len())?;
        let dims: Vec<usize> = perm.iter().map(|&p| self.dims[p]).collect();
        let strides: Vec<isize> = perm.iter().map(|&p| self.strides[p]).collect();
        Ok(StridedViewMut {
            data: self.data,
            dims: Arc::from(dims),
            strides: Arc::from(strides),
            offset: self.offset,
            order: self.order,
            _accessor: PhantomData,
        })
    }

    /// Get an element by subscripts. Panics on a bad subscript.
    pub fn get(&self, indices: &[usize]) -> A::Value {
        A::get(
            &*self.data,
            buffer_index(&self.dims, &self.strides, self.offset, indices),
        )
    }

    /// Set an element by subscripts. Panics on a bad subscript.
    pub fn set(&mut self, indices: &[usize], value: A::Value) {
        let idx = buffer_index(&self.dims, &self.strides, self.offset, indices);
        A::set(&mut *self.data, idx, value);
    }

    /// Get an element by its linear index in the view's memory order.
    pub fn iget(&self, idx: isize, mode: IndexMode) -> Result<A::Value> {
        let bind = vind2bind(&self.dims, &self.strides, self.offset, self.order, idx, mode)?;
        Ok(A::get(&*self.data, bind))
    }

    /// Set an element by its linear index in the view's memory order.
    pub fn iset(&mut self, idx: isize, value: A::Value, mode: IndexMode) -> Result<()> {
        let bind = vind2bind(&self.dims, &self.strides, self.offset, self.order, idx, mode)?;
        A::set(&mut *self.data, bind, value);
        Ok(())
    }
}

// ============================================================================
// StridedArray
// ============================================================================

/// Owned contiguous n-dimensional array.
///
/// Supports both row-major and column-major layouts. Used as the output of
/// allocating operations such as [`unary`](crate::unary) and
/// [`binary`](crate::binary).
pub struct StridedArray<T> {
    data: Vec<T>,
    dims: Arc<[usize]>,
    strides: Arc<[isize]>,
    order: Order,
}

impl<T: fmt::Debug> fmt::Debug for StridedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedArray")
            .field("dims", &self.dims)
            .field("order", &self.order)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Clone> Clone for StridedArray<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            order: self.order,
        }
    }
}

impl<T: Clone + Default> StridedArray<T> {
    /// Create an array filled with `T::default()`.
    pub fn zeros(dims: &[usize], order: Order) -> Self {
        let data = vec![T::default(); numel(dims)];
        Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(shape_to_strides(dims, order)),
            order,
        }
    }
}

impl<T> StridedArray<T> {
    /// Wrap a vector holding the elements in `order`.
    pub fn from_vec(data: Vec<T>, dims: &[usize], order: Order) -> Result<Self> {
        let total = numel(dims);
        if data.len() != total {
            return Err(StridedError::OutOfBounds {
                min: 0,
                max: total as isize - 1,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(shape_to_strides(dims, order)),
            order,
        })
    }

    /// Create an array with values produced by a function of the subscripts.
    ///
    /// The function is called in memory order.
    pub fn from_fn(dims: &[usize], order: Order, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let total = numel(dims);
        let rank = dims.len();
        let mut data = Vec::with_capacity(total);
        let mut idx = vec![0usize; rank];
        for _ in 0..total {
            data.push(f(&idx));
            let mut step = |d: usize| {
                idx[d] += 1;
                if idx[d] < dims[d] {
                    return true;
                }
                idx[d] = 0;
                false
            };
            match order {
                Order::RowMajor => {
                    for d in (0..rank).rev() {
                        if step(d) {
                            break;
                        }
                    }
                }
                Order::ColumnMajor => {
                    for d in 0..rank {
                        if step(d) {
                            break;
                        }
                    }
                }
            }
        }
        Self {
            data,
            dims: Arc::from(dims),
            strides: Arc::from(shape_to_strides(dims, order)),
            order,
        }
    }

    /// Create a row-major array with values produced by a function.
    pub fn from_fn_row_major(dims: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::from_fn(dims, Order::RowMajor, f)
    }

    /// Create a column-major array with values produced by a function.
    pub fn from_fn_col_major(dims: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::from_fn(dims, Order::ColumnMajor, f)
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Element> StridedArray<T> {
    /// Create an immutable view over this array.
    pub fn view(&self) -> ArrayView<'_, T> {
        StridedView {
            data: &self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: 0,
            order: self.order,
            _accessor: PhantomData,
        }
    }

    /// Create a mutable view over this array.
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        StridedViewMut {
            data: &mut self.data,
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: 0,
            order: self.order,
            _accessor: PhantomData,
        }
    }

}

impl<T: Copy> StridedArray<T> {
    /// Get an element by subscripts. Panics on a bad subscript.
    pub fn get(&self, indices: &[usize]) -> T {
        self.data[buffer_index(&self.dims, &self.strides, 0, indices)]
    }

    /// Set an element by subscripts. Panics on a bad subscript.
    pub fn set(&mut self, indices: &[usize], value: T) {
        let idx = buffer_index(&self.dims, &self.strides, 0, indices);
        self.data[idx] = value;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{Generic, Interleaved};
    use num_complex::Complex64;

    #[test]
    fn test_view_new() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = ArrayView::<f64>::new(&data, &[2, 3], &[3, 1], 0, Order::RowMajor).unwrap();
        assert_eq!(view.ndim(), 2);
        assert_eq!(view.dims(), &[2, 3]);
        assert_eq!(view.strides(), &[3, 1]);
        assert_eq!(view.len(), 6);
        assert_eq!(view.dtype(), Dtype::Float64);
        assert!(view.is_contiguous());
    }

    #[test]
    fn test_view_get_col_major() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = ArrayView::<f64>::from_slice(&data, &[2, 3], Order::ColumnMajor).unwrap();
        assert_eq!(view.strides(), &[1, 2]);
        assert_eq!(view.get(&[0, 0]), 1.0);
        assert_eq!(view.get(&[1, 0]), 2.0);
        assert_eq!(view.get(&[0, 1]), 3.0);
        assert_eq!(view.get(&[1, 2]), 6.0);
    }

    #[test]
    fn test_view_negative_strides() {
        let data = vec![1, 2, 3, 4, 5, 6];
        // Both axes reversed
        let view = ArrayView::<i32>::new(&data, &[2, 3], &[-3, -1], 5, Order::RowMajor).unwrap();
        assert_eq!(view.get(&[0, 0]), 6);
        assert_eq!(view.get(&[1, 2]), 1);
    }

    #[test]
    fn test_view_validation() {
        let data = vec![0.0f64; 6];
        let err = ArrayView::<f64>::new(&data, &[2, 3], &[3], 0, Order::RowMajor).unwrap_err();
        assert_eq!(err, StridedError::StrideLengthMismatch { dims: 2, strides: 1 });

        let err = ArrayView::<f64>::new(&data, &[2, 3], &[3, 1], 1, Order::RowMajor).unwrap_err();
        assert_eq!(err, StridedError::OutOfBounds { min: 1, max: 6, len: 6 });
        assert!(err.is_invalid_descriptor());

        let err = ArrayView::<f64>::new(&data, &[2, 3], &[-3, 1], 0, Order::RowMajor).unwrap_err();
        assert_eq!(err, StridedError::OutOfBounds { min: -3, max: 2, len: 6 });

        let err =
            ArrayView::<f64>::new(&data, &[2, 2], &[isize::MAX, 1], 0, Order::RowMajor).unwrap_err();
        assert_eq!(err, StridedError::OffsetOverflow);
    }

    #[test]
    fn test_view_empty_skips_bounds() {
        let data: Vec<f64> = vec![];
        let view = ArrayView::<f64>::new(&data, &[3, 0], &[100, 1], 50, Order::RowMajor).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.len(), 0);
    }

    #[test]
    fn test_view_rank0() {
        let data = vec![1.0, 42.0];
        let view = ArrayView::<f64>::new(&data, &[], &[], 1, Order::RowMajor).unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(&[]), 42.0);
        assert!(ArrayView::<f64>::new(&data, &[], &[], 2, Order::RowMajor).is_err());
    }

    #[test]
    fn test_view_permute() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = ArrayView::<f64>::from_slice(&data, &[2, 3], Order::RowMajor).unwrap();
        let p = view.permute(&[1, 0]).unwrap();
        assert_eq!(p.dims(), &[3, 2]);
        assert_eq!(p.strides(), &[1, 3]);
        assert_eq!(p.get(&[2, 1]), 6.0);
        assert_eq!(
            view.permute(&[0, 0]).unwrap_err(),
            StridedError::InvalidPermutation(vec![0, 0])
        );
        assert_eq!(view.permute(&[0]).unwrap_err(), StridedError::RankMismatch(1, 2));
    }

    #[test]
    fn test_view_broadcast() {
        let data = vec![1.0, 2.0, 3.0];
        let view = ArrayView::<f64>::from_slice(&data, &[3], Order::RowMajor).unwrap();
        let b = view.broadcast(&[2, 3]).unwrap();
        assert_eq!(b.dims(), &[2, 3]);
        assert_eq!(b.strides(), &[0, 1]);
        assert_eq!(b.get(&[1, 2]), 3.0);
        assert!(view.broadcast(&[2, 4]).is_err());
    }

    #[test]
    fn test_view_iget_negative_stride() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        // Rows reversed: logical [[3, 4], [1, 2]]
        let view = ArrayView::<f64>::new(&data, &[2, 2], &[-2, 1], 2, Order::RowMajor).unwrap();
        let values: Vec<f64> = (0..4).map(|i| view.iget(i, IndexMode::Throw).unwrap()).collect();
        assert_eq!(values, vec![3.0, 4.0, 1.0, 2.0]);
        assert_eq!(view.iget(-1, IndexMode::Normalize).unwrap(), 2.0);
        assert_eq!(view.iget(5, IndexMode::Wrap).unwrap(), 4.0);
        assert_eq!(view.iget(9, IndexMode::Clamp).unwrap(), 2.0);
        assert!(view.iget(4, IndexMode::Throw).is_err());
    }

    #[test]
    fn test_view_mut_set_and_iset() {
        let mut data = vec![0i64; 6];
        {
            let mut view = ArrayViewMut::<i64>::from_slice(&mut data, &[2, 3], Order::ColumnMajor).unwrap();
            view.set(&[1, 2], 7);
            view.iset(0, 1, IndexMode::Throw).unwrap();
            view.iset(-2, 9, IndexMode::Normalize).unwrap();
            assert_eq!(view.get(&[1, 2]), 7);
            assert_eq!(view.as_view().get(&[0, 0]), 1);
        }
        assert_eq!(data, vec![1, 0, 0, 0, 9, 7]);
    }

    #[test]
    fn test_view_mut_permute() {
        let mut data = vec![0u8; 6];
        let view = ArrayViewMut::<u8>::from_slice(&mut data, &[2, 3], Order::RowMajor).unwrap();
        let mut t = view.permute(&[1, 0]).unwrap();
        t.set(&[2, 0], 5);
        assert_eq!(data[2], 5);
    }

    #[test]
    fn test_interleaved_view() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let view =
            StridedView::<Interleaved<f64>>::from_slice(&data, &[2, 2], Order::RowMajor).unwrap();
        assert_eq!(view.dtype(), Dtype::Complex128);
        assert_eq!(view.get(&[1, 0]), Complex64::new(5.0, 6.0));
        assert!(StridedView::<Interleaved<f64>>::from_slice(&data, &[5], Order::RowMajor).is_err());
    }

    #[test]
    fn test_generic_view() {
        let data = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let view = StridedView::<Generic<String>>::new(&data, &[3], &[-1], 2, Order::RowMajor).unwrap();
        assert_eq!(view.dtype(), Dtype::Generic);
        assert_eq!(view.get(&[0]), "c");
        assert_eq!(view.operand().bytes_per_element, None);
    }

    #[test]
    fn test_array_from_fn() {
        let a = StridedArray::<usize>::from_fn_row_major(&[2, 3], |idx| idx[0] * 10 + idx[1]);
        assert_eq!(a.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(a.get(&[1, 2]), 12);

        let b = StridedArray::<usize>::from_fn_col_major(&[2, 3], |idx| idx[0] * 10 + idx[1]);
        assert_eq!(b.data(), &[0, 10, 1, 11, 2, 12]);
        assert_eq!(b.get(&[1, 2]), 12);
        assert_eq!(b.strides(), &[1, 2]);
    }

    #[test]
    fn test_array_from_vec() {
        let a = StridedArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2], Order::RowMajor).unwrap();
        assert_eq!(a.get(&[1, 0]), 3.0);
        assert!(StridedArray::from_vec(vec![1.0, 2.0, 3.0], &[2, 2], Order::RowMajor).is_err());
    }

    #[test]
    fn test_array_zeros_and_set() {
        let mut a = StridedArray::<f32>::zeros(&[2, 2], Order::ColumnMajor);
        a.set(&[0, 1], 3.5);
        assert_eq!(a.data(), &[0.0, 0.0, 3.5, 0.0]);
        assert_eq!(a.view().get(&[0, 1]), 3.5);
        a.view_mut().set(&[1, 1], 1.0);
        assert_eq!(a.into_vec(), vec![0.0, 0.0, 3.5, 1.0]);
    }

    #[test]
    fn test_array_rank0() {
        let a = StridedArray::<f64>::from_fn_row_major(&[], |_| 7.0);
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(&[]), 7.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_view_get_out_of_bounds() {
        let data = vec![1.0, 2.0];
        let view = ArrayView::<f64>::from_slice(&data, &[2], Order::RowMajor).unwrap();
        view.get(&[2]);
    }
}
