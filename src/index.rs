//! Conversions between linear indices, subscripts, and buffer indices.
//!
//! Three index spaces are involved:
//! - **subscripts**: one index per dimension
//! - **view index**: position in the view's memory order (`0..len`)
//! - **buffer index**: position in the underlying buffer
//!
//! Every conversion first resolves out-of-range input with an [`IndexMode`].

use std::fmt;
use std::str::FromStr;

use crate::layout::{numel, Order};
use crate::{Result, StridedError};

/// How to treat an index outside `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexMode {
    /// Fail with [`StridedError::IndexOutOfBounds`].
    #[default]
    Throw,
    /// Count negative indices from the end, then fail if still out of range.
    Normalize,
    /// Wrap around modulo `max + 1`.
    Wrap,
    /// Clamp to `0..=max`.
    Clamp,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Throw => "throw",
            IndexMode::Normalize => "normalize",
            IndexMode::Wrap => "wrap",
            IndexMode::Clamp => "clamp",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexMode {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "throw" => Ok(IndexMode::Throw),
            "normalize" => Ok(IndexMode::Normalize),
            "wrap" => Ok(IndexMode::Wrap),
            "clamp" => Ok(IndexMode::Clamp),
            _ => Err(StridedError::InvalidIndexMode(s.to_string())),
        }
    }
}

/// Resolve `idx` into `0..=max` according to `mode`.
///
/// A negative `max` (no valid index at all) is always an error.
pub fn resolve_index(idx: isize, max: isize, mode: IndexMode) -> Result<isize> {
    let out_of_bounds = || StridedError::IndexOutOfBounds { index: idx, max };
    if max < 0 {
        return Err(out_of_bounds());
    }
    match mode {
        IndexMode::Throw => {
            if idx < 0 || idx > max {
                return Err(out_of_bounds());
            }
            Ok(idx)
        }
        IndexMode::Normalize => {
            let i = if idx < 0 { idx + max + 1 } else { idx };
            if i < 0 || i > max {
                return Err(out_of_bounds());
            }
            Ok(i)
        }
        IndexMode::Wrap => Ok(idx.rem_euclid(max + 1)),
        IndexMode::Clamp => Ok(idx.clamp(0, max)),
    }
}

fn max_linear_index(shape: &[usize]) -> isize {
    numel(shape) as isize - 1
}

/// Convert a linear index into subscripts.
///
/// With `offset == 0`, `idx` is a view index decomposed by `shape` in the
/// given order. Otherwise `idx` is a buffer index and is decomposed by the
/// strides: each stride consumes as many whole steps as fit, and a negative
/// stride counts from the end of its dimension.
///
/// A buffer index the view does not address can decompose into a subscript
/// outside its dimension; that is reported as
/// [`StridedError::IndexOutOfBounds`].
///
/// # Example
/// ```rust
/// use strided_traverse::index::ind2sub;
/// use strided_traverse::{IndexMode, Order};
///
/// // Row-major 2x2 with the rows reversed
/// let subs = ind2sub(&[2, 2], &[-2, 1], 2, Order::RowMajor, 1, IndexMode::Throw).unwrap();
/// assert_eq!(subs, vec![1, 1]);
/// ```
pub fn ind2sub(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<Vec<usize>> {
    let rank = shape.len();
    let mut idx = resolve_index(idx, max_linear_index(shape), mode)?;
    let mut out = vec![0usize; rank];

    if offset == 0 {
        let mut split = |i: usize| {
            let n = shape[i] as isize;
            out[i] = (idx % n) as usize;
            idx /= n;
        };
        match order {
            Order::ColumnMajor => (0..rank).for_each(&mut split),
            Order::RowMajor => (0..rank).rev().for_each(&mut split),
        }
        return Ok(out);
    }

    let mut step = |i: usize| -> Result<()> {
        let s = strides[i];
        if s == 0 {
            return Ok(());
        }
        let n = shape[i] as isize;
        let k = idx / s;
        idx -= k * s;
        let sub = if s < 0 { n - 1 + k } else { k };
        if sub < 0 || sub >= n {
            return Err(StridedError::IndexOutOfBounds {
                index: sub,
                max: n - 1,
            });
        }
        out[i] = sub as usize;
        Ok(())
    };
    match order {
        Order::RowMajor => (0..rank).try_for_each(&mut step)?,
        Order::ColumnMajor => (0..rank).rev().try_for_each(&mut step)?,
    }
    Ok(out)
}

/// Convert subscripts into a buffer index.
///
/// `modes` is applied per dimension and cycled when shorter than the rank.
/// With `offset == 0` stride signs are ignored, which yields the view index
/// of a contiguous array.
pub fn sub2ind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    subs: &[isize],
    modes: &[IndexMode],
) -> Result<usize> {
    if subs.len() != shape.len() {
        return Err(StridedError::RankMismatch(subs.len(), shape.len()));
    }
    if strides.len() != shape.len() {
        return Err(StridedError::StrideLengthMismatch {
            dims: shape.len(),
            strides: strides.len(),
        });
    }
    let mut ind = offset as isize;
    for (i, &sub) in subs.iter().enumerate() {
        let mode = if modes.is_empty() {
            IndexMode::default()
        } else {
            modes[i % modes.len()]
        };
        let j = resolve_index(sub, shape[i] as isize - 1, mode)?;
        let s = strides[i];
        if s < 0 && offset == 0 {
            ind -= j * s;
        } else {
            ind += j * s;
        }
    }
    usize::try_from(ind).map_err(|_| StridedError::OffsetOverflow)
}

/// Convert a view index into a buffer index.
///
/// # Example
/// ```rust
/// use strided_traverse::index::vind2bind;
/// use strided_traverse::{IndexMode, Order};
///
/// let binds: Vec<usize> = (0..4)
///     .map(|i| vind2bind(&[2, 2], &[-2, 1], 2, Order::RowMajor, i, IndexMode::Throw).unwrap())
///     .collect();
/// assert_eq!(binds, vec![2, 3, 0, 1]);
/// ```
pub fn vind2bind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    let rank = shape.len();
    let mut idx = resolve_index(idx, max_linear_index(shape), mode)?;
    let mut ind = offset as isize;
    let mut step = |i: usize| {
        let n = shape[i] as isize;
        let k = idx % n;
        idx /= n;
        ind += k * strides[i];
    };
    match order {
        Order::ColumnMajor => (0..rank).for_each(&mut step),
        Order::RowMajor => (0..rank).rev().for_each(&mut step),
    }
    usize::try_from(ind).map_err(|_| StridedError::OffsetOverflow)
}

/// Convert a buffer index into a view index.
///
/// Inverse of [`vind2bind`] for buffer indices the view addresses.
pub fn bind2vind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    let subs = ind2sub(shape, strides, offset, order, idx, mode)?;
    let rank = shape.len();
    let mut ind = 0usize;
    match order {
        Order::RowMajor => {
            for i in 0..rank {
                ind = ind * shape[i] + subs[i];
            }
        }
        Order::ColumnMajor => {
            for i in (0..rank).rev() {
                ind = ind * shape[i] + subs[i];
            }
        }
    }
    Ok(ind)
}
