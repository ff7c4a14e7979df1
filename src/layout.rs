//! Memory order, stride layout classification, and view extent helpers.

use std::fmt;
use std::str::FromStr;

use crate::StridedError;

/// Memory order of an array, used to linearize subscripts and to allocate
/// new arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Last dimension varies fastest (C order).
    #[default]
    RowMajor,
    /// First dimension varies fastest (Fortran order).
    ColumnMajor,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Order {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row-major" => Ok(Order::RowMajor),
            "column-major" => Ok(Order::ColumnMajor),
            _ => Err(StridedError::InvalidOrder(s.to_string())),
        }
    }
}

/// Layout implied by a stride vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Absolute strides are non-increasing.
    RowMajor,
    /// Absolute strides are non-decreasing.
    ColumnMajor,
    /// Both orders describe the strides (rank <= 1, or equal strides).
    Both,
    /// Neither order describes the strides.
    None,
}

/// Direction in which a stride vector walks memory.
///
/// Returns `1` if every stride is non-negative, `-1` if every stride is
/// non-positive, and `0` for mixed signs. Zero strides count as either
/// direction.
pub fn iteration_order(strides: &[isize]) -> i8 {
    let negative = strides.iter().filter(|&&s| s < 0).count();
    if negative == 0 {
        1
    } else if strides.iter().all(|&s| s <= 0) {
        -1
    } else {
        0
    }
}

/// Classify a stride vector as row-major, column-major, both, or neither.
pub fn strides_to_order(strides: &[isize]) -> Layout {
    let mut row = true;
    let mut col = true;
    for w in strides.windows(2) {
        let (a, b) = (w[0].unsigned_abs(), w[1].unsigned_abs());
        if a < b {
            row = false;
        }
        if a > b {
            col = false;
        }
    }
    match (row, col) {
        (true, true) => Layout::Both,
        (true, false) => Layout::RowMajor,
        (false, true) => Layout::ColumnMajor,
        (false, false) => Layout::None,
    }
}

/// Contiguous strides for `shape` in the given memory order.
pub fn shape_to_strides(shape: &[usize], order: Order) -> Vec<isize> {
    let rank = shape.len();
    let mut strides = vec![0isize; rank];
    let mut acc = 1isize;
    match order {
        Order::RowMajor => {
            for i in (0..rank).rev() {
                strides[i] = acc;
                acc *= shape[i].max(1) as isize;
            }
        }
        Order::ColumnMajor => {
            for i in 0..rank {
                strides[i] = acc;
                acc *= shape[i].max(1) as isize;
            }
        }
    }
    strides
}

/// Number of elements described by `shape` (`1` for rank 0).
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Offset of the first element of a one-dimensional strided array with `n`
/// elements, such that a negative stride walks from the end of the buffer.
pub fn stride_to_offset(n: usize, stride: isize) -> usize {
    if stride < 0 && n > 0 {
        (n - 1) * stride.unsigned_abs()
    } else {
        0
    }
}

/// Minimum and maximum buffer indices addressed by a view.
///
/// Empty views return `(offset, offset)`.
pub fn min_max_view_index(shape: &[usize], strides: &[isize], offset: usize) -> (isize, isize) {
    let mut min = offset as isize;
    let mut max = min;
    if shape.contains(&0) {
        return (min, max);
    }
    for (&n, &s) in shape.iter().zip(strides) {
        let span = (n as isize - 1) * s;
        if span > 0 {
            max += span;
        } else {
            min += span;
        }
    }
    (min, max)
}

/// Whether a view addresses a single gap-free segment of its buffer in a
/// consistent direction.
pub fn is_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    let len = numel(shape);
    if len == 0 || iteration_order(strides) == 0 {
        return false;
    }
    if strides_to_order(strides) == Layout::None {
        return false;
    }
    let (min, max) = min_max_view_index(shape, strides, 0);
    (max - min + 1) as usize == len
}
