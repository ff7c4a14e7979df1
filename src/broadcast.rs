//! NumPy-style broadcasting.
//!
//! Shapes are aligned on their trailing dimensions. Along each output
//! dimension every input must have either the output's size or size 1;
//! missing leading dimensions count as size 1. A broadcast dimension gets
//! stride 0, so one stored element is read repeatedly without copying.

use crate::{Result, StridedError};

/// Compute the shape that every input shape broadcasts to.
///
/// An empty list of shapes broadcasts to the empty (rank-0) shape.
///
/// # Errors
/// [`StridedError::ShapeMismatch`] naming the output dimension and the two
/// shapes that disagree along it.
///
/// # Example
/// ```rust
/// use strided_traverse::broadcast_shapes;
///
/// assert_eq!(broadcast_shapes(&[&[1, 3], &[2, 1]]).unwrap(), vec![2, 3]);
/// assert_eq!(broadcast_shapes(&[&[8, 1, 6, 1], &[7, 1, 5]]).unwrap(), vec![8, 7, 6, 5]);
/// assert!(broadcast_shapes(&[&[2, 3], &[4, 5]]).is_err());
/// ```
pub fn broadcast_shapes(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let rank = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1usize; rank];

    for (i, dim) in out.iter_mut().enumerate() {
        // Shape that set the current size, for error reporting
        let mut owner: Option<usize> = None;
        for (j, shape) in shapes.iter().enumerate() {
            let lead = rank - shape.len();
            if i < lead {
                continue;
            }
            let n = shape[i - lead];
            if n == 1 {
                continue;
            }
            match owner {
                None => {
                    *dim = n;
                    owner = Some(j);
                }
                Some(k) if n != *dim => {
                    return Err(StridedError::ShapeMismatch {
                        dim: i,
                        left: shapes[k].to_vec(),
                        right: shape.to_vec(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(out)
}

/// Strides that read an array of `in_shape` as if it had `out_shape`.
///
/// Leading dimensions absent from `in_shape` and dimensions of size 1 that
/// are stretched get stride 0; all other strides are kept.
///
/// # Errors
/// * [`StridedError::StrideLengthMismatch`] if `in_strides` doesn't match `in_shape`
/// * [`StridedError::RankMismatch`] if `in_shape` has more dimensions than `out_shape`
/// * [`StridedError::ShapeMismatch`] if a dimension can't be stretched
pub fn broadcast_strides(
    in_shape: &[usize],
    in_strides: &[isize],
    out_shape: &[usize],
) -> Result<Vec<isize>> {
    if in_strides.len() != in_shape.len() {
        return Err(StridedError::StrideLengthMismatch {
            dims: in_shape.len(),
            strides: in_strides.len(),
        });
    }
    if in_shape.len() > out_shape.len() {
        return Err(StridedError::RankMismatch(in_shape.len(), out_shape.len()));
    }

    let lead = out_shape.len() - in_shape.len();
    let mut strides = vec![0isize; out_shape.len()];
    for (i, &n) in out_shape.iter().enumerate().skip(lead) {
        let j = i - lead;
        if in_shape[j] == n {
            strides[i] = in_strides[j];
        } else if in_shape[j] == 1 {
            strides[i] = 0;
        } else {
            return Err(StridedError::ShapeMismatch {
                dim: i,
                left: in_shape.to_vec(),
                right: out_shape.to_vec(),
            });
        }
    }
    Ok(strides)
}
