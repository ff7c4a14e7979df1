//! Loop plans: the per-call bundle of loop order, collapsed dimensions,
//! increments, and traversal strategy.
//!
//! A plan is built in four steps:
//! 1. Order loop dimensions with [`loop_order`]
//! 2. Collapse singleton and contiguous dimensions
//! 3. Compute odometer increments for every array
//! 4. Select a [`Strategy`]
//!
//! Shapes must already agree; broadcasting happens before planning.

use crate::fuse::collapse_dims;
use crate::increments::fill_increments;
use crate::kernel::{block_size, traverse, traverse_blocked, traverse_generic, traverse_indexed};
use crate::layout::{iteration_order, numel, Order};
use crate::order::loop_order;
use crate::{Result, StridedError, MAX_UNROLLED_RANK};

/// How a single array takes part in a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    pub strides: &'a [isize],
    pub offset: usize,
    pub order: Order,
    /// Element width, `None` when unknown (generic buffers).
    pub bytes_per_element: Option<usize>,
}

/// Traversal strategy chosen for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Some dimension is zero; nothing to visit.
    Empty,
    /// Rank 0; exactly one element.
    Scalar,
    /// Collapsed to a single loop.
    Linear,
    /// Unrolled nested loops.
    Nested,
    /// Tiled loops for arrays with conflicting directions or layouts.
    Blocked,
    /// Odometer for ranks above [`MAX_UNROLLED_RANK`].
    Generic,
}

/// Execution plan for traversing `M` arrays of a common shape.
#[derive(Debug, Clone)]
pub struct LoopPlan<const M: usize> {
    /// Loop dimensions, innermost first.
    pub dims: Vec<usize>,
    /// `strides[d][k]`: stride of array `k` along loop dimension `d`.
    pub strides: Vec<[isize; M]>,
    /// `increments[d][k]`: odometer increment of array `k` along loop dimension `d`.
    pub increments: Vec<[isize; M]>,
    /// Buffer index of the first element of each array.
    pub offsets: [usize; M],
    /// Array dimension walked by each loop dimension, before collapsing.
    pub perm: Vec<usize>,
    pub strategy: Strategy,
    /// Tile size used by [`Strategy::Blocked`].
    pub block_size: usize,
}

fn check_operands<const M: usize>(shape: &[usize], operands: &[Operand<'_>; M]) -> Result<()> {
    for op in operands {
        if op.strides.len() != shape.len() {
            return Err(StridedError::StrideLengthMismatch {
                dims: shape.len(),
                strides: op.strides.len(),
            });
        }
    }
    Ok(())
}

fn ordered<const M: usize>(
    shape: &[usize],
    operands: &[Operand<'_>; M],
    primary: usize,
) -> (Vec<usize>, Vec<usize>, Vec<[isize; M]>) {
    debug_assert!(primary < M);
    let secondary = (0..M).find(|&k| k != primary).map(|k| operands[k].strides);
    let perm = loop_order(shape, operands[primary].strides, secondary);
    let dims: Vec<usize> = perm.iter().map(|&p| shape[p]).collect();
    let strides: Vec<[isize; M]> = perm
        .iter()
        .map(|&p| std::array::from_fn(|k| operands[k].strides[p]))
        .collect();
    (perm, dims, strides)
}

impl<const M: usize> LoopPlan<M> {
    /// Build a plan for an element-wise traversal.
    ///
    /// # Arguments
    /// * `shape` - Common shape of all arrays
    /// * `operands` - Stride, offset, and layout information per array
    /// * `primary` - Index of the array whose strides decide the loop order
    pub fn new(shape: &[usize], operands: [Operand<'_>; M], primary: usize) -> Result<Self> {
        check_operands(shape, &operands)?;
        let offsets = operands.map(|op| op.offset);
        let bsize = block_size(&operands.map(|op| op.bytes_per_element));

        if shape.contains(&0) {
            return Ok(Self::trivial(Strategy::Empty, offsets, bsize));
        }
        if shape.is_empty() {
            return Ok(Self::trivial(Strategy::Scalar, offsets, bsize));
        }

        let (perm, mut dims, mut strides) = ordered(shape, &operands, primary);
        collapse_dims(&mut dims, &mut strides);
        let mut increments = vec![[0isize; M]; dims.len()];
        fill_increments(&dims, &strides, &mut increments);

        let strategy = if dims.len() <= 1 {
            Strategy::Linear
        } else if dims.len() > MAX_UNROLLED_RANK {
            Strategy::Generic
        } else {
            let consistent = operands.iter().all(|op| iteration_order(op.strides) != 0);
            let same_order = operands.iter().all(|op| op.order == operands[0].order);
            if consistent && same_order {
                Strategy::Nested
            } else {
                Strategy::Blocked
            }
        };

        log::debug!(
            "loop plan: strategy={:?}, rank {} -> {}, arrays={}",
            strategy,
            shape.len(),
            dims.len(),
            M
        );
        log::trace!(
            "loop plan: perm={:?}, dims={:?}, strides={:?}, increments={:?}",
            perm,
            dims,
            strides,
            increments
        );

        Ok(Self {
            dims,
            strides,
            increments,
            offsets,
            perm,
            strategy,
            block_size: bsize,
        })
    }

    /// Build a plan that keeps every dimension, for index-tracking traversal.
    ///
    /// Dimensions are ordered but never collapsed, so [`Self::perm`] maps each
    /// loop dimension back to an array dimension.
    pub fn new_indexed(
        shape: &[usize],
        operands: [Operand<'_>; M],
        primary: usize,
    ) -> Result<Self> {
        check_operands(shape, &operands)?;
        let offsets = operands.map(|op| op.offset);
        let bsize = block_size(&operands.map(|op| op.bytes_per_element));

        if shape.contains(&0) {
            return Ok(Self::trivial(Strategy::Empty, offsets, bsize));
        }
        if shape.is_empty() {
            return Ok(Self::trivial(Strategy::Scalar, offsets, bsize));
        }

        let (perm, dims, strides) = ordered(shape, &operands, primary);
        let mut increments = vec![[0isize; M]; dims.len()];
        fill_increments(&dims, &strides, &mut increments);
        log::debug!("indexed loop plan: rank {}, perm={:?}", dims.len(), perm);

        Ok(Self {
            dims,
            strides,
            increments,
            offsets,
            perm,
            strategy: Strategy::Nested,
            block_size: bsize,
        })
    }

    fn trivial(strategy: Strategy, offsets: [usize; M], block_size: usize) -> Self {
        log::debug!("loop plan: strategy={:?}, arrays={}", strategy, M);
        Self {
            dims: Vec::new(),
            strides: Vec::new(),
            increments: Vec::new(),
            offsets,
            perm: Vec::new(),
            strategy,
            block_size,
        }
    }

    /// Number of elements the plan visits.
    pub fn len(&self) -> usize {
        match self.strategy {
            Strategy::Empty => 0,
            _ => numel(&self.dims),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strategy == Strategy::Empty
    }

    /// Run the plan, calling `f` with the buffer index of every array.
    pub fn execute<F>(&self, f: F)
    where
        F: FnMut([usize; M]),
    {
        match self.strategy {
            Strategy::Empty => {}
            Strategy::Scalar | Strategy::Linear | Strategy::Nested => {
                traverse(&self.dims, self.offsets, &self.increments, f)
            }
            Strategy::Blocked => {
                traverse_blocked(&self.dims, self.offsets, &self.strides, self.block_size, f)
            }
            Strategy::Generic => traverse_generic(&self.dims, self.offsets, &self.increments, f),
        }
    }

    /// Run an index-tracking plan built with [`Self::new_indexed`].
    ///
    /// `f` receives the logical subscripts (array dimension order) and the
    /// buffer index of every array.
    pub fn execute_indexed<F>(&self, f: F)
    where
        F: FnMut(&[usize], [usize; M]),
    {
        if self.strategy == Strategy::Empty {
            return;
        }
        traverse_indexed(&self.dims, &self.perm, self.offsets, &self.increments, f)
    }
}
