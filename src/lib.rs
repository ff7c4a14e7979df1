//! Loop-interchange and broadcasting traversal kernels for strided n-dimensional arrays.
//!
//! This crate applies element-wise callbacks across arbitrarily strided,
//! arbitrarily ordered multidimensional buffers. Every operation flows through
//! the same pipeline:
//!
//! 1. **Broadcast** input shapes against the output shape (zero strides for
//!    virtual dimensions)
//! 2. **Order** loop dimensions so the primary array is walked with its
//!    smallest stride innermost
//! 3. **Collapse** singleton dimensions and fuse dimensions that are contiguous
//!    for every array
//! 4. **Increment**: convert strides into per-dimension pointer deltas
//! 5. **Traverse** with a rank-specialized nested loop, a blocked loop, or the
//!    generic odometer, reading and writing elements through an [`Accessor`]
//!
//! # Core Types
//!
//! - [`StridedView`] / [`StridedViewMut`]: borrowed n-dimensional descriptors
//!   (buffer, shape, strides, offset, order)
//! - [`StridedArray`]: owned contiguous array, returned by allocating operations
//! - [`Accessor`] / [`Mutator`] with [`Direct`], [`Interleaved`], [`Generic`]:
//!   element access over plain, interleaved-complex, and generic buffers
//!
//! # Operations
//!
//! - [`unary_into`], [`broadcasted_unary_into`], [`unary_indexed_into`],
//!   [`unary_with_source_into`]: map one array into another
//! - [`binary_into`], [`binary`]: broadcasting binary maps
//! - [`nullary_into`], [`fill`]: fill an output
//! - [`for_each`], [`reduce`], [`zip_reduce`]: visit and reduce
//! - [`strided`]: one-dimensional strided kernels
//! - [`index`]: linear index / subscript conversions
//!
//! # Example
//!
//! ```rust
//! use strided_traverse::{binary, Order, StridedArray};
//!
//! let x = StridedArray::from_vec(vec![1.0, 2.0], &[1, 2], Order::RowMajor).unwrap();
//! let y = StridedArray::from_vec(vec![10.0, 20.0], &[2, 1], Order::RowMajor).unwrap();
//!
//! let z = binary(&x.view(), &y.view(), |a: f64, b: f64| a + b).unwrap();
//! assert_eq!(z.dims(), &[2, 2]);
//! assert_eq!(z.data(), &[11.0, 12.0, 21.0, 22.0]);
//! ```

mod accessor;
mod auxiliary;
pub mod broadcast;
mod dtype;
mod fuse;
pub mod increments;
pub mod index;
pub mod kernel;
pub mod layout;
mod map;
pub mod order;
pub mod plan;
mod pod_complex;
pub mod strided;
mod view;

// ============================================================================
// Element access
// ============================================================================
pub use accessor::{Accessor, Direct, Generic, Interleaved, Mutator};
pub use dtype::{Dtype, Element};
pub use pod_complex::{
    complex_as_interleaved, complex_as_interleaved_mut, interleaved_as_complex,
    interleaved_as_complex_mut,
};

// ============================================================================
// Views and layout
// ============================================================================
pub use layout::{Layout, Order};
pub use view::{ArrayView, ArrayViewMut, StridedArray, StridedView, StridedViewMut};

// ============================================================================
// Planning and traversal
// ============================================================================
pub use broadcast::{broadcast_shapes, broadcast_strides};
pub use increments::compute_increments;
pub use index::IndexMode;
pub use kernel::{traverse, traverse_blocked, traverse_generic};
pub use order::loop_order;
pub use plan::{LoopPlan, Strategy};

// ============================================================================
// High-level operations
// ============================================================================
pub use map::{
    binary, binary_into, broadcasted_unary_into, fill, for_each, for_each_indexed,
    mask_unary_into, nullary_into, reduce, unary, unary_indexed_into, unary_into,
    unary_with_source_into, zip_reduce,
};

// ============================================================================
// Constants
// ============================================================================

/// Tile size for blocked iteration, in bytes (one cache line).
pub const BLOCK_SIZE_IN_BYTES: usize = 64;

/// Tile size for blocked iteration, in elements, used when the element size
/// is unknown (generic buffers).
pub const BLOCK_SIZE_IN_ELEMENTS: usize = 8;

/// Highest rank served by the unrolled nested-loop kernels.
///
/// Plans of higher rank run through [`traverse_generic`].
pub const MAX_UNROLLED_RANK: usize = 10;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while describing or traversing strided arrays.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Shapes cannot be broadcast against each other.
    #[error("shape mismatch in dimension {dim}: {left:?} vs {right:?}")]
    ShapeMismatch {
        dim: usize,
        left: Vec<usize>,
        right: Vec<usize>,
    },

    /// Stride array length doesn't match the number of dimensions.
    #[error("invalid descriptor: {strides} strides for {dims} dimensions")]
    StrideLengthMismatch { dims: usize, strides: usize },

    /// The view would address elements outside its buffer.
    #[error("invalid descriptor: view spans buffer indices {min}..={max} but buffer has {len} elements")]
    OutOfBounds { min: isize, max: isize, len: usize },

    /// Integer overflow while computing an offset.
    #[error("invalid descriptor: offset overflow while computing buffer index")]
    OffsetOverflow,

    /// A dimension permutation is not a permutation of `0..rank`.
    #[error("invalid descriptor: {0:?} is not a permutation")]
    InvalidPermutation(Vec<usize>),

    /// A linear index or subscript falls outside `0..=max`.
    #[error("index {index} out of bounds, expected a value in 0..={max}")]
    IndexOutOfBounds { index: isize, max: isize },

    /// Unrecognized memory order name.
    #[error("invalid order: {0:?}")]
    InvalidOrder(String),

    /// Unrecognized index mode name.
    #[error("invalid index mode: {0:?}")]
    InvalidIndexMode(String),
}

impl StridedError {
    /// Whether the error describes a malformed shape/stride/offset combination.
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(
            self,
            StridedError::StrideLengthMismatch { .. }
                | StridedError::OutOfBounds { .. }
                | StridedError::OffsetOverflow
                | StridedError::InvalidPermutation(_)
        )
    }
}

/// Result type for strided array operations.
pub type Result<T> = std::result::Result<T, StridedError>;
