use ndarray::{Array1, Array2};

pub use crate::element::{Element, ElementKind, Promote, Promoted};
pub use crate::math::{
    CrossHelper, CrossProduct, ElementwiseHelper, MatrixHelper, ProductDims, ProductHelper,
    ScalingHelper, StatsHelper,
};
pub use crate::shape::{ShapeAxis, ShapeCheck};

/// Ordered, fixed-length sequence of elements.
pub type Vector<T> = Array1<T>;

/// Row-major grid of elements.
pub type Matrix<T> = Array2<T>;

/// Cross product lengths that produce a vector.
pub const CROSS_LENGTHS: &[usize] = &[1, 3, 7];

/// Common error type for kernel operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("shape mismatch on {axis}: {left} vs {right}")]
    ShapeMismatch {
        axis: ShapeAxis,
        left: usize,
        right: usize,
    },
    #[error("{operation} is undefined for lengths {left} and {right} (supported: {supported:?})")]
    UnsupportedDimension {
        operation: &'static str,
        left: usize,
        right: usize,
        supported: &'static [usize],
    },
}

pub type KernelResult<T> = Result<T, KernelError>;
