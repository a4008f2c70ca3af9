//! Dense vector/matrix arithmetic kernel.
//!
//! Vectors and matrices are `ndarray` containers of `i64` or `f64` elements.
//! Every operation borrows its operands, allocates a fresh result and never
//! mutates an input. Binary operations promote integer operands to
//! floating-point whenever the other side is floating-point, and validate
//! shapes before touching any element.
//!
//! ```
//! use arithkernel::prelude::*;
//! use ndarray::array;
//!
//! let a = array![1_i64, 2];
//! let b = array![1.5, 2.5];
//! let sum = ElementwiseHelper::add(a.view(), b.view(), None)?;
//! assert_eq!(sum, array![2.5, 4.5]);
//! # Ok::<(), KernelError>(())
//! ```

pub mod element;
pub mod math;
pub mod prelude;
pub mod shape;

pub use math::{
    CrossHelper, CrossProduct, ElementwiseHelper, MatrixHelper, ProductDims, ProductHelper,
    ScalingHelper, StatsHelper,
};
pub use prelude::{KernelError, KernelResult, Matrix, Vector};
