use crate::element::{Element, Promote, Promoted};
use crate::prelude::KernelResult;
use crate::shape::ShapeCheck;
use ndarray::{Array, ArrayView, Dimension, Zip};

/// Pairwise addition and subtraction of equally shaped containers.
///
/// Works for vectors (`Ix1`) and matrices (`Ix2`) alike; the result kind is
/// floating-point whenever either operand is.
pub struct ElementwiseHelper;

impl ElementwiseHelper {
    /// `C = A + B`.
    pub fn add<A, B, D>(
        lhs: ArrayView<A, D>,
        rhs: ArrayView<B, D>,
        hint: Option<D>,
    ) -> KernelResult<Array<Promoted<A, B>, D>>
    where
        A: Promote<B>,
        B: Element,
        D: Dimension,
    {
        Self::combine(lhs, rhs, hint, <A as Promote<B>>::promoted_add)
    }

    /// `C = A - B`.
    pub fn subtract<A, B, D>(
        lhs: ArrayView<A, D>,
        rhs: ArrayView<B, D>,
        hint: Option<D>,
    ) -> KernelResult<Array<Promoted<A, B>, D>>
    where
        A: Promote<B>,
        B: Element,
        D: Dimension,
    {
        Self::combine(lhs, rhs, hint, <A as Promote<B>>::promoted_sub)
    }

    fn combine<A, B, D, F>(
        lhs: ArrayView<A, D>,
        rhs: ArrayView<B, D>,
        hint: Option<D>,
        op: F,
    ) -> KernelResult<Array<Promoted<A, B>, D>>
    where
        A: Promote<B>,
        B: Element,
        D: Dimension,
        F: Fn(A, B) -> Promoted<A, B>,
    {
        ShapeCheck::hint(hint.as_ref(), &lhs.raw_dim())?;
        ShapeCheck::same_shape(lhs.shape(), rhs.shape())?;

        Ok(Zip::from(lhs).and(rhs).map_collect(|&a, &b| op(a, b)))
    }
}
