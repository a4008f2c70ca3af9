use crate::element::{Element, Promote, Promoted};
use crate::prelude::{KernelResult, Matrix};
use crate::shape::ShapeCheck;
use ndarray::{ArrayView1, Ix2};
use num_traits::Zero;

/// Vector-vector products other than the cross product.
pub struct ProductHelper;

impl ProductHelper {
    /// `Σ A[i] * B[i]` over two equal-length vectors, summed in index order.
    pub fn dot<A, B>(
        lhs: ArrayView1<A>,
        rhs: ArrayView1<B>,
        hint: Option<usize>,
    ) -> KernelResult<Promoted<A, B>>
    where
        A: Promote<B>,
        B: Element,
    {
        ShapeCheck::hint_length(hint, lhs.len())?;
        ShapeCheck::lengths(lhs.len(), rhs.len())?;

        Ok(accumulate(lhs, rhs))
    }

    /// `C[i, j] = A[i] * B[j]`; the lengths of `A` and `B` are independent.
    ///
    /// `hint` is the expected result shape `(A.len(), B.len())`.
    pub fn outer<A, B>(
        lhs: ArrayView1<A>,
        rhs: ArrayView1<B>,
        hint: Option<Ix2>,
    ) -> KernelResult<Matrix<Promoted<A, B>>>
    where
        A: Promote<B>,
        B: Element,
    {
        let shape = Ix2(lhs.len(), rhs.len());
        ShapeCheck::hint(hint.as_ref(), &shape)?;

        Ok(Matrix::from_shape_fn(shape, |(i, j)| {
            lhs[i].promoted_mul(rhs[j])
        }))
    }
}

/// Multiply-add over two equal-length views, starting from zero and summing
/// in index order. Callers have already validated the lengths.
pub(crate) fn accumulate<A, B>(lhs: ArrayView1<A>, rhs: ArrayView1<B>) -> Promoted<A, B>
where
    A: Promote<B>,
    B: Element,
{
    lhs.iter()
        .zip(rhs.iter())
        .fold(<Promoted<A, B> as Zero>::zero(), |acc, (&a, &b)| {
            acc.wrapping_add(a.promoted_mul(b))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::KernelError;
    use crate::shape::ShapeAxis;
    use ndarray::array;

    #[test]
    fn integer_dot_wraps_on_overflow() {
        let a = array![i64::MAX, 1];
        let b = array![2_i64, 3];
        let dot = ProductHelper::dot(a.view(), b.view(), None).unwrap();
        assert_eq!(dot, i64::MAX.wrapping_mul(2).wrapping_add(3));
    }

    #[test]
    fn dot_of_integer_vectors() {
        let a = array![1_i64, 2, 3];
        let b = array![4_i64, 5, 6];
        assert_eq!(ProductHelper::dot(a.view(), b.view(), None).unwrap(), 32);
    }

    #[test]
    fn dot_of_mixed_vectors_is_float() {
        let a = array![1_i64, 2];
        let b = array![0.5, 0.25];
        let value: f64 = ProductHelper::dot(a.view(), b.view(), Some(2)).unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn dot_of_empty_vectors_is_zero() {
        let a = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(ProductHelper::dot(a.view(), a.view(), None).unwrap(), 0.0);
    }

    #[test]
    fn dot_length_mismatch() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![1.0, 2.0];
        let err = ProductHelper::dot(a.view(), b.view(), None).unwrap_err();
        assert_eq!(
            err,
            KernelError::ShapeMismatch {
                axis: ShapeAxis::Length,
                left: 3,
                right: 2
            }
        );
    }

    #[test]
    fn outer_accepts_different_lengths() {
        let a = array![1_i64, 2, 3];
        let b = array![10_i64, 20];
        let c = ProductHelper::outer(a.view(), b.view(), None).unwrap();
        assert_eq!(c, array![[10_i64, 20], [20, 40], [30, 60]]);
    }

    #[test]
    fn outer_with_float_operand_is_float() {
        let a = array![2_i64];
        let b = array![0.5, 1.5];
        let c = ProductHelper::outer(a.view(), b.view(), Some(Ix2(1, 2))).unwrap();
        assert_eq!(c, array![[1.0, 3.0]]);
    }

    #[test]
    fn outer_rejects_transposed_hint() {
        let a = array![1.0, 2.0, 3.0];
        let b = array![1.0];
        let err = ProductHelper::outer(a.view(), b.view(), Some(Ix2(1, 3))).unwrap_err();
        assert!(matches!(
            err,
            KernelError::ShapeMismatch {
                axis: ShapeAxis::Rows,
                ..
            }
        ));
    }
}
