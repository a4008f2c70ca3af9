use crate::element::{Element, Promote, Promoted};
use crate::prelude::KernelResult;
use crate::shape::ShapeCheck;
use ndarray::{Array, ArrayView, Dimension};

/// Scalar scaling of vectors and matrices.
pub struct ScalingHelper;

impl ScalingHelper {
    /// Multiplies every element of `container` by `scalar`.
    ///
    /// The result is integer only when both the scalar and the container are.
    /// `hint` is the container's own shape; with `None` this never fails.
    pub fn multiply<S, A, D>(
        scalar: S,
        container: ArrayView<A, D>,
        hint: Option<D>,
    ) -> KernelResult<Array<Promoted<S, A>, D>>
    where
        S: Promote<A>,
        A: Element,
        D: Dimension,
    {
        ShapeCheck::hint(hint.as_ref(), &container.raw_dim())?;
        Ok(container.map(|&value| scalar.promoted_mul(value)))
    }

    /// Multiplies every element of `container` by `1 / divisor`.
    ///
    /// Division always yields floating-point elements. A zero divisor is not
    /// special-cased and follows IEEE infinity/NaN rules.
    pub fn divide<A, D>(
        container: ArrayView<A, D>,
        divisor: f64,
        hint: Option<D>,
    ) -> KernelResult<Array<f64, D>>
    where
        A: Element,
        f64: Promote<A, Output = f64>,
        D: Dimension,
    {
        Self::multiply(1.0 / divisor, container, hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::KernelError;
    use ndarray::{array, Ix2};

    #[test]
    fn integer_scalar_on_integer_vector_stays_integer() {
        let v = array![1_i64, -2, 3];
        assert_eq!(
            ScalingHelper::multiply(3_i64, v.view(), None).unwrap(),
            array![3_i64, -6, 9]
        );
    }

    #[test]
    fn float_scalar_promotes_integer_matrix() {
        let m = array![[1_i64, 2], [3, 4]];
        let scaled = ScalingHelper::multiply(0.5, m.view(), None).unwrap();
        assert_eq!(scaled, array![[0.5, 1.0], [1.5, 2.0]]);
    }

    #[test]
    fn integer_scalar_promotes_with_float_container() {
        let v = array![0.25, 0.5];
        assert_eq!(
            ScalingHelper::multiply(4_i64, v.view(), None).unwrap(),
            array![1.0, 2.0]
        );
    }

    #[test]
    fn divide_is_multiply_by_reciprocal() {
        let v = array![2_i64, 4, 8];
        let divided = ScalingHelper::divide(v.view(), 4.0, None).unwrap();
        let scaled = ScalingHelper::multiply(0.25, v.view(), None).unwrap();
        assert_eq!(divided, scaled);
        assert_eq!(divided, array![0.5, 1.0, 2.0]);
    }

    #[test]
    fn divide_by_zero_follows_float_semantics() {
        let v = array![1.0, -1.0, 0.0];
        let out = ScalingHelper::divide(v.view(), 0.0, None).unwrap();
        assert_eq!(out[0], f64::INFINITY);
        assert_eq!(out[1], f64::NEG_INFINITY);
        assert!(out[2].is_nan());
    }

    #[test]
    fn hint_must_describe_container() {
        let m = array![[1.0, 2.0, 3.0]];
        assert!(ScalingHelper::multiply(2.0, m.view(), Some(Ix2(1, 3))).is_ok());
        let err = ScalingHelper::divide(m.view(), 2.0, Some(Ix2(3, 1))).unwrap_err();
        assert!(matches!(err, KernelError::ShapeMismatch { .. }));
    }
}
