use crate::element::{Element, Promote, Promoted};
use crate::math::products::accumulate;
use crate::prelude::{KernelResult, Matrix, Vector};
use crate::shape::{ShapeAxis, ShapeCheck};
use ndarray::{ArrayView1, ArrayView2, Ix2, Zip};
use serde::{Deserialize, Serialize};

/// Precomputed dimensions of a `rows × inner` by `inner × cols` product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDims {
    pub rows: usize,
    pub inner: usize,
    pub cols: usize,
}

impl ProductDims {
    pub fn new(rows: usize, inner: usize, cols: usize) -> Self {
        Self { rows, inner, cols }
    }
}

// Rows (or columns) are independent, so they may be filled in parallel. Every
// output element is still a sequential left-to-right sum.
macro_rules! fill {
    ($zip:expr, $body:expr) => {{
        #[cfg(feature = "parallel")]
        {
            $zip.par_for_each($body)
        }
        #[cfg(not(feature = "parallel"))]
        {
            $zip.for_each($body)
        }
    }};
}

/// Matrix-matrix, matrix-vector and vector-matrix products.
pub struct MatrixHelper;

impl MatrixHelper {
    /// `C[i, j] = Σ_k A[i, k] * B[k, j]` for `A: p×q`, `B: q×r`.
    pub fn multiply<A, B>(
        lhs: ArrayView2<A>,
        rhs: ArrayView2<B>,
        hint: Option<ProductDims>,
    ) -> KernelResult<Matrix<Promoted<A, B>>>
    where
        A: Promote<B>,
        B: Element,
    {
        if let Some(dims) = hint {
            ShapeCheck::axis(ShapeAxis::Rows, dims.rows, lhs.nrows())?;
            ShapeCheck::axis(ShapeAxis::Inner, dims.inner, lhs.ncols())?;
            ShapeCheck::axis(ShapeAxis::Columns, dims.cols, rhs.ncols())?;
        }
        ShapeCheck::inner(lhs.ncols(), rhs.nrows())?;

        let mut product = Matrix::zeros((lhs.nrows(), rhs.ncols()));
        fill!(
            Zip::from(product.rows_mut()).and(lhs.rows()),
            |mut out_row, lhs_row| {
                for (j, out) in out_row.iter_mut().enumerate() {
                    *out = accumulate(lhs_row, rhs.column(j));
                }
            }
        );
        Ok(product)
    }

    /// `C[i] = Σ_j A[i, j] * v[j]`, treating `v` as a column vector.
    ///
    /// `hint` is the shape of `matrix`.
    pub fn multiply_vector<A, B>(
        matrix: ArrayView2<A>,
        vector: ArrayView1<B>,
        hint: Option<Ix2>,
    ) -> KernelResult<Vector<Promoted<A, B>>>
    where
        A: Promote<B>,
        B: Element,
    {
        ShapeCheck::hint(hint.as_ref(), &matrix.raw_dim())?;
        ShapeCheck::inner(matrix.ncols(), vector.len())?;

        let mut product = Vector::zeros(matrix.nrows());
        fill!(
            Zip::from(&mut product).and(matrix.rows()),
            |out, row| *out = accumulate(row, vector)
        );
        Ok(product)
    }

    /// `C[i] = Σ_j v[j] * A[j, i]`, treating `v` as a row vector.
    ///
    /// `hint` is the shape of `matrix`.
    pub fn vector_multiply<B, A>(
        vector: ArrayView1<B>,
        matrix: ArrayView2<A>,
        hint: Option<Ix2>,
    ) -> KernelResult<Vector<Promoted<B, A>>>
    where
        B: Promote<A>,
        A: Element,
    {
        ShapeCheck::hint(hint.as_ref(), &matrix.raw_dim())?;
        ShapeCheck::inner(vector.len(), matrix.nrows())?;

        let mut product = Vector::zeros(matrix.ncols());
        fill!(
            Zip::from(&mut product).and(matrix.columns()),
            |out, column| *out = accumulate(vector, column)
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::KernelError;
    use ndarray::array;

    #[test]
    fn multiply_integer_matrices() {
        let a = array![[1_i64, 2, 3], [4, 5, 6]];
        let b = array![[7_i64, 8], [9, 10], [11, 12]];
        let c = MatrixHelper::multiply(a.view(), b.view(), None).unwrap();
        assert_eq!(c, array![[58_i64, 64], [139, 154]]);
    }

    #[test]
    fn multiply_mixed_matrices_promotes() {
        let a = array![[1_i64, 0], [0, 1]];
        let b = array![[0.5, 1.5], [2.5, 3.5]];
        let dims = ProductDims::new(2, 2, 2);
        let c = MatrixHelper::multiply(a.view(), b.view(), Some(dims)).unwrap();
        assert_eq!(c, b);
    }

    #[test]
    fn multiply_inner_mismatch() {
        let a = Matrix::<f64>::zeros((2, 3));
        let b = Matrix::<f64>::zeros((2, 3));
        let err = MatrixHelper::multiply(a.view(), b.view(), None).unwrap_err();
        assert_eq!(
            err,
            KernelError::ShapeMismatch {
                axis: ShapeAxis::Inner,
                left: 3,
                right: 2
            }
        );
    }

    #[test]
    fn multiply_rejects_wrong_dims() {
        let a = Matrix::<f64>::zeros((2, 3));
        let b = Matrix::<f64>::zeros((3, 4));
        let err = MatrixHelper::multiply(a.view(), b.view(), Some(ProductDims::new(2, 3, 5)))
            .unwrap_err();
        assert!(matches!(
            err,
            KernelError::ShapeMismatch {
                axis: ShapeAxis::Columns,
                left: 5,
                right: 4
            }
        ));
    }

    #[test]
    fn multiply_with_empty_inner_dimension_is_zero() {
        let a = Matrix::<i64>::zeros((2, 0));
        let b = Matrix::<i64>::zeros((0, 3));
        let c = MatrixHelper::multiply(a.view(), b.view(), None).unwrap();
        assert_eq!(c, Matrix::<i64>::zeros((2, 3)));
    }

    #[test]
    fn matrix_times_column_vector() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let v = array![1_i64, 0, -1];
        let c = MatrixHelper::multiply_vector(a.view(), v.view(), Some(Ix2(2, 3))).unwrap();
        assert_eq!(c, array![-2.0, -2.0]);
    }

    #[test]
    fn matrix_times_wrong_length_vector_fails() {
        let a = Matrix::<f64>::zeros((2, 3));
        let v = array![1.0, 2.0, 3.0, 4.0];
        let err = MatrixHelper::multiply_vector(a.view(), v.view(), None).unwrap_err();
        assert!(matches!(
            err,
            KernelError::ShapeMismatch {
                axis: ShapeAxis::Inner,
                left: 3,
                right: 4
            }
        ));
    }

    #[test]
    fn row_vector_times_matrix() {
        let v = array![1_i64, 2];
        let a = array![[1_i64, 2, 3], [4, 5, 6]];
        let c = MatrixHelper::vector_multiply(v.view(), a.view(), None).unwrap();
        assert_eq!(c, array![9_i64, 12, 15]);
    }

    #[test]
    fn row_vector_length_must_match_rows() {
        let v = array![1.0, 2.0, 3.0];
        let a = Matrix::<f64>::zeros((2, 3));
        let err = MatrixHelper::vector_multiply(v.view(), a.view(), None).unwrap_err();
        assert!(matches!(err, KernelError::ShapeMismatch { left: 3, right: 2, .. }));
    }

    #[test]
    fn identity_leaves_integer_vector_unchanged() {
        let identity = Matrix::<i64>::eye(4);
        let v = array![3_i64, -1, 4, 1];
        let c = MatrixHelper::multiply_vector(identity.view(), v.view(), None).unwrap();
        assert_eq!(c, v);
    }

    #[test]
    fn vector_matrix_agrees_with_transposed_matrix_vector() {
        let v = array![0.5, -2.0];
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let row = MatrixHelper::vector_multiply(v.view(), a.view(), None).unwrap();
        let col = MatrixHelper::multiply_vector(a.t(), v.view(), None).unwrap();
        assert_eq!(row, col);
    }
}
