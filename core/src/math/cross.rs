//! Dimension-specialized cross products.
//!
//! A bilinear, anticommutative product orthogonal to both operands only
//! exists for vectors of length 3 and 7. Length 1 is accepted and always
//! yields the zero vector; length 2 yields the scalar z-component of the two
//! vectors embedded in the x-y plane.

use crate::element::{Element, Promote, Promoted};
use crate::prelude::{KernelError, KernelResult, Vector, CROSS_LENGTHS};
use crate::shape::ShapeCheck;
use ndarray::{Array1, ArrayView1};

/// Lengths accepted by [`CrossHelper::planar`].
pub const PLANAR_LENGTHS: &[usize] = &[2, 3];

/// Result of [`CrossHelper::product`].
#[derive(Debug, Clone, PartialEq)]
pub enum CrossProduct<T> {
    Vector(Vector<T>),
    /// z-component of two length-2 operands.
    Scalar(T),
}

impl<T: Element> CrossProduct<T> {
    pub fn as_vector(&self) -> Option<&Vector<T>> {
        match self {
            CrossProduct::Vector(v) => Some(v),
            CrossProduct::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<T> {
        match self {
            CrossProduct::Scalar(z) => Some(*z),
            CrossProduct::Vector(_) => None,
        }
    }

    /// Returns the result as a vector, placing a planar z-component into
    /// `[0, 0, z]`.
    pub fn embed(self) -> Vector<T> {
        match self {
            CrossProduct::Vector(v) => v,
            CrossProduct::Scalar(z) => Array1::from(vec![T::zero(), T::zero(), z]),
        }
    }
}

impl<T: Element> std::ops::Neg for CrossProduct<T> {
    type Output = CrossProduct<T>;

    fn neg(self) -> Self::Output {
        match self {
            CrossProduct::Vector(v) => CrossProduct::Vector(v.mapv(negate)),
            CrossProduct::Scalar(z) => CrossProduct::Scalar(negate(z)),
        }
    }
}

pub struct CrossHelper;

impl CrossHelper {
    /// Cross product of two vectors of equal length 1, 2, 3 or 7.
    ///
    /// `hint` is the length of `lhs`.
    pub fn product<A, B>(
        lhs: ArrayView1<A>,
        rhs: ArrayView1<B>,
        hint: Option<usize>,
    ) -> KernelResult<CrossProduct<Promoted<A, B>>>
    where
        A: Promote<B>,
        B: Element,
    {
        ShapeCheck::hint_length(hint, lhs.len())?;
        let unsupported = KernelError::UnsupportedDimension {
            operation: "cross product",
            left: lhs.len(),
            right: rhs.len(),
            supported: CROSS_LENGTHS,
        };
        if lhs.len() != rhs.len() {
            return Err(unsupported);
        }

        let (a, b) = lift(lhs, rhs);
        let product = match a.len() {
            1 => CrossProduct::Vector(Array1::zeros(1)),
            2 => CrossProduct::Scalar(planar_z(&a, &b)),
            3 => CrossProduct::Vector(cross3(&a, &b)),
            7 => CrossProduct::Vector(cross7(&a, &b)),
            _ => return Err(unsupported),
        };
        Ok(product)
    }

    /// z-component `A[0]*B[1] - B[0]*A[1]` of two planar vectors.
    ///
    /// Accepts length-2 vectors, or length-3 vectors whose third components
    /// are both exactly zero; the x/y components of the full 3-D product are
    /// zero in that case and are dropped.
    pub fn planar<A, B>(
        lhs: ArrayView1<A>,
        rhs: ArrayView1<B>,
        hint: Option<usize>,
    ) -> KernelResult<Promoted<A, B>>
    where
        A: Promote<B>,
        B: Element,
    {
        ShapeCheck::hint_length(hint, lhs.len())?;
        let accepted = match (lhs.len(), rhs.len()) {
            (2, 2) => true,
            (3, 3) => lhs[2] == A::zero() && rhs[2] == B::zero(),
            _ => false,
        };
        if !accepted {
            return Err(KernelError::UnsupportedDimension {
                operation: "planar cross product",
                left: lhs.len(),
                right: rhs.len(),
                supported: PLANAR_LENGTHS,
            });
        }

        let (a, b) = lift(lhs, rhs);
        Ok(planar_z(&a, &b))
    }
}

fn lift<A, B>(lhs: ArrayView1<A>, rhs: ArrayView1<B>) -> (Vec<Promoted<A, B>>, Vec<Promoted<A, B>>)
where
    A: Promote<B>,
    B: Element,
{
    let a = lhs.iter().map(|&x| x.lift_lhs()).collect();
    let b = rhs.iter().map(|&x| A::lift_rhs(x)).collect();
    (a, b)
}

fn negate<T: Element>(x: T) -> T {
    T::zero().wrapping_sub(x)
}

// p*q - r*s
fn minor<T: Element>(p: T, q: T, r: T, s: T) -> T {
    p.wrapping_mul(q).wrapping_sub(r.wrapping_mul(s))
}

fn planar_z<T: Element>(a: &[T], b: &[T]) -> T {
    minor(a[0], b[1], b[0], a[1])
}

fn cross3<T: Element>(a: &[T], b: &[T]) -> Array1<T> {
    Array1::from(vec![
        minor(a[1], b[2], b[1], a[2]),
        minor(a[2], b[0], b[2], a[0]),
        minor(a[0], b[1], b[0], a[1]),
    ])
}

// Octonion-derived product: component k pairs (k+1, k+3), (k+2, k+6) and
// (k+4, k+5), indices mod 7.
fn cross7<T: Element>(a: &[T], b: &[T]) -> Array1<T> {
    let term = |k: usize, i: usize, j: usize| {
        let (i, j) = ((k + i) % 7, (k + j) % 7);
        minor(a[i], b[j], a[j], b[i])
    };
    (0..7)
        .map(|k| {
            term(k, 1, 3)
                .wrapping_add(term(k, 2, 6))
                .wrapping_add(term(k, 4, 5))
        })
        .collect()
}
