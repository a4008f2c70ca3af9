//! Property checks run around each timed kernel call.
//!
//! Every check returns the wall time of the kernel call under test and a
//! relative residual: `max |expected - actual| / (1 + scale)`. Integer runs
//! come back exact, except for division which always leaves the integers.

use crate::generator::operands::{OperandGenerator, Sampled};
use crate::workflow::config::OperationKind;
use arithkernel::prelude::*;
use ndarray::{Array, Array2, Dimension};
use std::time::{Duration, Instant};

/// Element types the driver runs workloads over.
pub trait Operand: Sampled + Promote<Self, Output = Self> {}

impl Operand for i64 {}
impl Operand for f64 {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    pub elapsed: Duration,
    pub residual: f64,
}

pub fn run<T>(
    operation: OperationKind,
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome>
where
    T: Operand,
    f64: Promote<T, Output = f64>,
{
    match operation {
        OperationKind::Add => check_add::<T>(generator, size),
        OperationKind::Subtract => check_subtract::<T>(generator, size),
        OperationKind::Scale => check_scale::<T>(generator, size),
        OperationKind::Divide => check_divide::<T>(generator, size),
        OperationKind::Dot => check_dot::<T>(generator, size),
        OperationKind::Cross => check_cross::<T>(generator),
        OperationKind::Outer => check_outer::<T>(generator, size),
        OperationKind::MatrixMultiply => check_matrix_multiply::<T>(generator, size),
        OperationKind::MatrixVector => check_matrix_vector::<T>(generator, size),
        OperationKind::VectorMatrix => check_vector_matrix::<T>(generator, size),
    }
}

fn timed<R>(call: impl FnOnce() -> KernelResult<R>) -> anyhow::Result<(R, Duration)> {
    let start = Instant::now();
    let value = call()?;
    Ok((value, start.elapsed()))
}

fn residual<E, A>(expected: E, actual: A) -> f64
where
    E: IntoIterator<Item = f64>,
    A: IntoIterator<Item = f64>,
{
    let (diff, scale) = expected
        .into_iter()
        .zip(actual)
        .fold((0.0_f64, 0.0_f64), |(diff, scale), (e, a)| {
            (diff.max((e - a).abs()), scale.max(e.abs()))
        });
    diff / (1.0 + scale)
}

fn floats<T: Element, D: Dimension>(array: &Array<T, D>) -> impl Iterator<Item = f64> + '_ {
    array.iter().map(|value| value.to_f64())
}

// add(A, B)[i] == A[i] + B[i] and subtract(add(A, B), B) == A.
fn check_add<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let a = generator.vector::<T>(size);
    let b = generator.vector::<T>(size);

    let (sum, elapsed) = timed(|| ElementwiseHelper::add(a.view(), b.view(), None))?;
    let back = ElementwiseHelper::subtract(sum.view(), b.view(), None)?;

    let pairwise = residual(
        a.iter().zip(b.iter()).map(|(x, y)| x.to_f64() + y.to_f64()),
        floats(&sum),
    );
    let round_trip = residual(floats(&a), floats(&back));
    Ok(TrialOutcome {
        elapsed,
        residual: pairwise.max(round_trip),
    })
}

fn check_subtract<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let a = generator.matrix::<T>(size, size)?;
    let b = generator.matrix::<T>(size, size)?;

    let (difference, elapsed) =
        timed(|| ElementwiseHelper::subtract(a.view(), b.view(), Some(a.raw_dim())))?;
    let restored = ElementwiseHelper::add(difference.view(), b.view(), None)?;

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&a), floats(&restored)),
    })
}

// s * (A + B) == s * A + s * B.
fn check_scale<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let s = generator.scalar::<T>();
    let a = generator.matrix::<T>(size, size)?;
    let b = generator.matrix::<T>(size, size)?;

    let sum = ElementwiseHelper::add(a.view(), b.view(), None)?;
    let (lhs, elapsed) = timed(|| ScalingHelper::multiply(s, sum.view(), None))?;
    let scaled_a = ScalingHelper::multiply(s, a.view(), None)?;
    let scaled_b = ScalingHelper::multiply(s, b.view(), None)?;
    let rhs = ElementwiseHelper::add(scaled_a.view(), scaled_b.view(), None)?;

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&rhs), floats(&lhs)),
    })
}

// s * (A / s) == A.
fn check_divide<T>(generator: &mut OperandGenerator, size: usize) -> anyhow::Result<TrialOutcome>
where
    T: Operand,
    f64: Promote<T, Output = f64>,
{
    let s = generator.scalar::<f64>();
    let a = generator.matrix::<T>(size, size)?;

    let (divided, elapsed) = timed(|| ScalingHelper::divide(a.view(), s, Some(a.raw_dim())))?;
    let restored = ScalingHelper::multiply::<f64, f64, _>(s, divided.view(), None)?;

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&a), floats(&restored)),
    })
}

// dot(s * A, B) == s * dot(A, B).
fn check_dot<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let s = generator.scalar::<T>();
    let a = generator.vector::<T>(size);
    let b = generator.vector::<T>(size);

    let (dot, elapsed) = timed(|| ProductHelper::dot(a.view(), b.view(), Some(size)))?;
    let scaled = ScalingHelper::multiply(s, a.view(), None)?;
    let lhs = ProductHelper::dot(scaled.view(), b.view(), None)?.to_f64();
    let rhs = (s * dot).to_f64();

    let scale: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x.to_f64() * y.to_f64() * s.to_f64()).abs())
        .sum();
    Ok(TrialOutcome {
        elapsed,
        residual: (lhs - rhs).abs() / (1.0 + scale),
    })
}

// Anticommutativity for every supported length, orthogonality for 3 and 7,
// and rejection of a length without a cross product.
fn check_cross<T: Operand>(generator: &mut OperandGenerator) -> anyhow::Result<TrialOutcome> {
    let len = generator.choose(&[1_usize, 2, 3, 7]);
    let a = generator.vector::<T>(len);
    let b = generator.vector::<T>(len);

    let (ab, elapsed) = timed(|| CrossHelper::product(a.view(), b.view(), None))?;
    let ba = CrossHelper::product(b.view(), a.view(), None)?;
    let ab = ab.embed();
    let negated = (-ba).embed();
    let mut worst = residual(floats(&ab), floats(&negated));

    if len == 3 || len == 7 {
        let magnitude = |v: &ndarray::Array1<T>| v.iter().map(|x| x.to_f64().abs()).sum::<f64>();
        // Bounds every triple product a_i * b_j * v_k in the projection.
        let bound = magnitude(&a) * magnitude(&b);
        for operand in [&a, &b] {
            let projection = ProductHelper::dot(ab.view(), operand.view(), None)?.to_f64();
            worst = worst.max(projection.abs() / (1.0 + bound * magnitude(operand)));
        }
    }

    let invalid = generator.vector::<T>(4);
    match CrossHelper::product(invalid.view(), invalid.view(), None) {
        Err(KernelError::UnsupportedDimension { .. }) => {}
        Err(other) => anyhow::bail!("length-4 cross product failed with {}", other),
        Ok(_) => anyhow::bail!("cross product accepted length-4 operands"),
    }

    Ok(TrialOutcome {
        elapsed,
        residual: worst,
    })
}

fn check_outer<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let a = generator.vector::<T>(size);
    let b = generator.vector::<T>(size + 1);

    let (outer, elapsed) = timed(|| ProductHelper::outer(a.view(), b.view(), None))?;
    anyhow::ensure!(
        outer.dim() == (size, size + 1),
        "outer product has shape {:?}, expected ({}, {})",
        outer.dim(),
        size,
        size + 1
    );

    let expected = Array2::from_shape_fn((size, size + 1), |(i, j)| a[i].to_f64() * b[j].to_f64());
    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&expected), floats(&outer)),
    })
}

// (A B) C == A (B C).
fn check_matrix_multiply<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let a = generator.matrix::<T>(size, size)?;
    let b = generator.matrix::<T>(size, size + 1)?;
    let c = generator.matrix::<T>(size + 1, 2)?;

    let dims = ProductDims::new(size, size, size + 1);
    let (ab, elapsed) = timed(|| MatrixHelper::multiply(a.view(), b.view(), Some(dims)))?;
    let left = MatrixHelper::multiply(ab.view(), c.view(), None)?;
    let bc = MatrixHelper::multiply(b.view(), c.view(), None)?;
    let right = MatrixHelper::multiply(a.view(), bc.view(), None)?;

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&left), floats(&right)),
    })
}

// I v == v, and the hinted call agrees with the inferred one.
fn check_matrix_vector<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let identity = Array2::<T>::eye(size);
    let v = generator.vector::<T>(size);
    let a = generator.matrix::<T>(size, size)?;

    let (image, elapsed) = timed(|| {
        MatrixHelper::multiply_vector(identity.view(), v.view(), Some(identity.raw_dim()))
    })?;
    let hinted = MatrixHelper::multiply_vector(a.view(), v.view(), Some(a.raw_dim()))?;
    let inferred = MatrixHelper::multiply_vector(a.view(), v.view(), None)?;
    anyhow::ensure!(hinted == inferred, "hinted matrix-vector product differs");

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&v), floats(&image)),
    })
}

// v A == Aᵀ v.
fn check_vector_matrix<T: Operand>(
    generator: &mut OperandGenerator,
    size: usize,
) -> anyhow::Result<TrialOutcome> {
    let v = generator.vector::<T>(size);
    let a = generator.matrix::<T>(size, size + 1)?;

    let (row, elapsed) = timed(|| MatrixHelper::vector_multiply(v.view(), a.view(), None))?;
    let column = MatrixHelper::multiply_vector(a.t(), v.view(), None)?;

    Ok(TrialOutcome {
        elapsed,
        residual: residual(floats(&column), floats(&row)),
    })
}
