//! Shape validation shared by every binary operation.
//!
//! Checks run before any element is read, so a failing call never produces a
//! partial result.

use crate::prelude::{KernelError, KernelResult};
use ndarray::Dimension;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The dimension that disagreed between two operands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShapeAxis {
    /// Vector length.
    Length,
    Rows,
    Columns,
    /// Columns of the left factor against rows (or length) of the right one.
    Inner,
    /// Number of axes, for dynamically dimensioned containers.
    Rank,
}

impl ShapeAxis {
    /// Names axis `index` of a container with `ndim` axes.
    pub fn of(ndim: usize, index: usize) -> ShapeAxis {
        match (ndim, index) {
            (1, _) => ShapeAxis::Length,
            (_, 0) => ShapeAxis::Rows,
            _ => ShapeAxis::Columns,
        }
    }
}

impl Display for ShapeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeAxis::Length => "length",
            ShapeAxis::Rows => "rows",
            ShapeAxis::Columns => "columns",
            ShapeAxis::Inner => "inner dimension",
            ShapeAxis::Rank => "rank",
        };
        f.write_str(name)
    }
}

pub struct ShapeCheck;

impl ShapeCheck {
    /// Compares one dimension of two operands.
    pub fn axis(axis: ShapeAxis, left: usize, right: usize) -> KernelResult<()> {
        if left == right {
            Ok(())
        } else {
            Err(KernelError::ShapeMismatch { axis, left, right })
        }
    }

    pub fn lengths(left: usize, right: usize) -> KernelResult<()> {
        Self::axis(ShapeAxis::Length, left, right)
    }

    /// Column count of the left factor against the row count of the right.
    pub fn inner(left: usize, right: usize) -> KernelResult<()> {
        Self::axis(ShapeAxis::Inner, left, right)
    }

    /// Rank comparison followed by an axis-by-axis one. Rows are checked
    /// before columns so the reported axis is deterministic.
    pub fn same_shape(left: &[usize], right: &[usize]) -> KernelResult<()> {
        let ndim = left.len();
        Self::axis(ShapeAxis::Rank, ndim, right.len())?;
        left.iter()
            .zip(right)
            .enumerate()
            .try_for_each(|(index, (&l, &r))| Self::axis(ShapeAxis::of(ndim, index), l, r))
    }

    /// Validates an optional caller-supplied shape against the real one.
    ///
    /// The hinted value is reported as `left`, the actual value as `right`.
    pub fn hint<D: Dimension>(hint: Option<&D>, actual: &D) -> KernelResult<()> {
        match hint {
            Some(hinted) => Self::same_shape(hinted.slice(), actual.slice()),
            None => Ok(()),
        }
    }

    /// Validates an optional caller-supplied vector length.
    pub fn hint_length(hint: Option<usize>, actual: usize) -> KernelResult<()> {
        match hint {
            Some(hinted) => Self::lengths(hinted, actual),
            None => Ok(()),
        }
    }
}
