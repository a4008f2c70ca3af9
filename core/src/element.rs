use num_traits::{One, WrappingAdd, WrappingMul, WrappingSub, Zero};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::{Add, Mul, Neg, Sub};

/// Tag describing how the elements of a container are represented.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Integer,
    Float,
}

impl ElementKind {
    /// Result kind of a binary operation: floating-point wins.
    pub fn promote(self, other: ElementKind) -> ElementKind {
        match (self, other) {
            (ElementKind::Integer, ElementKind::Integer) => ElementKind::Integer,
            _ => ElementKind::Float,
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Integer => write!(f, "integer"),
            ElementKind::Float => write!(f, "float"),
        }
    }
}

/// Numeric element stored in kernel containers.
pub trait Element:
    Copy
    + Debug
    + Display
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    const KIND: ElementKind;

    fn to_f64(self) -> f64;

    /// Kernel addition. Integers wrap on overflow in every build profile.
    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn wrapping_mul(self, rhs: Self) -> Self;
}

impl Element for i64 {
    const KIND: ElementKind = ElementKind::Integer;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn wrapping_add(self, rhs: i64) -> i64 {
        WrappingAdd::wrapping_add(&self, &rhs)
    }

    #[inline]
    fn wrapping_sub(self, rhs: i64) -> i64 {
        WrappingSub::wrapping_sub(&self, &rhs)
    }

    #[inline]
    fn wrapping_mul(self, rhs: i64) -> i64 {
        WrappingMul::wrapping_mul(&self, &rhs)
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Float;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn wrapping_add(self, rhs: f64) -> f64 {
        self + rhs
    }

    #[inline]
    fn wrapping_sub(self, rhs: f64) -> f64 {
        self - rhs
    }

    #[inline]
    fn wrapping_mul(self, rhs: f64) -> f64 {
        self * rhs
    }
}

/// Pairs an element type with a right-hand operand type and names the type
/// both are lifted into before any arithmetic happens.
///
/// Every binary kernel operation is written once against this trait, so the
/// integer/floating-point combinations do not need their own entry points.
pub trait Promote<Rhs: Element>: Element {
    type Output: Element;

    fn lift_lhs(self) -> <Self as Promote<Rhs>>::Output;

    fn lift_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;

    #[inline]
    fn promoted_add(self, rhs: Rhs) -> <Self as Promote<Rhs>>::Output {
        Element::wrapping_add(self.lift_lhs(), Self::lift_rhs(rhs))
    }

    #[inline]
    fn promoted_sub(self, rhs: Rhs) -> <Self as Promote<Rhs>>::Output {
        Element::wrapping_sub(self.lift_lhs(), Self::lift_rhs(rhs))
    }

    #[inline]
    fn promoted_mul(self, rhs: Rhs) -> <Self as Promote<Rhs>>::Output {
        Element::wrapping_mul(self.lift_lhs(), Self::lift_rhs(rhs))
    }
}

/// Result element type of combining `A` with `B`.
pub type Promoted<A, B> = <A as Promote<B>>::Output;

macro_rules! impl_promote {
    ($lhs:ty, $rhs:ty => $out:ty) => {
        impl Promote<$rhs> for $lhs {
            type Output = $out;

            #[inline]
            fn lift_lhs(self) -> $out {
                self as $out
            }

            #[inline]
            fn lift_rhs(rhs: $rhs) -> $out {
                rhs as $out
            }
        }
    };
}

impl_promote!(i64, i64 => i64);
impl_promote!(i64, f64 => f64);
impl_promote!(f64, i64 => f64);
impl_promote!(f64, f64 => f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of<A: Promote<B>, B: Element>() -> ElementKind {
        <Promoted<A, B> as Element>::KIND
    }

    #[test]
    fn promotion_table_prefers_float() {
        assert_eq!(kind_of::<i64, i64>(), ElementKind::Integer);
        assert_eq!(kind_of::<i64, f64>(), ElementKind::Float);
        assert_eq!(kind_of::<f64, i64>(), ElementKind::Float);
        assert_eq!(kind_of::<f64, f64>(), ElementKind::Float);
    }

    #[test]
    fn kind_promote_matches_trait_table() {
        assert_eq!(
            ElementKind::Integer.promote(ElementKind::Float),
            kind_of::<i64, f64>()
        );
        assert_eq!(
            ElementKind::Integer.promote(ElementKind::Integer),
            kind_of::<i64, i64>()
        );
    }

    #[test]
    fn mixed_arithmetic_lifts_both_sides() {
        assert_eq!(2_i64.promoted_add(0.5_f64), 2.5);
        assert_eq!(1.5_f64.promoted_mul(4_i64), 6.0);
        assert_eq!(7_i64.promoted_sub(9_i64), -2);
    }

    #[test]
    fn integer_overflow_wraps_in_every_profile() {
        assert_eq!(i64::MAX.promoted_add(1_i64), i64::MIN);
        assert_eq!(i64::MIN.promoted_sub(1_i64), i64::MAX);
        assert_eq!(i64::MAX.promoted_mul(2_i64), -2);
        assert_eq!(f64::MAX.promoted_mul(2_i64), f64::INFINITY);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ElementKind::Float).unwrap();
        assert_eq!(json, "\"float\"");
    }
}
