use crate::element::Element;
use ndarray::{ArrayView, Dimension};

pub struct StatsHelper;

impl StatsHelper {
    /// Total of every element, in the container's own kind.
    pub fn sum<A: Element, D: Dimension>(container: ArrayView<A, D>) -> A {
        container
            .iter()
            .fold(A::zero(), |acc, &value| acc.wrapping_add(value))
    }
}
