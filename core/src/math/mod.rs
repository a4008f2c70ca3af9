pub mod cross;
pub mod elementwise;
pub mod matrix;
pub mod products;
pub mod scaling;
pub mod stats;

pub use cross::{CrossHelper, CrossProduct};
pub use elementwise::ElementwiseHelper;
pub use matrix::{MatrixHelper, ProductDims};
pub use products::ProductHelper;
pub use scaling::ScalingHelper;
pub use stats::StatsHelper;
