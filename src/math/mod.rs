//! Numeric building blocks shared by the gridding engine.

pub mod geometric;
pub mod periodic;

pub use geometric::{AxisFactors, ratio_powers};
pub use periodic::{knot_for_cell, nearest_cell, wrap_index};
