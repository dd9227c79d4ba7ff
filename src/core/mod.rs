//! Core data contracts: grid parameters, kernel tables, borrowed input views,
//! owned per-knot results and the library-wide error type.

pub mod error;
pub mod types;

pub use error::{GriddingError, GriddingResult};
pub use types::*;
