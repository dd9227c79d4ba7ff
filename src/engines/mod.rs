//! Gridding engine implementations.

pub mod gridding;
