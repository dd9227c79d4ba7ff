//! Module `engines::gridding`.
//!
//! Implements the type-2 (uniform-to-nonuniform) Gaussian gridding step of a 3-D NUFFT with concrete routines such as `convolve_type2`, `convolve_type2_flat`, `direct_type2`.
//!
//! References: Greengard and Lee (2004), *Accelerating the Nonuniform Fast Fourier Transform*, SIAM Review 46(3), fast Gaussian gridding around p. 448.
//!
//! Key types and purpose: `Type2Gridder` validates inputs and owns the kernel tables, `GaussianWindow` is the per-worker scratch.
//!
//! Numerical considerations: the truncation half-width and spreading width set the accuracy; the `ρ^l` recurrence adds only a few ulps per tap relative to direct exponentiation.
//!
//! When to use: call once per transform after the oversampled grid has been deconvolved and FFT'd; use `direct_type2` only as an accuracy oracle.

mod direct;
mod gridder;
mod kernel;
mod window;

pub use direct::direct_type2;
pub use gridder::{Type2Gridder, convolve_type2_flat};
#[cfg(feature = "parallel")]
pub use kernel::convolve_type2_parallel;
pub use kernel::{accumulate_window, convolve_type2, convolve_type2_sequential};
pub use window::GaussianWindow;
