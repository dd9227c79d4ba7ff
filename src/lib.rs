//! gaussgrid computes the interpolation step of a three-dimensional type-2
//! (uniform-to-nonuniform) nonuniform FFT using fast Gaussian gridding.
//!
//! Every knot receives the truncated-Gaussian weighted sum of the periodic
//! grid samples in a `(2·M_sp)³` neighbourhood of its lattice cell. The
//! Gaussian is separable, and along each axis the knot-dependent part is
//! generated with one exponential plus a geometric recurrence; the
//! knot-independent part comes from precomputed kernel tables.
//!
//! References:
//! - Greengard and Lee (2004), *Accelerating the Nonuniform Fast Fourier
//!   Transform*, SIAM Review 46(3), pp. 443-454.
//! - Dutt and Rokhlin (1993) for the original Gaussian-kernel NUFFT.
//!
//! Numerical considerations:
//! - Accuracy is governed by the truncation half-width `M_sp` and spreading
//!   width `τ`; choosing them is left to the caller.
//! - Grid storage follows the FFT-shifted convention: lattice cell `m` of an
//!   axis with extent `N` is stored at index `(m + N/2) mod N`.
//!
//! # Feature Flags
//! - `parallel` (default): partitions knots across the Rayon thread pool.
//!
//! # Quick Start
//! ```rust
//! use gaussgrid::core::{GridParameters, Knot, KnotSet, UniformGrid};
//! use gaussgrid::engines::gridding::Type2Gridder;
//!
//! let params = GridParameters::isotropic(2, 1.0, 4);
//! let gridder = Type2Gridder::gaussian(params).unwrap();
//!
//! // Unit impulse at the DC cell (2, 2, 2).
//! let mut re = vec![0.0; params.grid_len()];
//! let im = vec![0.0; params.grid_len()];
//! re[2 + 4 * 2 + 16 * 2] = 1.0;
//! let grid = UniformGrid::new(&re, &im, params.extents).unwrap();
//!
//! let flat = KnotSet::pack(&[Knot::new(0.0, 0.0, 0.0)]);
//! let knots = KnotSet::new(&flat).unwrap();
//! let values = gridder.interpolate(&grid, &knots).unwrap();
//! assert!((values.get(0).re - 1.0).abs() < 1e-12);
//! ```
//!
//! Flat arrays, mirroring a `[M_sp, τx, τy, τz, Nx, Ny, Nz]` calling convention:
//! ```rust
//! use gaussgrid::core::KernelTable;
//! use gaussgrid::engines::gridding::convolve_type2_flat;
//!
//! let table = KernelTable::gaussian(4, 1.0, 2);
//! let re = vec![1.0; 64];
//! let im = vec![0.0; 64];
//! let knots = [0.3, 0.3, 0.3];
//! let t = table.as_slice();
//! let (out_re, out_im) =
//!     convolve_type2_flat(&re, &im, &knots, [t, t, t], &[2.0, 1.0, 1.0, 1.0, 4.0, 4.0, 4.0])
//!         .unwrap();
//! assert_eq!(out_re.len(), 1);
//! assert!(out_re[0] > 0.0 && out_im[0] == 0.0);
//! ```

pub mod core;
pub mod engines;
pub mod math;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::*;
    pub use crate::engines::gridding::*;
}
