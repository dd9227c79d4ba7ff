//! Unchecked convolution kernel.
//!
//! Everything here trusts its inputs: the preconditions listed on
//! [`convolve_type2`] are asserted in debug builds only. Use
//! [`super::Type2Gridder`] for validated calls.
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{
    AXES, Execution, GridParameters, GriddedValues, KernelTable, KnotSet, UniformGrid,
};

use super::window::GaussianWindow;

/// Weighted sum of the `(2·M_sp)³` grid samples covered by `window`.
#[inline]
pub fn accumulate_window(window: &GaussianWindow, grid: &UniformGrid<'_>) -> (f64, f64) {
    let [nx, ny, _] = grid.extents();
    let plane = nx * ny;
    let re = grid.re();
    let im = grid.im();

    let (wx, ix) = (window.weights(0), window.indices(0));
    let (wy, iy) = (window.weights(1), window.indices(1));
    let (wz, iz) = (window.weights(2), window.indices(2));

    let mut sum_re = 0.0;
    let mut sum_im = 0.0;
    for (&w3, &z) in wz.iter().zip(iz) {
        let v2 = window.central() * w3;
        let slab = plane * z;
        for (&w2, &y) in wy.iter().zip(iy) {
            let v1 = v2 * w2;
            let row = slab + nx * y;
            for (&w1, &x) in wx.iter().zip(ix) {
                let w = v1 * w1;
                sum_re += w * re[row + x];
                sum_im += w * im[row + x];
            }
        }
    }
    (sum_re, sum_im)
}

#[inline]
fn debug_check_inputs(
    grid: &UniformGrid<'_>,
    params: &GridParameters,
    tables: &[KernelTable; AXES],
) {
    debug_assert!(params.validate().is_ok(), "invalid grid parameters");
    debug_assert_eq!(grid.extents(), params.extents);
    debug_assert!(
        tables
            .iter()
            .all(|t| t.half_width() == params.half_width),
        "kernel tables must match the truncation half-width"
    );
}

/// Single-threaded evaluation reusing one scratch window for every knot.
pub fn convolve_type2_sequential(
    grid: &UniformGrid<'_>,
    knots: &KnotSet<'_>,
    params: &GridParameters,
    tables: &[KernelTable; AXES],
) -> GriddedValues {
    debug_check_inputs(grid, params, tables);

    let mut out = GriddedValues::zeros(knots.len());
    let mut window = GaussianWindow::new(params.half_width);
    let (out_re, out_im) = out.parts_mut();
    for (i, knot) in knots.iter().enumerate() {
        window.load(knot, params, tables);
        let (re, im) = accumulate_window(&window, grid);
        out_re[i] += re;
        out_im[i] += im;
    }
    out
}

/// Knot-parallel evaluation on the Rayon pool.
///
/// Each Rayon job owns its scratch window; per-knot results are identical to
/// [`convolve_type2_sequential`].
#[cfg(feature = "parallel")]
pub fn convolve_type2_parallel(
    grid: &UniformGrid<'_>,
    knots: &KnotSet<'_>,
    params: &GridParameters,
    tables: &[KernelTable; AXES],
) -> GriddedValues {
    debug_check_inputs(grid, params, tables);

    let mut out = GriddedValues::zeros(knots.len());
    let (out_re, out_im) = out.parts_mut();
    out_re
        .par_iter_mut()
        .zip(out_im.par_iter_mut())
        .enumerate()
        .for_each_init(
            || GaussianWindow::new(params.half_width),
            |window, (i, (re, im))| {
                window.load(knots.get(i), params, tables);
                let (sum_re, sum_im) = accumulate_window(window, grid);
                *re += sum_re;
                *im += sum_im;
            },
        );
    out
}

/// Type-2 Gaussian gridding: the value each knot receives from the grid.
///
/// Preconditions (debug-asserted, not checked in release builds):
/// - `params` passes [`GridParameters::validate`], in particular
///   `2·M_sp ≤ min(N)` and `τ > 0` on every axis;
/// - `grid` has the extents named in `params`;
/// - every table has `2·M_sp` entries;
/// - knot coordinates lie in `[0, 2π)`.
///
/// Violations produce wrapped-index aliasing, non-finite values or a panic
/// on out-of-bounds access; they are never silently corrected.
pub fn convolve_type2(
    grid: &UniformGrid<'_>,
    knots: &KnotSet<'_>,
    params: &GridParameters,
    tables: &[KernelTable; AXES],
    execution: Execution,
) -> GriddedValues {
    match execution {
        Execution::Sequential => convolve_type2_sequential(grid, knots, params, tables),
        #[cfg(feature = "parallel")]
        Execution::Parallel => convolve_type2_parallel(grid, knots, params, tables),
        #[cfg(not(feature = "parallel"))]
        Execution::Parallel => convolve_type2_sequential(grid, knots, params, tables),
    }
}
