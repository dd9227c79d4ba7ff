use crate::core::{AXES, GridParameters, GriddedValues, KernelTable, KnotSet, UniformGrid};
use crate::math::{nearest_cell, wrap_index};

/// Reference type-2 evaluation with one `exp` per tap and no separation.
///
/// Sums `exp(-Σ_axis (d_axis - l_axis·Δ_axis)² / 4τ_axis)·f` over the same
/// truncated window as the fast kernel with Gaussian kernel tables. Intended
/// as an accuracy oracle; cost is `O(M·(2·M_sp)³)` exponentials.
pub fn direct_type2(
    grid: &UniformGrid<'_>,
    knots: &KnotSet<'_>,
    params: &GridParameters,
) -> GriddedValues {
    let [nx, ny, _] = params.extents;
    let offsets: Vec<isize> = KernelTable::offsets(params.half_width).collect();
    let mut out = GriddedValues::zeros(knots.len());
    let (out_re, out_im) = out.parts_mut();

    for (i, knot) in knots.iter().enumerate() {
        let coords = knot.as_array();
        let cells: [isize; AXES] =
            std::array::from_fn(|axis| nearest_cell(coords[axis], params.extents[axis]));
        let offsets_in_cell: [f64; AXES] = std::array::from_fn(|axis| {
            coords[axis] - cells[axis] as f64 * params.spacing(axis)
        });
        let distance_sq = |axis: usize, l: isize| {
            let r = offsets_in_cell[axis] - l as f64 * params.spacing(axis);
            r * r / (4.0 * params.tau[axis])
        };

        let mut sum_re = 0.0;
        let mut sum_im = 0.0;
        for &l3 in &offsets {
            let z = wrap_index(cells[2], l3, params.extents[2]);
            for &l2 in &offsets {
                let y = wrap_index(cells[1], l2, params.extents[1]);
                for &l1 in &offsets {
                    let x = wrap_index(cells[0], l1, params.extents[0]);
                    let w = (-(distance_sq(0, l1) + distance_sq(1, l2) + distance_sq(2, l3)))
                        .exp();
                    let index = x + nx * (y + ny * z);
                    sum_re += w * grid.re()[index];
                    sum_im += w * grid.im()[index];
                }
            }
        }
        out_re[i] = sum_re;
        out_im[i] = sum_im;
    }
    out
}
