//! Periodic lattice arithmetic for grids whose DC component sits at `N/2`.
//!
//! A coordinate `k ∈ [0, 2π)` on an axis of extent `N` belongs to lattice cell
//! `m = floor(N·k / 2π)`. Cell `m` is stored at `(m + N/2) mod N`, so the
//! upper half of `[0, 2π)` folds onto the lower half of storage.

use std::f64::consts::TAU;

/// Lattice cell immediately below `coord` on an axis of extent `extent`.
///
/// For `coord` a few ulps below `2π` the product `N·k/2π` can round up to
/// `N`; such coordinates are kept in the last cell `N - 1`, where the offset
/// from the lattice point is one spacing.
#[inline]
pub fn nearest_cell(coord: f64, extent: usize) -> isize {
    let cell = (extent as f64 * coord / TAU).floor() as isize;
    let last = extent as isize - 1;
    if cell > last && coord < TAU { last } else { cell }
}

/// Storage index of lattice cell `cell + offset` on a periodic axis.
///
/// The candidate is folded into `[-N/2, N/2)` by a single conditional shift
/// and then moved into `[0, N)` by adding `N/2`. The candidate must lie in
/// `[-3N/2, 3N/2)`, which holds for any cell of a knot in `[0, 2π)` and any
/// offset with `|offset| ≤ N/2`.
#[inline]
pub fn wrap_index(cell: isize, offset: isize, extent: usize) -> usize {
    let n = extent as isize;
    let half = n / 2;
    let mut candidate = cell + offset;
    if candidate >= half {
        candidate -= n;
    } else if candidate < -half {
        candidate += n;
    }
    debug_assert!(
        (-half..half).contains(&candidate),
        "cell {cell} + offset {offset} cannot be folded onto an axis of extent {extent}"
    );
    (candidate + half) as usize
}

/// Smallest coordinate in `[0, 2π)` whose lattice cell is stored at `index`.
///
/// The result sits on the cell's lattice point up to rounding: when
/// `cell·2π/N` lands just below the boundary it is nudged upward until
/// [`nearest_cell`] agrees, leaving a sub-cell offset of a few ulps at most.
pub fn knot_for_cell(index: usize, extent: usize) -> f64 {
    let cell = (index + extent / 2) % extent;
    let mut coord = cell as f64 * (TAU / extent as f64);
    while nearest_cell(coord, extent) < cell as isize {
        coord = coord.next_up();
    }
    coord
}
