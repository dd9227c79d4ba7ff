use crate::core::{AXES, GridParameters, KernelTable, Knot};
use crate::math::{AxisFactors, ratio_powers, wrap_index};

/// Per-knot scratch: separable tap weights and wrapped storage indices.
///
/// One window is owned by each worker and reloaded for every knot it
/// processes; its buffers are sized by the half-width only.
#[derive(Debug, Clone)]
pub struct GaussianWindow {
    half_width: usize,
    central: f64,
    weights: [Vec<f64>; AXES],
    indices: [Vec<usize>; AXES],
}

impl GaussianWindow {
    pub fn new(half_width: usize) -> Self {
        let len = 2 * half_width;
        Self {
            half_width,
            central: 0.0,
            weights: std::array::from_fn(|_| vec![0.0; len]),
            indices: std::array::from_fn(|_| vec![0; len]),
        }
    }

    /// Recomputes the window for `knot`.
    ///
    /// Along each axis this costs two `exp` calls and one division; the
    /// `ρ^l` powers come from [`ratio_powers`].
    pub fn load(&mut self, knot: Knot, params: &GridParameters, tables: &[KernelTable; AXES]) {
        debug_assert_eq!(params.half_width, self.half_width);

        let hw = self.half_width as isize;
        let mut central = 1.0;
        for axis in 0..AXES {
            let extent = params.extents[axis];
            let factors = AxisFactors::new(knot.coord(axis), extent, params.tau[axis]);
            central *= factors.central;

            let weights = &mut self.weights[axis];
            ratio_powers(factors.ratio, self.half_width, weights);
            for (w, &t) in weights.iter_mut().zip(tables[axis].as_slice()) {
                *w *= t;
            }

            for (j, index) in self.indices[axis].iter_mut().enumerate() {
                *index = wrap_index(factors.cell, j as isize + 1 - hw, extent);
            }
        }
        self.central = central;
    }

    #[inline]
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Product of the three central factors `E1x·E1y·E1z`.
    #[inline]
    pub fn central(&self) -> f64 {
        self.central
    }

    /// Tap weights `ρ^l · table[l]` along `axis`.
    #[inline]
    pub fn weights(&self, axis: usize) -> &[f64] {
        &self.weights[axis]
    }

    /// Wrapped storage indices along `axis`, aligned with [`Self::weights`].
    #[inline]
    pub fn indices(&self, axis: usize) -> &[usize] {
        &self.indices[axis]
    }
}
