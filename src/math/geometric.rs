//! Per-axis Gaussian factors for one knot.
//!
//! For a knot at sub-cell offset `d` from its lattice point and spacing `Δ`,
//!
//! `exp(-(d - lΔ)² / 4τ) = exp(-d² / 4τ) · ρ^l · exp(-(lΔ)² / 4τ)`, with
//! `ρ = exp(dΔ / 2τ)`.
//!
//! The last factor is knot-independent and lives in a kernel table; the first
//! two are produced here with one `exp` each. The powers `ρ^l` are generated
//! by recurrence instead of `powi`/`exp` per tap.

use std::f64::consts::TAU;

use super::periodic::nearest_cell;

/// Knot-dependent factors along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFactors {
    /// Lattice cell `m = floor(N·k / 2π)`.
    pub cell: isize,
    /// Sub-cell offset `d = k - m·Δ`, in `[0, Δ)` for in-domain knots.
    pub offset: f64,
    /// Central factor `exp(-d² / 4τ)`.
    pub central: f64,
    /// Geometric ratio `ρ = exp(d·π / (N·τ))`.
    pub ratio: f64,
}

impl AxisFactors {
    #[inline]
    pub fn new(coord: f64, extent: usize, tau: f64) -> Self {
        let n = extent as f64;
        let spacing = TAU / n;
        let cell = nearest_cell(coord, extent);
        let offset = coord - cell as f64 * spacing;
        Self {
            cell,
            offset,
            central: (-offset * offset / (4.0 * tau)).exp(),
            ratio: (offset * spacing / (2.0 * tau)).exp(),
        }
    }
}

/// Fills `out` with `ratio^l` for `l` in `[1 - half_width, half_width]`.
///
/// `out[half_width - 1]` is the unit central tap; entries above it come from
/// `out[j] = out[j - 1]·ρ` and entries below from `out[j] = out[j + 1]·ρ⁻¹`,
/// so the whole window costs one division plus `2·half_width - 1`
/// multiplications.
#[inline]
pub fn ratio_powers(ratio: f64, half_width: usize, out: &mut [f64]) {
    debug_assert!(half_width >= 1);
    debug_assert_eq!(out.len(), 2 * half_width);

    let center = half_width - 1;
    out[center] = 1.0;
    for j in half_width..out.len() {
        out[j] = out[j - 1] * ratio;
    }
    let inv = 1.0 / ratio;
    for j in (0..center).rev() {
        out[j] = out[j + 1] * inv;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn recurrence_matches_direct_powers() {
        let mut rng = StdRng::seed_from_u64(2008);
        for half_width in 1..=12 {
            let mut out = vec![f64::NAN; 2 * half_width];
            for _ in 0..50 {
                let ratio = rng.random_range(0.2..5.0);
                ratio_powers(ratio, half_width, &mut out);
                for (j, &value) in out.iter().enumerate() {
                    let l = j as i32 + 1 - half_width as i32;
                    assert_relative_eq!(value, ratio.powi(l), max_relative = 1e-13);
                }
            }
        }
    }

    #[test]
    fn unit_ratio_gives_flat_window() {
        let mut out = vec![0.0; 8];
        ratio_powers(1.0, 4, &mut out);
        assert!(out.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn factors_reproduce_shifted_gaussian() {
        let extent = 32;
        let tau = 0.015;
        let spacing = TAU / extent as f64;
        let half_width = 6;
        let mut powers = vec![0.0; 2 * half_width];

        for coord in [0.0, 0.013, 1.7, 3.14159, 6.2] {
            let f = AxisFactors::new(coord, extent, tau);
            assert!(f.offset >= 0.0 && f.offset < spacing);
            ratio_powers(f.ratio, half_width, &mut powers);
            for (j, &p) in powers.iter().enumerate() {
                let l = j as f64 + 1.0 - half_width as f64;
                let table = (-(l * spacing).powi(2) / (4.0 * tau)).exp();
                let direct = (-(f.offset - l * spacing).powi(2) / (4.0 * tau)).exp();
                assert_relative_eq!(f.central * p * table, direct, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn coordinate_at_upper_edge_keeps_offset_within_one_spacing() {
        let extent = 46;
        let spacing = TAU / extent as f64;
        let f = AxisFactors::new(TAU.next_down(), extent, 1.0);
        assert_eq!(f.cell, 45);
        assert_relative_eq!(f.offset, spacing, max_relative = 1e-12);
    }
}
