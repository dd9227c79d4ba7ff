use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use num_complex::Complex;
use serde::{Deserialize, Serialize};

use super::error::{GriddingError, GriddingResult};

/// Number of spatial axes handled by the engine.
pub const AXES: usize = 3;

/// Length of the flat parameter vector `[M_sp, τx, τy, τz, Nx, Ny, Nz]`.
pub const PARAMETER_VECTOR_LEN: usize = 7;

/// Scalar parameters shared by every knot of a gridding call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParameters {
    /// Truncation half-width `M_sp`; each axis sums over `2·M_sp` grid cells.
    pub half_width: usize,
    /// Gaussian spreading widths `τ` per axis.
    pub tau: [f64; AXES],
    /// Grid extents `[Nx, Ny, Nz]` (positive, even).
    pub extents: [usize; AXES],
}

impl GridParameters {
    pub fn new(half_width: usize, tau: [f64; AXES], extents: [usize; AXES]) -> Self {
        Self {
            half_width,
            tau,
            extents,
        }
    }

    /// Same width and extent on all three axes.
    pub fn isotropic(half_width: usize, tau: f64, extent: usize) -> Self {
        Self::new(half_width, [tau; AXES], [extent; AXES])
    }

    /// Parses the packed vector `[M_sp, τx, τy, τz, Nx, Ny, Nz]`.
    ///
    /// Integer slots must hold non-negative integral values; the result is
    /// not validated beyond that, see [`GridParameters::validate`].
    pub fn from_vector(values: &[f64]) -> GriddingResult<Self> {
        if values.len() != PARAMETER_VECTOR_LEN {
            return Err(GriddingError::dimension_mismatch(
                "parameter vector",
                PARAMETER_VECTOR_LEN,
                values.len(),
            ));
        }

        let integral = |slot: usize, name: &str| -> GriddingResult<usize> {
            let v = values[slot];
            if !v.is_finite() || v < 0.0 || v.fract() != 0.0 {
                return Err(GriddingError::invalid_parameters(format!(
                    "{name} must be a non-negative integer, got {v}"
                )));
            }
            Ok(v as usize)
        };

        Ok(Self {
            half_width: integral(0, "M_sp")?,
            tau: [values[1], values[2], values[3]],
            extents: [integral(4, "Nx")?, integral(5, "Ny")?, integral(6, "Nz")?],
        })
    }

    pub fn to_vector(&self) -> [f64; PARAMETER_VECTOR_LEN] {
        [
            self.half_width as f64,
            self.tau[0],
            self.tau[1],
            self.tau[2],
            self.extents[0] as f64,
            self.extents[1] as f64,
            self.extents[2] as f64,
        ]
    }

    /// Number of taps per axis, `2·M_sp` (saturating).
    #[inline]
    pub fn window_len(&self) -> usize {
        self.half_width.saturating_mul(2)
    }

    /// Lattice spacing `2π/N` along `axis`.
    #[inline]
    pub fn spacing(&self, axis: usize) -> f64 {
        TAU / self.extents[axis] as f64
    }

    /// Total number of grid cells `Nx·Ny·Nz` (saturating).
    #[inline]
    pub fn grid_len(&self) -> usize {
        self.checked_grid_len().unwrap_or(usize::MAX)
    }

    /// `Nx·Ny·Nz`, or `None` when the product does not fit in memory.
    pub fn checked_grid_len(&self) -> Option<usize> {
        checked_cell_count(self.extents)
    }

    /// Checks the kernel preconditions: `M_sp ≥ 1`, even positive extents,
    /// `2·M_sp ≤ min(N)` and finite strictly positive `τ`.
    pub fn validate(&self) -> GriddingResult<()> {
        if self.half_width == 0 {
            return Err(GriddingError::invalid_parameters(
                "truncation half-width must be >= 1",
            ));
        }
        for (axis, &n) in self.extents.iter().enumerate() {
            if n == 0 || n % 2 != 0 {
                return Err(GriddingError::invalid_parameters(format!(
                    "extent along axis {axis} must be positive and even, got {n}"
                )));
            }
            if self.window_len() > n {
                return Err(GriddingError::invalid_parameters(format!(
                    "window of {} taps exceeds extent {n} along axis {axis}",
                    self.window_len()
                )));
            }
        }
        if self.checked_grid_len().is_none() {
            return Err(GriddingError::invalid_parameters(format!(
                "grid of extents {:?} has too many cells",
                self.extents
            )));
        }
        for (axis, &tau) in self.tau.iter().enumerate() {
            if !tau.is_finite() || tau <= 0.0 {
                return Err(GriddingError::invalid_parameters(format!(
                    "spreading width along axis {axis} must be finite and > 0, got {tau}"
                )));
            }
        }
        Ok(())
    }
}

/// Cell count of a grid, bounded by the largest `f64` slice Rust can allocate.
fn checked_cell_count(extents: [usize; AXES]) -> Option<usize> {
    extents
        .iter()
        .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
        .filter(|&len| len <= isize::MAX as usize / std::mem::size_of::<f64>())
}

/// Knot-independent per-offset factors of the separable Gaussian (one axis).
///
/// Entry `j` holds the factor for offset `l = j + 1 - M_sp`, so offsets run
/// over `[1 - M_sp, M_sp]` and the central tap `l = 0` sits at `M_sp - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelTable {
    half_width: usize,
    weights: Vec<f64>,
}

impl KernelTable {
    pub fn from_weights(half_width: usize, weights: Vec<f64>) -> GriddingResult<Self> {
        if half_width == 0 {
            return Err(GriddingError::invalid_parameters(
                "kernel table half-width must be >= 1",
            ));
        }
        let expected = half_width.saturating_mul(2);
        if weights.len() != expected {
            return Err(GriddingError::dimension_mismatch(
                "kernel table",
                expected,
                weights.len(),
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(GriddingError::invalid_parameters(
                "kernel table weights must be finite",
            ));
        }
        Ok(Self {
            half_width,
            weights,
        })
    }

    /// Standard Greengard-Lee table `exp(-(l·Δ)² / (4τ))` with `Δ = 2π/N`.
    pub fn gaussian(extent: usize, tau: f64, half_width: usize) -> Self {
        let spacing = TAU / extent as f64;
        let weights = Self::offsets(half_width)
            .map(|l| {
                let x = l as f64 * spacing;
                (-x * x / (4.0 * tau)).exp()
            })
            .collect();
        Self {
            half_width,
            weights,
        }
    }

    /// One Gaussian table per axis for the given parameters.
    pub fn gaussian_set(params: &GridParameters) -> [Self; AXES] {
        std::array::from_fn(|axis| {
            Self::gaussian(params.extents[axis], params.tau[axis], params.half_width)
        })
    }

    /// Offsets covered by a window of the given half-width.
    #[inline]
    pub fn offsets(half_width: usize) -> RangeInclusive<isize> {
        let hw = half_width as isize;
        (1 - hw)..=hw
    }

    #[inline]
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Factor at signed offset `l`; panics outside `[1 - M_sp, M_sp]`.
    #[inline]
    pub fn weight(&self, offset: isize) -> f64 {
        let hw = self.half_width as isize;
        assert!(
            (1 - hw..=hw).contains(&offset),
            "offset {offset} outside kernel window [{}, {hw}]",
            1 - hw
        );
        self.weights[(offset + hw - 1) as usize]
    }

    #[inline]
    pub fn central_tap(&self) -> f64 {
        self.weights[self.half_width - 1]
    }
}

/// Read-only view of the complex field on the periodic grid.
///
/// Storage is split into real and imaginary parts, linearised as
/// `x + Nx·y + Nx·Ny·z`.
#[derive(Debug, Clone, Copy)]
pub struct UniformGrid<'a> {
    re: &'a [f64],
    im: &'a [f64],
    extents: [usize; AXES],
}

impl<'a> UniformGrid<'a> {
    pub fn new(re: &'a [f64], im: &'a [f64], extents: [usize; AXES]) -> GriddingResult<Self> {
        let expected = checked_cell_count(extents).ok_or_else(|| {
            GriddingError::invalid_parameters(format!(
                "grid of extents {extents:?} has too many cells"
            ))
        })?;
        if re.len() != expected {
            return Err(GriddingError::dimension_mismatch(
                "grid real part",
                expected,
                re.len(),
            ));
        }
        if im.len() != expected {
            return Err(GriddingError::dimension_mismatch(
                "grid imaginary part",
                expected,
                im.len(),
            ));
        }
        Ok(Self { re, im, extents })
    }

    #[inline]
    pub fn extents(&self) -> [usize; AXES] {
        self.extents
    }

    #[inline]
    pub fn re(&self) -> &'a [f64] {
        self.re
    }

    #[inline]
    pub fn im(&self) -> &'a [f64] {
        self.im
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.re.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    #[inline]
    pub fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.extents[0] * (y + self.extents[1] * z)
    }

    #[inline]
    pub fn value(&self, index: usize) -> Complex<f64> {
        Complex::new(self.re[index], self.im[index])
    }
}

/// A single nonuniform sample location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Knot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Knot {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn coord(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range"),
        }
    }

    #[inline]
    pub fn as_array(&self) -> [f64; AXES] {
        [self.x, self.y, self.z]
    }
}

/// Read-only view of `M` knots stored axis-major: all x, then all y, then all z.
#[derive(Debug, Clone, Copy)]
pub struct KnotSet<'a> {
    coords: &'a [f64],
    len: usize,
}

impl<'a> KnotSet<'a> {
    pub fn new(coords: &'a [f64]) -> GriddingResult<Self> {
        if coords.len() % AXES != 0 {
            return Err(GriddingError::dimension_mismatch(
                "knot coordinates",
                coords.len().next_multiple_of(AXES),
                coords.len(),
            ));
        }
        Ok(Self {
            coords,
            len: coords.len() / AXES,
        })
    }

    /// Packs knots into the axis-major flat layout accepted by [`KnotSet::new`].
    pub fn pack(knots: &[Knot]) -> Vec<f64> {
        let mut flat = Vec::with_capacity(knots.len() * AXES);
        for axis in 0..AXES {
            flat.extend(knots.iter().map(|k| k.coord(axis)));
        }
        flat
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Coordinates of every knot along one axis.
    #[inline]
    pub fn axis(&self, axis: usize) -> &'a [f64] {
        &self.coords[axis * self.len..(axis + 1) * self.len]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Knot {
        Knot::new(
            self.coords[index],
            self.coords[index + self.len],
            self.coords[index + 2 * self.len],
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = Knot> + '_ {
        (0..self.len).map(|i| self.get(i))
    }

    /// First knot coordinate that is non-finite or outside `[0, 2π)`.
    pub fn find_out_of_domain(&self) -> Option<GriddingError> {
        for axis in 0..AXES {
            for (index, &value) in self.axis(axis).iter().enumerate() {
                if !(0.0..TAU).contains(&value) {
                    return Some(GriddingError::KnotOutOfDomain { index, axis, value });
                }
            }
        }
        None
    }
}

/// Per-knot results, split into real and imaginary parts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GriddedValues {
    re: Vec<f64>,
    im: Vec<f64>,
}

impl GriddedValues {
    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![0.0; len],
            im: vec![0.0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.re.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Complex<f64> {
        Complex::new(self.re[index], self.im[index])
    }

    #[inline]
    pub fn re(&self) -> &[f64] {
        &self.re
    }

    #[inline]
    pub fn im(&self) -> &[f64] {
        &self.im
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (self.re.as_mut_slice(), self.im.as_mut_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = Complex<f64>> + '_ {
        self.re
            .iter()
            .zip(&self.im)
            .map(|(&re, &im)| Complex::new(re, im))
    }

    pub fn to_complex(&self) -> Vec<Complex<f64>> {
        self.iter().collect()
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.re, self.im)
    }
}

/// How the knot loop is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// Single thread, one scratch window reused across all knots.
    Sequential,
    /// Knots partitioned across the Rayon pool when the `parallel` feature is
    /// enabled; sequential otherwise.
    #[default]
    Parallel,
}

/// Serializable configuration for a [`crate::engines::gridding::Type2Gridder`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GriddingConfig {
    pub params: GridParameters,
    #[serde(default)]
    pub execution: Execution,
}

impl GriddingConfig {
    pub fn new(params: GridParameters) -> Self {
        Self {
            params,
            execution: Execution::default(),
        }
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}
