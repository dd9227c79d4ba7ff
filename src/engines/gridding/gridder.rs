use tracing::{debug, warn};

use crate::core::{
    AXES, Execution, GridParameters, GriddedValues, GriddingConfig, GriddingError, GriddingResult,
    KernelTable, KnotSet, UniformGrid,
};

use super::kernel::convolve_type2;

/// Validated front end to the type-2 gridding kernel.
///
/// Parameters and kernel tables are checked once at construction; every
/// [`Type2Gridder::interpolate`] call checks the grid and knot arrays before
/// handing them to the unchecked kernel.
#[derive(Debug, Clone)]
pub struct Type2Gridder {
    config: GriddingConfig,
    tables: [KernelTable; AXES],
}

impl Type2Gridder {
    pub fn new(params: GridParameters, tables: [KernelTable; AXES]) -> GriddingResult<Self> {
        Self::with_config(GriddingConfig::new(params), tables)
    }

    pub fn with_config(
        config: GriddingConfig,
        tables: [KernelTable; AXES],
    ) -> GriddingResult<Self> {
        let params = &config.params;
        validate_logged(params)?;
        for (axis, table) in tables.iter().enumerate() {
            if table.half_width() != params.half_width {
                let err = GriddingError::dimension_mismatch(
                    "kernel table",
                    params.window_len(),
                    table.as_slice().len(),
                );
                warn!(%err, axis, "rejecting kernel table");
                return Err(err);
            }
        }
        Ok(Self { config, tables })
    }

    /// Gridder with the standard Gaussian kernel tables for `params`.
    pub fn gaussian(params: GridParameters) -> GriddingResult<Self> {
        // Tables are sized from `half_width`, so check it first.
        validate_logged(&params)?;
        Self::new(params, KernelTable::gaussian_set(&params))
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.config.execution = execution;
        self
    }

    #[inline]
    pub fn params(&self) -> &GridParameters {
        &self.config.params
    }

    #[inline]
    pub fn config(&self) -> &GriddingConfig {
        &self.config
    }

    #[inline]
    pub fn tables(&self) -> &[KernelTable; AXES] {
        &self.tables
    }

    /// Values received by each knot from `grid`.
    pub fn interpolate(
        &self,
        grid: &UniformGrid<'_>,
        knots: &KnotSet<'_>,
    ) -> GriddingResult<GriddedValues> {
        let params = &self.config.params;
        if grid.extents() != params.extents {
            let err = GriddingError::ExtentMismatch {
                expected: params.extents,
                actual: grid.extents(),
            };
            warn!(%err, "grid extents differ");
            return Err(err);
        }
        if let Some(err) = knots.find_out_of_domain() {
            warn!(%err, "knot outside periodic domain");
            return Err(err);
        }

        debug!(
            knots = knots.len(),
            half_width = params.half_width,
            extents = ?params.extents,
            execution = ?self.config.execution,
            "type-2 gaussian gridding"
        );
        Ok(convolve_type2(
            grid,
            knots,
            params,
            &self.tables,
            self.config.execution,
        ))
    }

    /// [`Type2Gridder::interpolate`] over raw split-complex arrays.
    pub fn interpolate_flat(
        &self,
        grid_re: &[f64],
        grid_im: &[f64],
        knots: &[f64],
    ) -> GriddingResult<GriddedValues> {
        let grid = UniformGrid::new(grid_re, grid_im, self.config.params.extents)?;
        let knots = KnotSet::new(knots)?;
        self.interpolate(&grid, &knots)
    }
}

fn validate_logged(params: &GridParameters) -> GriddingResult<()> {
    params.validate().inspect_err(|err| {
        warn!(%err, ?params, "rejecting gridding parameters");
    })
}

/// Flat-array entry point.
///
/// `knots` holds `3·M` axis-major coordinates, each table `2·M_sp` weights and
/// `params` the packed vector `[M_sp, τx, τy, τz, Nx, Ny, Nz]`. Returns the
/// real and imaginary parts of the `M` knot values.
pub fn convolve_type2_flat(
    grid_re: &[f64],
    grid_im: &[f64],
    knots: &[f64],
    tables: [&[f64]; AXES],
    params: &[f64],
) -> GriddingResult<(Vec<f64>, Vec<f64>)> {
    let params = GridParameters::from_vector(params)?;
    validate_logged(&params)?;
    let [tx, ty, tz] = tables;
    let tables = [
        KernelTable::from_weights(params.half_width, tx.to_vec())?,
        KernelTable::from_weights(params.half_width, ty.to_vec())?,
        KernelTable::from_weights(params.half_width, tz.to_vec())?,
    ];
    let gridder = Type2Gridder::new(params, tables)?;
    Ok(gridder
        .interpolate_flat(grid_re, grid_im, knots)?
        .into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Knot;

    fn gridder() -> Type2Gridder {
        Type2Gridder::gaussian(GridParameters::isotropic(2, 0.5, 8)).unwrap()
    }

    #[test]
    fn rejects_mismatched_tables() {
        let params = GridParameters::isotropic(3, 0.5, 8);
        let mut tables = KernelTable::gaussian_set(&params);
        tables[1] = KernelTable::gaussian(8, 0.5, 2);
        let err = Type2Gridder::new(params, tables).unwrap_err();
        assert_eq!(err, GriddingError::dimension_mismatch("kernel table", 6, 4));
    }

    #[test]
    fn rejects_window_wider_than_grid() {
        let err = Type2Gridder::gaussian(GridParameters::isotropic(5, 0.5, 8)).unwrap_err();
        assert!(matches!(err, GriddingError::InvalidParameters(_)));
    }

    #[test]
    fn gaussian_preset_reports_same_errors_as_new() {
        let vector = [1e30, 1.0, 1.0, 1.0, 8.0, 8.0, 8.0];
        for params in [
            GridParameters::isotropic(2, 0.0, 8),
            GridParameters::isotropic(0, 0.5, 8),
            GridParameters::from_vector(&vector).unwrap(),
        ] {
            let preset = Type2Gridder::gaussian(params).unwrap_err();
            let tables = KernelTable::gaussian_set(&params);
            let explicit = Type2Gridder::new(params, tables).unwrap_err();
            assert_eq!(preset, explicit);
            assert!(matches!(preset, GriddingError::InvalidParameters(_)));
        }
    }

    #[test]
    fn rejects_grid_with_other_extents() {
        let re = vec![0.0; 8 * 8 * 4];
        let im = re.clone();
        let grid = UniformGrid::new(&re, &im, [8, 8, 4]).unwrap();
        let flat = KnotSet::pack(&[Knot::new(1.0, 1.0, 1.0)]);
        let knots = KnotSet::new(&flat).unwrap();
        let err = gridder().interpolate(&grid, &knots).unwrap_err();
        assert_eq!(
            err,
            GriddingError::ExtentMismatch {
                expected: [8, 8, 8],
                actual: [8, 8, 4],
            }
        );

        // Same cell count, different shape.
        let params = GridParameters::new(2, [0.5; AXES], [4, 8, 8]);
        let err = Type2Gridder::gaussian(params)
            .unwrap()
            .interpolate(&grid, &knots)
            .unwrap_err();
        assert_eq!(
            err,
            GriddingError::ExtentMismatch {
                expected: [4, 8, 8],
                actual: [8, 8, 4],
            }
        );
    }

    #[test]
    fn rejects_out_of_domain_knots() {
        let re = vec![0.0; 512];
        let im = re.clone();
        let flat = KnotSet::pack(&[Knot::new(1.0, 7.0, 1.0)]);
        let err = gridder().interpolate_flat(&re, &im, &flat).unwrap_err();
        assert!(matches!(
            err,
            GriddingError::KnotOutOfDomain { index: 0, axis: 1, .. }
        ));
    }

    #[test]
    fn rejects_truncated_flat_inputs() {
        let re = vec![0.0; 512];
        let im = vec![0.0; 511];
        let err = gridder().interpolate_flat(&re, &im, &[0.0; 3]).unwrap_err();
        assert!(matches!(err, GriddingError::DimensionMismatch { .. }));

        let im = vec![0.0; 512];
        let err = gridder().interpolate_flat(&re, &im, &[0.0; 4]).unwrap_err();
        assert!(matches!(
            err,
            GriddingError::DimensionMismatch { what: "knot coordinates", .. }
        ));
    }
}
