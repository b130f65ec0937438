//! Per-cell slope magnitude and flat-zone detection.
//!
//! For every cell `(x, y)`:
//!   dz/dx = finite difference of elevation along x, divided by resolution
//!   dz/dy = finite difference of elevation along y, divided by resolution
//!   slope = √(dz/dx² + dz/dy²)
//!
//! The result is a dimensionless rise/run magnitude, not an angle.
use tracing::debug;

#[cfg(feature = "threading")]
use rayon::prelude::*;

use super::gradient::axis_derivative;
use crate::config::PlannerConfig;
use crate::grid::{ElevationGrid, FlatnessMask, Grid, SlopeGrid};

/// Default slope threshold below which a cell counts as flat.
pub const DEFAULT_SLOPE_THRESHOLD: f64 = 0.05;

/// Slope magnitude at every cell of `elevation`.
///
/// Shape matches the input. Axes of length one contribute zero gradient
/// rather than dividing by zero.
pub fn compute_slope(elevation: &ElevationGrid) -> SlopeGrid {
    let (width, height) = elevation.shape();
    let mut slope: SlopeGrid = Grid::new(width, height, 0.0);
    if slope.is_empty() {
        return slope;
    }
    let res = elevation.resolution;
    let z = &elevation.elevations;

    let fill_column = |x: usize, column: &mut [f64]| {
        for (y, cell) in column.iter_mut().enumerate() {
            let dz_dx = axis_derivative(|i| z.get(i, y) as f64, x, width, res);
            let dz_dy = axis_derivative(|j| z.get(x, j) as f64, y, height, res);
            *cell = (dz_dx * dz_dx + dz_dy * dz_dy).sqrt();
        }
    };

    // Each x owns a contiguous `height`-long run of the x-major buffer.
    #[cfg(feature = "threading")]
    slope
        .data
        .par_chunks_mut(height)
        .enumerate()
        .for_each(|(x, column)| fill_column(x, column));

    #[cfg(not(feature = "threading"))]
    slope
        .data
        .chunks_mut(height)
        .enumerate()
        .for_each(|(x, column)| fill_column(x, column));

    slope
}

/// Threshold a slope grid: `true` where `slope < threshold`.
pub fn flatness_from_slope(slope: &SlopeGrid, threshold: f64) -> FlatnessMask {
    Grid {
        width: slope.width,
        height: slope.height,
        data: slope.data.iter().map(|&s| s < threshold).collect(),
    }
}

/// Flat/non-flat mask for `elevation` at `threshold`.
pub fn detect_flat_zones(elevation: &ElevationGrid, threshold: f64) -> FlatnessMask {
    flatness_from_slope(&compute_slope(elevation), threshold)
}

/// Slope grid together with the mask derived from it.
#[derive(Debug, Clone)]
pub struct SlopeAnalysis {
    pub slope: SlopeGrid,
    pub flatness: FlatnessMask,
}

impl SlopeAnalysis {
    /// Fraction of cells marked flat, 0.0 for an empty grid.
    pub fn flat_fraction(&self) -> f64 {
        if self.flatness.is_empty() {
            return 0.0;
        }
        self.flatness.count_true() as f64 / self.flatness.len() as f64
    }

    pub fn max_slope(&self) -> f64 {
        self.slope.data.iter().cloned().fold(0.0, f64::max)
    }
}

/// Slope stage configured with a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct SlopeAnalyzer {
    pub threshold: f64,
}

impl SlopeAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.slope_threshold)
    }

    /// Compute slope and the flatness mask in one pass over the grid.
    pub fn analyze(&self, elevation: &ElevationGrid) -> SlopeAnalysis {
        let slope = compute_slope(elevation);
        let flatness = flatness_from_slope(&slope, self.threshold);
        let analysis = SlopeAnalysis { slope, flatness };
        debug!(
            width = elevation.shape().0,
            height = elevation.shape().1,
            threshold = self.threshold,
            flat_cells = analysis.flatness.count_true(),
            max_slope = analysis.max_slope(),
            "slope analysis complete"
        );
        analysis
    }
}

impl Default for SlopeAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_SLOPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Plane rising `rise_per_cell` metres per cell along x.
    fn make_ramp(width: usize, height: usize, rise_per_cell: f32, resolution: f64) -> ElevationGrid {
        let mut g = Grid::new(width, height, 0.0f32);
        for x in 0..width {
            for y in 0..height {
                g.set(x, y, x as f32 * rise_per_cell);
            }
        }
        ElevationGrid::from_elevations(g, resolution)
    }

    #[test]
    fn zero_grid_has_zero_slope_and_is_all_flat() {
        let eg = ElevationGrid::from_elevations(Grid::new(16, 9, 0.0), 0.05);
        let slope = compute_slope(&eg);
        assert!(slope.data.iter().all(|&s| s == 0.0));
        for threshold in [1e-9, 0.05, 3.0] {
            let mask = detect_flat_zones(&eg, threshold);
            assert_eq!(mask.count_true(), mask.len());
        }
    }

    #[test]
    fn ramp_slope_is_rise_over_run() {
        // 0.01 m per 0.05 m cell → 0.2 everywhere, edges included.
        let eg = make_ramp(10, 6, 0.01, 0.05);
        let slope = compute_slope(&eg);
        for &s in &slope.data {
            assert_relative_eq!(s, 0.2, epsilon = 1e-5);
        }
        assert_eq!(detect_flat_zones(&eg, 0.05).count_true(), 0);
        assert_eq!(detect_flat_zones(&eg, 0.25).count_true(), 60);
    }

    #[test]
    fn diagonal_plane_combines_both_axes() {
        let mut g = Grid::new(5, 5, 0.0f32);
        for x in 0..5 {
            for y in 0..5 {
                g.set(x, y, 3.0 * x as f32 + 4.0 * y as f32);
            }
        }
        let slope = compute_slope(&ElevationGrid::from_elevations(g, 1.0));
        for &s in &slope.data {
            assert_relative_eq!(s, 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn single_row_and_single_cell_do_not_divide_by_zero() {
        let mut g = Grid::new(4, 1, 0.0f32);
        for x in 0..4 {
            g.set(x, 0, x as f32);
        }
        let slope = compute_slope(&ElevationGrid::from_elevations(g, 1.0));
        assert!(slope.data.iter().all(|&s| (s - 1.0).abs() < 1e-9));

        let single = ElevationGrid::from_elevations(Grid::new(1, 1, 42.0), 0.05);
        let slope = compute_slope(&single);
        assert_eq!(slope.data, vec![0.0]);
        assert!(detect_flat_zones(&single, 0.05).get(0, 0));
    }

    #[test]
    fn empty_grid_yields_empty_outputs() {
        let eg = ElevationGrid::from_elevations(Grid::new(0, 5, 0.0), 0.05);
        let analysis = SlopeAnalyzer::default().analyze(&eg);
        assert!(analysis.slope.is_empty());
        assert_eq!(analysis.flatness.shape(), (0, 5));
        assert_eq!(analysis.flat_fraction(), 0.0);
    }

    #[test]
    fn threshold_is_strict() {
        let eg = make_ramp(4, 4, 0.5, 1.0);
        assert_eq!(detect_flat_zones(&eg, 0.5).count_true(), 0);
        assert_eq!(detect_flat_zones(&eg, 0.500001).count_true(), 16);
    }

    #[test]
    fn analyzer_mask_matches_free_function() {
        let eg = make_ramp(8, 8, 0.001, 0.05);
        let analysis = SlopeAnalyzer::new(0.05).analyze(&eg);
        assert_eq!(analysis.flatness, detect_flat_zones(&eg, 0.05));
        assert_relative_eq!(analysis.flat_fraction(), 1.0);
    }
}
