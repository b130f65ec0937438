use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::planner::priority::DEFAULT_NON_FLAT_PENALTY;
use crate::planner::sites::DEFAULT_TOP_N;
use crate::terrain::slope::DEFAULT_SLOPE_THRESHOLD;

/// Parameters for one planning cycle.
///
/// Passed explicitly to every stage; there are no module-level defaults
/// beyond [`PlannerConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Metres per grid cell.
    pub resolution: f64,
    /// Physical extent `(width, height)` in metres.
    pub area_size: (f64, f64),
    /// Cells with slope strictly below this are flat.
    pub slope_threshold: f64,
    /// Maximum number of excavation sites returned.
    pub top_n: usize,
    /// Multiplier applied to sample scores that land on non-flat cells.
    pub non_flat_penalty: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            resolution: 0.05,
            area_size: (10.0, 10.0),
            slope_threshold: DEFAULT_SLOPE_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            non_flat_penalty: DEFAULT_NON_FLAT_PENALTY,
        }
    }
}

impl PlannerConfig {
    /// Grid dimensions `(width, height)` implied by `area_size / resolution`,
    /// truncated to whole cells.
    pub fn grid_dimensions(&self) -> (usize, usize) {
        let (w, h) = self.area_size;
        ((w / self.resolution) as usize, (h / self.resolution) as usize)
    }

    /// Reject configurations that cannot produce a usable grid.
    pub fn validate(&self) -> PlanResult<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "resolution must be a positive number of metres, got {}",
                self.resolution
            )));
        }
        let (w, h) = self.area_size;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "area_size must be positive, got ({w}, {h})"
            )));
        }
        if !self.slope_threshold.is_finite() {
            return Err(PlanError::InvalidConfig(format!(
                "slope_threshold must be finite, got {}",
                self.slope_threshold
            )));
        }
        if !self.non_flat_penalty.is_finite() {
            return Err(PlanError::InvalidConfig(format!(
                "non_flat_penalty must be finite, got {}",
                self.non_flat_penalty
            )));
        }
        let (gw, gh) = self.grid_dimensions();
        if gw == 0 || gh == 0 {
            return Err(PlanError::InvalidConfig(format!(
                "area ({w}, {h}) m at {} m/cell yields an empty {gw}x{gh} grid",
                self.resolution
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_200_square() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.grid_dimensions(), (200, 200));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn dimensions_truncate() {
        let cfg = PlannerConfig { resolution: 0.3, area_size: (1.0, 2.0), ..Default::default() };
        assert_eq!(cfg.grid_dimensions(), (3, 6));
    }

    #[test]
    fn rejects_zero_resolution() {
        let cfg = PlannerConfig { resolution: 0.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_sub_cell_area() {
        let cfg = PlannerConfig { area_size: (0.01, 10.0), ..Default::default() };
        assert!(matches!(cfg.validate(), Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: PlannerConfig = serde_json::from_str(r#"{ "top_n": 3 }"#).unwrap();
        assert_eq!(cfg.top_n, 3);
        assert_eq!(cfg.resolution, 0.05);
        assert_eq!(cfg.area_size, (10.0, 10.0));
    }
}
