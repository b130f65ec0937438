//! Fusion of sample scores with the flatness mask into a per-cell priority map.
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::PlannerConfig;
use crate::error::PlanResult;
use crate::grid::{FlatnessMask, Grid, PriorityMap};
use crate::sample::{score_of, Sample};

/// Default multiplier for samples on non-flat cells.
pub const DEFAULT_NON_FLAT_PENALTY: f64 = 0.5;

/// Bookkeeping from one [`PriorityMapBuilder::build_with_stats`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    /// Samples whose score was written to the map.
    pub written: usize,
    /// Samples outside the grid, ignored.
    pub dropped: usize,
    /// Writes that replaced an earlier sample's value in the same cell.
    pub overwritten: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct PriorityMapBuilder {
    pub non_flat_penalty: f64,
}

impl PriorityMapBuilder {
    pub fn new(non_flat_penalty: f64) -> Self {
        Self { non_flat_penalty }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.non_flat_penalty)
    }

    /// See [`PriorityMapBuilder::build_with_stats`].
    pub fn build(
        &self,
        elevation_shape: (usize, usize),
        flatness: &FlatnessMask,
        samples: &[Sample],
    ) -> PlanResult<PriorityMap> {
        self.build_with_stats(elevation_shape, flatness, samples).map(|(map, _)| map)
    }

    /// Build a zero-initialised map shaped like `flatness` and write one value
    /// per in-bounds sample, in input order:
    ///
    ///   flat cell     → score
    ///   non-flat cell → score × non_flat_penalty
    ///
    /// A later sample on the same cell replaces the earlier value outright;
    /// nothing is accumulated. Samples outside the grid are skipped. Fails
    /// with `ShapeMismatch` if the mask is not `elevation_shape`.
    pub fn build_with_stats(
        &self,
        elevation_shape: (usize, usize),
        flatness: &FlatnessMask,
        samples: &[Sample],
    ) -> PlanResult<(PriorityMap, PriorityStats)> {
        flatness.ensure_shape("flatness mask", elevation_shape)?;

        let (width, height) = flatness.shape();
        let mut map: PriorityMap = Grid::new(width, height, 0.0);
        let mut touched = Grid::new(width, height, false);
        let mut stats = PriorityStats::default();

        // Sequential on purpose: last writer wins.
        for sample in samples {
            let Some((x, y)) = map.cell_at(sample.location.x, sample.location.y) else {
                trace!(sample = %sample.sample_id, x = sample.location.x, y = sample.location.y, "sample outside grid");
                stats.dropped += 1;
                continue;
            };

            let score = score_of(sample.classification()) as f64;
            let value = if flatness.get(x, y) { score } else { score * self.non_flat_penalty };

            if touched.get(x, y) {
                debug!(sample = %sample.sample_id, x, y, previous = map.get(x, y), value, "overwriting cell");
                stats.overwritten += 1;
            }
            map.set(x, y, value);
            touched.set(x, y, true);
            stats.written += 1;
        }

        debug!(
            written = stats.written,
            dropped = stats.dropped,
            overwritten = stats.overwritten,
            "priority map built"
        );
        Ok((map, stats))
    }
}

impl Default for PriorityMapBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_NON_FLAT_PENALTY)
    }
}
