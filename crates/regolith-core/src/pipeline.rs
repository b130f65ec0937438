//! Planning-cycle orchestrator: runs every stage in order.
//!
//!   1. Slope analysis → flatness mask
//!   2. Priority fusion of sample scores with the mask
//!   3. Ranked site selection
//!
//! Each stage consumes its inputs by reference and returns a fresh output, so
//! a cycle can be rerun on the same inputs and yield identical results.
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PlannerConfig;
use crate::error::PlanResult;
use crate::grid::{ElevationGrid, FlatnessMask, PriorityMap, SlopeGrid};
use crate::planner::{ExcavationSite, PriorityMapBuilder, PriorityStats, SiteSelector};
use crate::sample::Sample;
use crate::terrain::SlopeAnalyzer;

/// Everything one planning cycle produced.
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutcome {
    /// `None` when the caller supplied the flatness mask.
    pub slope: Option<SlopeGrid>,
    pub flatness: FlatnessMask,
    pub priority: PriorityMap,
    pub stats: PriorityStats,
    pub sites: Vec<ExcavationSite>,
}

/// Classify every sample that has not been classified yet.
/// Returns how many were newly classified.
pub fn classify_samples(samples: &mut [Sample]) -> usize {
    let mut newly = 0;
    for sample in samples.iter_mut().filter(|s| s.classification().is_none()) {
        sample.classify();
        newly += 1;
    }
    newly
}

/// The stage chain for one configuration.
#[derive(Debug, Clone)]
pub struct ExcavationPlanner {
    config: PlannerConfig,
    slope: SlopeAnalyzer,
    priority: PriorityMapBuilder,
    selector: SiteSelector,
}

impl ExcavationPlanner {
    /// Validate `config` and wire up the stages from it.
    pub fn new(config: PlannerConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self {
            slope: SlopeAnalyzer::from_config(&config),
            priority: PriorityMapBuilder::from_config(&config),
            selector: SiteSelector::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Full cycle: derive the flatness mask from `elevation`, then fuse and rank.
    pub fn plan(&self, elevation: &ElevationGrid, samples: &[Sample]) -> PlanResult<PlanOutcome> {
        elevation.validate()?;
        self.check_resolution(elevation);
        let analysis = self.slope.analyze(elevation);
        let mut outcome = self.plan_with_mask(elevation, &analysis.flatness, samples)?;
        outcome.slope = Some(analysis.slope);
        Ok(outcome)
    }

    /// Cycle with a caller-supplied mask. The mask must match `elevation`.
    pub fn plan_with_mask(
        &self,
        elevation: &ElevationGrid,
        flatness: &FlatnessMask,
        samples: &[Sample],
    ) -> PlanResult<PlanOutcome> {
        elevation.elevations.ensure_shape("elevation grid", elevation.shape())?;
        let shape = elevation.shape();
        let (priority, stats) = self.priority.build_with_stats(shape, flatness, samples)?;
        let sites = self.rank(shape, &priority)?;

        info!(
            samples = samples.len(),
            dropped = stats.dropped,
            flat_cells = flatness.count_true(),
            sites = sites.len(),
            "planning cycle complete"
        );

        Ok(PlanOutcome {
            slope: None,
            flatness: flatness.clone(),
            priority,
            stats,
            sites,
        })
    }

    /// Rank an existing priority map. The map must match `elevation_shape`.
    pub fn rank(
        &self,
        elevation_shape: (usize, usize),
        priority: &PriorityMap,
    ) -> PlanResult<Vec<ExcavationSite>> {
        priority.ensure_shape("priority map", elevation_shape)?;
        Ok(self.selector.select(priority))
    }

    fn check_resolution(&self, elevation: &ElevationGrid) {
        if elevation.resolution != self.config.resolution {
            warn!(
                grid = elevation.resolution,
                config = self.config.resolution,
                "elevation grid resolution differs from config; slopes use the grid's"
            );
        }
    }
}
