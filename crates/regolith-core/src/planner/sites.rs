//! Ranked extraction of excavation sites from a priority map.
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::grid::PriorityMap;

/// Default number of sites returned per cycle.
pub const DEFAULT_TOP_N: usize = 5;

/// One ranked excavation target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcavationSite {
    pub x_index: usize,
    pub y_index: usize,
    pub score: f64,
}

impl ExcavationSite {
    /// Site position in metres (`index * resolution`).
    pub fn physical_position(&self, resolution: f64) -> (f64, f64) {
        (self.x_index as f64 * resolution, self.y_index as f64 * resolution)
    }
}

/// Up to `n` cells with positive score, highest first.
///
/// Equal scores keep storage order (ascending flat index), so the result is
/// fully determined by the map. Cells scoring `<= 0` (or NaN) never appear.
pub fn top_sites(priority: &PriorityMap, n: usize) -> Vec<ExcavationSite> {
    if n == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..priority.len()).collect();
    // `sort_by` is stable; ties stay in ascending index order.
    order.sort_by(|&a, &b| priority.data[b].total_cmp(&priority.data[a]));

    let sites: Vec<ExcavationSite> = order
        .into_iter()
        .filter(|&i| priority.data[i] > 0.0)
        .take(n)
        .map(|i| {
            let (x_index, y_index) = priority.coords_of(i);
            ExcavationSite { x_index, y_index, score: priority.data[i] }
        })
        .collect();

    debug!(requested = n, found = sites.len(), "excavation sites selected");
    sites
}

/// Selection stage with a fixed site budget.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelector {
    pub top_n: usize,
}

impl SiteSelector {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.top_n)
    }

    pub fn select(&self, priority: &PriorityMap) -> Vec<ExcavationSite> {
        top_sites(priority, self.top_n)
    }
}

impl Default for SiteSelector {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    /// 2×3 map holding `[10, 8, 8, 5, -10, 0]` in storage order.
    fn six_cell_map() -> PriorityMap {
        Grid::from_vec(2, 3, vec![10.0, 8.0, 8.0, 5.0, -10.0, 0.0]).unwrap()
    }

    #[test]
    fn top_three_keeps_both_ties_before_five() {
        let sites = top_sites(&six_cell_map(), 3);
        let scores: Vec<f64> = sites.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![10.0, 8.0, 8.0]);
        assert_eq!((sites[1].x_index, sites[1].y_index), (0, 1));
        assert_eq!((sites[2].x_index, sites[2].y_index), (0, 2));
    }

    #[test]
    fn non_positive_scores_never_selected() {
        let sites = top_sites(&six_cell_map(), 10);
        assert_eq!(sites.len(), 4);
        assert!(sites.iter().all(|s| s.score > 0.0));
        assert_eq!(sites[3], ExcavationSite { x_index: 1, y_index: 0, score: 5.0 });
    }

    #[test]
    fn zero_n_and_all_negative_give_empty() {
        assert!(top_sites(&six_cell_map(), 0).is_empty());
        let negative: PriorityMap = Grid::new(3, 3, -5.0);
        assert!(top_sites(&negative, 5).is_empty());
        let empty: PriorityMap = Grid::new(0, 0, 0.0);
        assert!(top_sites(&empty, 5).is_empty());
    }

    #[test]
    fn ties_break_by_ascending_flat_index() {
        let mut map: PriorityMap = Grid::new(3, 3, 0.0);
        map.set(2, 1, 4.0);
        map.set(0, 2, 4.0);
        map.set(1, 0, 4.0);
        let coords: Vec<(usize, usize)> =
            top_sites(&map, 3).iter().map(|s| (s.x_index, s.y_index)).collect();
        assert_eq!(coords, vec![(0, 2), (1, 0), (2, 1)]);
    }

    #[test]
    fn nan_cells_are_skipped() {
        let map: PriorityMap = Grid::from_vec(1, 3, vec![f64::NAN, 2.0, 1.0]).unwrap();
        let scores: Vec<f64> = top_sites(&map, 3).iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![2.0, 1.0]);
    }

    #[test]
    fn physical_position_scales_by_resolution() {
        let site = ExcavationSite { x_index: 10, y_index: 20, score: 10.0 };
        assert_eq!(site.physical_position(0.5), (5.0, 10.0));
    }

    #[test]
    fn selector_uses_budget() {
        assert_eq!(SiteSelector::new(2).select(&six_cell_map()).len(), 2);
    }
}
