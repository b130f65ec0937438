//! Terrain suitability: slope magnitude and the flat/non-flat mask.
mod gradient;
pub mod slope;

pub use slope::{compute_slope, detect_flat_zones, SlopeAnalysis, SlopeAnalyzer};
