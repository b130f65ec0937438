//! Terrain-to-priority planning for a regolith excavation robot.
//!
//! An elevation grid and a list of classified soil samples go in; a ranked
//! list of excavation cells comes out. See [`pipeline::ExcavationPlanner`]
//! for the stage order.
pub mod config;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod planner;
pub mod sample;
pub mod synth;
pub mod terrain;

pub use config::PlannerConfig;
pub use error::{PlanError, PlanResult};
pub use grid::{ElevationGrid, FlatnessMask, Grid, PriorityMap, SlopeGrid};
pub use pipeline::{classify_samples, ExcavationPlanner, PlanOutcome};
pub use planner::{top_sites, ExcavationSite, PriorityMapBuilder, SiteSelector};
pub use sample::{Classification, Composition, Location, Sample};
pub use terrain::{compute_slope, detect_flat_zones, SlopeAnalyzer};
