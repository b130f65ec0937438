//! Priority fusion and ranked site selection.
pub mod priority;
pub mod sites;

pub use priority::{PriorityMapBuilder, PriorityStats};
pub use sites::{top_sites, ExcavationSite, SiteSelector};
