//! Error types for the planning pipeline.

use thiserror::Error;

/// Errors that abort a planning cycle.
///
/// Out-of-bounds samples and degenerate grid axes are not errors; they are
/// handled in-line by the stage that meets them.
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// A derived or supplied grid disagrees with the elevation grid's shape.
    #[error("{what} shape {found:?} does not match elevation grid shape {expected:?}")]
    ShapeMismatch {
        /// Which grid was rejected.
        what: &'static str,
        /// Elevation grid `(width, height)`.
        expected: (usize, usize),
        /// Offending grid `(width, height)`.
        found: (usize, usize),
    },

    /// Flat buffer length does not equal `width * height`.
    #[error("grid data length {found} does not match width * height = {expected}")]
    DataLength { expected: usize, found: usize },

    /// Configuration rejected by [`crate::config::PlannerConfig::validate`].
    #[error("invalid planner config: {0}")]
    InvalidConfig(String),
}

/// Result type for planning operations.
pub type PlanResult<T> = std::result::Result<T, PlanError>;
