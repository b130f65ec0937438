//! Soil samples: location, measured composition, and derived classification.
pub mod classify;
pub mod report;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use classify::{classify, score_for_label, score_of, Classification};
pub use report::SampleReport;

/// Compound symbol → mass percentage.
pub type Composition = BTreeMap<String, f64>;

/// Compound symbols read by the classifier.
pub mod compound {
    pub const IRON_OXIDE: &str = "Fe2O3";
    pub const SILICATE: &str = "SiO2";
    pub const WATER: &str = "H2O";
    pub const MAGNESIUM_SULFATE: &str = "MgSO4";
    pub const PERCHLORATE: &str = "ClO4";
    pub const ORGANICS: &str = "Organics";
}

/// Sample position in grid-cell units. Not necessarily cell-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One soil measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub location: Location,
    /// Traceability only; the pipeline never branches on it.
    pub sample_id: String,
    #[serde(default)]
    pub composition: Composition,
    #[serde(default)]
    classification: Option<Classification>,
}

impl Sample {
    /// A sample with no composition and no classification yet.
    pub fn new(location: Location, sample_id: impl Into<String>) -> Self {
        Self {
            location,
            sample_id: sample_id.into(),
            composition: Composition::new(),
            classification: None,
        }
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    /// A sample whose category was decided upstream.
    pub fn classified(location: Location, sample_id: impl Into<String>, classification: Classification) -> Self {
        Self { classification: Some(classification), ..Self::new(location, sample_id) }
    }

    pub fn classification(&self) -> Option<Classification> {
        self.classification
    }

    /// Classify from the current composition on first call; later calls
    /// return the stored category unchanged.
    pub fn classify(&mut self) -> Classification {
        *self.classification.get_or_insert_with(|| classify(&self.composition))
    }

    pub fn report(&self) -> SampleReport {
        SampleReport::from(self)
    }
}
