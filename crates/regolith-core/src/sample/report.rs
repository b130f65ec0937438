//! Per-sample analysis report, as text or JSON.
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Composition, Location, Sample};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReport {
    pub sample_id: String,
    pub location: Location,
    pub composition: Composition,
    /// Category label, `None` if the sample was never classified.
    pub classification: Option<String>,
}

impl From<&Sample> for SampleReport {
    fn from(sample: &Sample) -> Self {
        Self {
            sample_id: sample.sample_id.clone(),
            location: sample.location,
            composition: sample.composition.clone(),
            classification: sample.classification().map(|c| c.label().to_string()),
        }
    }
}

impl SampleReport {
    /// File name the report is conventionally saved under.
    pub fn file_name(&self) -> String {
        format!("sample_report_{}.json", self.sample_id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SampleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Regolith Sample Report [{}] ---", self.sample_id)?;
        writeln!(f, "Location: ({}, {})", self.location.x, self.location.y)?;
        writeln!(f, "Composition (%):")?;
        for (compound, pct) in &self.composition {
            writeln!(f, "  - {compound}: {pct}%")?;
        }
        write!(f, "Classification: {}", self.classification.as_deref().unwrap_or("unclassified"))
    }
}
