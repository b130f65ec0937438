//! Rule-based sample classification and the category → value score table.
use serde::{Deserialize, Serialize};

use super::{compound, Composition};

/// Closed set of sample categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Hazardous,
    PotentiallyHabitable,
    ConstructionMaterial,
    Unknown,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Hazardous,
        Classification::PotentiallyHabitable,
        Classification::ConstructionMaterial,
        Classification::Unknown,
    ];

    /// Human-readable label used in sample reports.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Hazardous => "Hazardous (toxic)",
            Classification::PotentiallyHabitable => "Potentially Habitable - Water Detected",
            Classification::ConstructionMaterial => {
                "Construction Material - High Silicate and Iron Content"
            }
            Classification::Unknown => "Unknown - Further Analysis Required",
        }
    }

    /// Parse either a report label or the variant name.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label || format!("{c:?}") == label)
    }

    /// Excavation value of this category. Higher is better; negative means avoid.
    pub fn score(self) -> i32 {
        match self {
            Classification::Hazardous => -10,
            Classification::PotentiallyHabitable => 10,
            Classification::ConstructionMaterial => 8,
            Classification::Unknown => 5,
        }
    }
}

/// Perchlorate above this (mass %) makes a sample hazardous.
pub const PERCHLORATE_LIMIT: f64 = 2.0;
/// Water above this (mass %) makes a sample potentially habitable.
pub const WATER_LIMIT: f64 = 5.0;
/// Silicate and iron oxide must both exceed these for construction use.
pub const SILICATE_LIMIT: f64 = 40.0;
pub const IRON_OXIDE_LIMIT: f64 = 15.0;

/// Classify a composition. Rules are checked in order and the first match wins:
///
/// 1. ClO4 > 2.0                  → Hazardous
/// 2. H2O > 5.0                   → PotentiallyHabitable
/// 3. SiO2 > 40.0 and Fe2O3 > 15.0 → ConstructionMaterial
/// 4. otherwise                   → Unknown
///
/// Missing compounds read as 0.0.
pub fn classify(composition: &Composition) -> Classification {
    let pct = |name: &str| composition.get(name).copied().unwrap_or(0.0);

    if pct(compound::PERCHLORATE) > PERCHLORATE_LIMIT {
        Classification::Hazardous
    } else if pct(compound::WATER) > WATER_LIMIT {
        Classification::PotentiallyHabitable
    } else if pct(compound::SILICATE) > SILICATE_LIMIT && pct(compound::IRON_OXIDE) > IRON_OXIDE_LIMIT {
        Classification::ConstructionMaterial
    } else {
        Classification::Unknown
    }
}

/// Score of an optional category; an unclassified sample is worth 0.
#[inline]
pub fn score_of(classification: Option<Classification>) -> i32 {
    classification.map_or(0, Classification::score)
}

/// Score of a free-form label; anything unrecognised is worth 0.
pub fn score_for_label(label: &str) -> i32 {
    score_of(Classification::from_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(pairs: &[(&str, f64)]) -> Composition {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn perchlorate_outranks_water() {
        let c = comp(&[("ClO4", 2.5), ("H2O", 9.0), ("SiO2", 45.0), ("Fe2O3", 20.0)]);
        assert_eq!(classify(&c), Classification::Hazardous);
    }

    #[test]
    fn water_outranks_construction() {
        let c = comp(&[("ClO4", 1.0), ("H2O", 5.01), ("SiO2", 45.0), ("Fe2O3", 20.0)]);
        assert_eq!(classify(&c), Classification::PotentiallyHabitable);
    }

    #[test]
    fn construction_needs_both_oxides() {
        let both = comp(&[("SiO2", 40.5), ("Fe2O3", 15.5)]);
        assert_eq!(classify(&both), Classification::ConstructionMaterial);
        let silicate_only = comp(&[("SiO2", 49.0), ("Fe2O3", 15.0)]);
        assert_eq!(classify(&silicate_only), Classification::Unknown);
        let iron_only = comp(&[("SiO2", 40.0), ("Fe2O3", 24.0)]);
        assert_eq!(classify(&iron_only), Classification::Unknown);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify(&comp(&[("ClO4", 2.0)])), Classification::Unknown);
        assert_eq!(classify(&comp(&[("H2O", 5.0)])), Classification::Unknown);
    }

    #[test]
    fn empty_composition_is_unknown() {
        assert_eq!(classify(&Composition::new()), Classification::Unknown);
    }

    #[test]
    fn score_table() {
        assert_eq!(Classification::Hazardous.score(), -10);
        assert_eq!(Classification::PotentiallyHabitable.score(), 10);
        assert_eq!(Classification::ConstructionMaterial.score(), 8);
        assert_eq!(Classification::Unknown.score(), 5);
        assert_eq!(score_of(None), 0);
    }

    #[test]
    fn score_is_deterministic() {
        for c in Classification::ALL {
            assert_eq!(c.score(), c.score());
            assert_eq!(score_of(Some(c)), c.score());
        }
    }

    #[test]
    fn labels_roundtrip_and_unknown_labels_score_zero() {
        for c in Classification::ALL {
            assert_eq!(Classification::from_label(c.label()), Some(c));
            assert_eq!(Classification::from_label(&format!("{c:?}")), Some(c));
        }
        assert_eq!(score_for_label("Potentially Habitable - Water Detected"), 10);
        assert_eq!(score_for_label("Radioactive"), 0);
        assert_eq!(score_for_label(""), 0);
    }
}
