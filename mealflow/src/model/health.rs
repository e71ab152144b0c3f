//! Nutrition analysis produced by the health step.

use super::Nutrient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target versus actual for one nutrient, per meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientComparison {
    /// Per-meal target derived from the daily target.
    pub target: f64,
    /// Estimated amount in the recipe (0 when the recipe carries no
    /// estimate for this nutrient).
    pub actual: f64,
    /// `actual - target`; positive means the recipe runs over.
    pub delta: f64,
}

impl NutrientComparison {
    /// Creates a comparison, deriving the delta.
    #[must_use]
    pub fn new(target: f64, actual: f64) -> Self {
        Self {
            target,
            actual,
            delta: actual - target,
        }
    }
}

/// How the recipe measures up against the user's targets and precautions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAnalysis {
    /// Daily targets divided by meals per day.
    pub per_meal_targets: BTreeMap<Nutrient, f64>,
    /// Per-nutrient target/actual/delta breakdown.
    pub comparison: BTreeMap<Nutrient, NutrientComparison>,
    /// Guidance derived from the profile's health notes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    /// Warnings for ingredients matching recorded allergies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergy_warnings: Vec<String>,
}

impl HealthAnalysis {
    /// Returns true when no ingredient matched a recorded allergy.
    #[must_use]
    pub fn is_clear_of_allergens(&self) -> bool {
        self.allergy_warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_delta() {
        let c = NutrientComparison::new(666.0, 520.0);
        assert!((c.delta + 146.0).abs() < 1e-9);
    }

    #[test]
    fn test_allergen_clear() {
        let analysis = HealthAnalysis {
            per_meal_targets: BTreeMap::new(),
            comparison: BTreeMap::new(),
            recommendations: Vec::new(),
            allergy_warnings: Vec::new(),
        };
        assert!(analysis.is_clear_of_allergens());
    }
}
