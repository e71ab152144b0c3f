//! Recipe entity produced by the retrieval step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Nutrients tracked across recipe estimates and health targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    /// Energy in kcal.
    Calories,
    /// Protein in grams.
    ProteinG,
    /// Carbohydrates in grams.
    CarbsG,
    /// Fat in grams.
    FatG,
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calories => write!(f, "calories"),
            Self::ProteinG => write!(f, "protein_g"),
            Self::CarbsG => write!(f, "carbs_g"),
            Self::FatG => write!(f, "fat_g"),
        }
    }
}

impl Nutrient {
    /// All tracked nutrients, in display order.
    pub const ALL: [Self; 4] = [Self::Calories, Self::ProteinG, Self::CarbsG, Self::FatG];
}

/// An amount with its unit, e.g. `2.0 tablespoons`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric amount.
    pub amount: f64,
    /// Unit name ("cup", "tablespoon", "piece", ...).
    pub unit: String,
}

impl Quantity {
    /// Creates a new quantity.
    #[must_use]
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }
}

/// One recipe ingredient with the preparation stage it belongs to.
///
/// A missing quantity models "to taste" lines; the shopping step records
/// such lines as skipped for costing rather than dropping them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name as written in the recipe.
    pub item: String,
    /// Amount needed, when the recipe states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    /// Preparation stage this ingredient belongs to
    /// (e.g. "For the Vegetable Medley").
    pub stage: String,
}

impl Ingredient {
    /// Creates an unmeasured ingredient ("salt to taste").
    #[must_use]
    pub fn unmeasured(item: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: None,
            stage: stage.into(),
        }
    }

    /// Creates a measured ingredient.
    #[must_use]
    pub fn measured(
        item: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            quantity: Some(Quantity::new(amount, unit)),
            stage: stage.into(),
        }
    }
}

/// A retrieved recipe with instructions and per-serving nutrition
/// estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe name.
    pub name: String,
    /// Short description of the dish.
    #[serde(default)]
    pub description: String,
    /// Ordered ingredient list, grouped by preparation stage.
    pub ingredients: Vec<Ingredient>,
    /// Ordered preparation steps.
    pub instructions: Vec<String>,
    /// Estimated per-serving nutrition.
    pub estimated_nutrition: BTreeMap<Nutrient, f64>,
}

impl Recipe {
    /// Returns the estimate for one nutrient, if present.
    #[must_use]
    pub fn nutrition(&self, nutrient: Nutrient) -> Option<f64> {
        self.estimated_nutrition.get(&nutrient).copied()
    }

    /// Validates the recipe before admission into the pipeline state.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("recipe name is empty".to_string());
        }
        if self.ingredients.is_empty() {
            return Err("recipe has no ingredients".to_string());
        }
        if self.instructions.is_empty() {
            return Err("recipe has no instructions".to_string());
        }
        Ok(())
    }
}
