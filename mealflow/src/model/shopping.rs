//! Shopping plan produced by the pricing step.

use serde::{Deserialize, Serialize};

/// Where an item's price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    /// Price resolved from the live price lookup.
    Live,
    /// Price lookup missed; a flat fallback estimate was used.
    Estimated,
}

/// One priced entry on the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Normalized ingredient name used for the lookup.
    pub name: String,
    /// Store category ("produce", "pantry", "dairy", ...).
    pub category: String,
    /// Aggregated quantity needed by the recipe.
    pub quantity: f64,
    /// Unit of the aggregated quantity.
    pub unit: String,
    /// Price for one purchase unit of this item.
    pub unit_price: f64,
    /// Provenance of the price.
    pub source: PriceSource,
}

/// The priced shopping list with budget analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingPlan {
    /// Priced items, one per aggregated ingredient.
    pub items: Vec<ShoppingItem>,
    /// Sum of unit prices across items.
    pub estimated_total_cost: f64,
    /// Currency code for all prices.
    pub currency: String,
    /// Budget the total was compared against, if one was configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    /// True when no budget is set or the total fits within it.
    pub within_budget: bool,
    /// Ingredient lines without a fixed quantity, excluded from costing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_for_costing: Vec<String>,
}

impl ShoppingPlan {
    /// Amount by which the total exceeds the budget (0 when within it).
    #[must_use]
    pub fn amount_over_budget(&self) -> f64 {
        self.budget
            .map_or(0.0, |b| (self.estimated_total_cost - b).max(0.0))
    }

    /// Remaining headroom under the budget (0 when over it).
    #[must_use]
    pub fn amount_under_budget(&self) -> f64 {
        self.budget
            .map_or(0.0, |b| (b - self.estimated_total_cost).max(0.0))
    }

    /// Names of items priced by the fallback estimate.
    #[must_use]
    pub fn estimated_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.source == PriceSource::Estimated)
            .map(|i| i.name.as_str())
            .collect()
    }
}
