//! Ingredient pricing and budget analysis.

use super::StepAdapter;
use crate::errors::StepError;
use crate::model::{PriceSource, Recipe, ShoppingItem, ShoppingPlan, StepName};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Flat price used when the price book has no entry for an item.
const FALLBACK_PRICE: f64 = 50.0;

/// Descriptive prefixes stripped during name normalization.
const PREP_PREFIXES: [&str; 5] = ["fresh ", "grated ", "chopped ", "sliced ", "minced "];

/// Normalizes an ingredient description for price lookup:
/// `"red bell pepper, seeded and chopped"` becomes `"red bell pepper"`.
#[must_use]
pub fn normalize_item_name(name: &str) -> String {
    let mut name = name.to_lowercase();
    if let Some((head, _)) = name.split_once(',') {
        name = head.trim().to_string();
    }
    let mut stripped = name.trim();
    loop {
        let before = stripped;
        for prefix in PREP_PREFIXES {
            if let Some(rest) = stripped.strip_prefix(prefix) {
                stripped = rest;
            }
        }
        if stripped == before {
            break;
        }
    }

    let synonyms: [(&str, &str); 8] = [
        ("broccoli", "broccoli"),
        ("zucchini", "zucchini"),
        ("mushroom", "mushrooms"),
        ("onion", "onion"),
        ("pasta", "pasta"),
        ("penne", "pasta"),
        ("parmesan", "parmesan cheese"),
        ("olive oil", "olive oil"),
    ];
    for (key, canonical) in synonyms {
        if stripped.contains(key) {
            return (*canonical).to_string();
        }
    }
    stripped.to_string()
}

/// Prices recipe ingredients from an in-process price book and compares
/// the total against a configured budget.
///
/// Plays the role of the original live store lookup: book hits are
/// `Live` prices, misses fall back to a flat `Estimated` price so every
/// aggregated item contributes to the total.
#[derive(Debug)]
pub struct ShoppingPlanner {
    currency: String,
    budget: Option<f64>,
    prices: BTreeMap<String, (String, f64)>,
}

impl Default for ShoppingPlanner {
    fn default() -> Self {
        Self::new("INR", Some(500.0))
    }
}

impl ShoppingPlanner {
    /// Creates a planner with the built-in price book.
    #[must_use]
    pub fn new(currency: impl Into<String>, budget: Option<f64>) -> Self {
        Self {
            currency: currency.into(),
            budget,
            prices: builtin_price_book(),
        }
    }

    /// Adds or overrides one price-book entry.
    #[must_use]
    pub fn with_price(
        mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        self.prices
            .insert(name.into(), (category.into(), unit_price));
        self
    }

    /// Aggregates quantities by normalized name, preserving first-seen
    /// order. Quantities only sum when the units agree.
    fn aggregate(recipe: &Recipe) -> (Vec<(String, f64, String)>, Vec<String>) {
        let mut order: Vec<String> = Vec::new();
        let mut agg: BTreeMap<String, (f64, String)> = BTreeMap::new();
        let mut skipped = Vec::new();

        for ingredient in &recipe.ingredients {
            let Some(quantity) = &ingredient.quantity else {
                skipped.push(ingredient.item.clone());
                continue;
            };
            let key = normalize_item_name(&ingredient.item);
            match agg.get_mut(&key) {
                Some((amount, unit)) => {
                    if *unit == quantity.unit {
                        *amount += quantity.amount;
                    }
                }
                None => {
                    order.push(key.clone());
                    agg.insert(key, (quantity.amount, quantity.unit.clone()));
                }
            }
        }

        let items = order
            .into_iter()
            .filter_map(|key| {
                agg.get(&key)
                    .map(|(amount, unit)| (key.clone(), *amount, unit.clone()))
            })
            .collect();
        (items, skipped)
    }
}

#[async_trait]
impl StepAdapter for ShoppingPlanner {
    type Input = Recipe;
    type Output = ShoppingPlan;

    fn step(&self) -> StepName {
        StepName::Shopping
    }

    async fn invoke(&self, recipe: Recipe) -> Result<ShoppingPlan, StepError> {
        recipe.validate().map_err(StepError::permanent)?;

        let (aggregated, skipped_for_costing) = Self::aggregate(&recipe);
        let mut items = Vec::with_capacity(aggregated.len());
        let mut total = 0.0;

        for (name, quantity, unit) in aggregated {
            let (category, unit_price, source) = match self.prices.get(&name) {
                Some((category, price)) => (category.clone(), *price, PriceSource::Live),
                None => (
                    "uncategorized".to_string(),
                    FALLBACK_PRICE,
                    PriceSource::Estimated,
                ),
            };
            // One purchase unit per aggregated item, matching the
            // original costing model.
            total += unit_price;
            items.push(ShoppingItem {
                name,
                category,
                quantity,
                unit,
                unit_price,
                source,
            });
        }

        let total = (total * 100.0).round() / 100.0;
        let within_budget = self.budget.map_or(true, |b| total <= b);
        tracing::debug!(
            items = items.len(),
            total,
            within_budget,
            "priced shopping list"
        );

        Ok(ShoppingPlan {
            items,
            estimated_total_cost: total,
            currency: self.currency.clone(),
            budget: self.budget,
            within_budget,
            skipped_for_costing,
        })
    }
}

fn builtin_price_book() -> BTreeMap<String, (String, f64)> {
    let entries: [(&str, &str, f64); 20] = [
        ("red bell pepper", "produce", 40.0),
        ("yellow bell pepper", "produce", 45.0),
        ("broccoli", "produce", 55.0),
        ("zucchini", "produce", 35.0),
        ("mushrooms", "produce", 60.0),
        ("onion", "produce", 30.0),
        ("garlic", "produce", 25.0),
        ("lemon", "produce", 15.0),
        ("mixed greens", "produce", 50.0),
        ("diced tomatoes", "produce", 40.0),
        ("olive oil", "pantry", 180.0),
        ("pasta", "pantry", 90.0),
        ("vegetable broth", "pantry", 70.0),
        ("curry powder", "pantry", 65.0),
        ("basmati rice", "pantry", 85.0),
        ("cooked chickpeas", "pantry", 60.0),
        ("coconut milk", "pantry", 75.0),
        ("parmesan cheese", "dairy", 250.0),
        ("basil", "produce", 30.0),
        ("chicken breast", "meat", 220.0),
    ];
    entries
        .into_iter()
        .map(|(name, category, price)| (name.to_string(), (category.to_string(), price)))
        .collect()
}
