//! Canned domain values for tests.

use crate::model::{
    HealthAnalysis, Ingredient, Nutrient, NutrientComparison, PreferenceProfile, PriceSource,
    Recipe, ShoppingItem, ShoppingPlan,
};
use std::collections::BTreeMap;

/// A vegetarian profile with the stock daily targets and no allergies.
#[must_use]
pub fn sample_profile() -> PreferenceProfile {
    PreferenceProfile {
        diet_type: "vegetarian".to_string(),
        ..PreferenceProfile::default()
    }
}

/// A compact pasta recipe: five priced ingredients and one "to taste"
/// line without a quantity.
#[must_use]
pub fn sample_recipe() -> Recipe {
    const STAGE: &str = "For the Pasta";
    Recipe {
        name: "Weeknight Pasta".to_string(),
        description: "Pasta with saut\u{e9}ed vegetables and Parmesan.".to_string(),
        ingredients: vec![
            Ingredient::measured("pasta (penne or fusilli)", 1.0, "pound", STAGE),
            Ingredient::measured("red bell pepper, chopped", 1.0, "piece", STAGE),
            Ingredient::measured("broccoli florets", 1.0, "cup", STAGE),
            Ingredient::measured("olive oil", 2.0, "tablespoon", STAGE),
            Ingredient::measured("grated Parmesan cheese", 0.25, "cup", STAGE),
            Ingredient::unmeasured("salt and black pepper to taste", STAGE),
        ],
        instructions: vec![
            "Cook the pasta until al dente.".to_string(),
            "Saut\u{e9} the vegetables in olive oil and toss with the pasta.".to_string(),
            "Finish with Parmesan, salt, and pepper.".to_string(),
        ],
        estimated_nutrition: BTreeMap::from([
            (Nutrient::Calories, 520.0),
            (Nutrient::ProteinG, 18.0),
            (Nutrient::CarbsG, 78.0),
            (Nutrient::FatG, 16.0),
        ]),
    }
}

/// A priced plan consistent with [`sample_recipe`] and the stock budget.
#[must_use]
pub fn sample_plan() -> ShoppingPlan {
    let items = vec![
        ShoppingItem {
            name: "pasta".to_string(),
            category: "pantry".to_string(),
            quantity: 1.0,
            unit: "pound".to_string(),
            unit_price: 90.0,
            source: PriceSource::Live,
        },
        ShoppingItem {
            name: "red bell pepper".to_string(),
            category: "produce".to_string(),
            quantity: 1.0,
            unit: "piece".to_string(),
            unit_price: 40.0,
            source: PriceSource::Live,
        },
        ShoppingItem {
            name: "olive oil".to_string(),
            category: "pantry".to_string(),
            quantity: 2.0,
            unit: "tablespoon".to_string(),
            unit_price: 180.0,
            source: PriceSource::Live,
        },
    ];
    let total = items.iter().map(|i| i.unit_price).sum();
    ShoppingPlan {
        items,
        estimated_total_cost: total,
        currency: "INR".to_string(),
        budget: Some(500.0),
        within_budget: true,
        skipped_for_costing: vec!["salt and black pepper to taste".to_string()],
    }
}

/// An analysis of [`sample_recipe`] against [`sample_profile`], three
/// meals a day.
#[must_use]
pub fn sample_analysis() -> HealthAnalysis {
    let profile = sample_profile();
    let recipe = sample_recipe();
    let meals = f64::from(profile.meals_per_day);
    let daily = [
        (Nutrient::Calories, f64::from(profile.daily_calorie_target)),
        (Nutrient::ProteinG, f64::from(profile.protein_target_g)),
        (Nutrient::CarbsG, f64::from(profile.carb_target_g)),
        (Nutrient::FatG, f64::from(profile.fat_target_g)),
    ];

    let mut per_meal_targets = BTreeMap::new();
    let mut comparison = BTreeMap::new();
    for (nutrient, target) in daily {
        let per_meal = target / meals;
        per_meal_targets.insert(nutrient, per_meal);
        comparison.insert(
            nutrient,
            NutrientComparison::new(per_meal, recipe.nutrition(nutrient).unwrap_or(0.0)),
        );
    }

    HealthAnalysis {
        per_meal_targets,
        comparison,
        recommendations: Vec::new(),
        allergy_warnings: Vec::new(),
    }
}
