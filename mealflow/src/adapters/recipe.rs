//! Catalog-backed recipe retrieval.

use super::StepAdapter;
use crate::errors::StepError;
use crate::model::{Ingredient, Nutrient, PreferenceProfile, Recipe, StepName};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A catalog entry: a recipe plus the diet types it suits.
#[derive(Debug, Clone)]
pub struct CatalogRecipe {
    /// Diet types this recipe is compatible with.
    pub diets: Vec<String>,
    /// The recipe itself.
    pub recipe: Recipe,
}

impl CatalogRecipe {
    /// Creates an entry.
    #[must_use]
    pub fn new(diets: &[&str], recipe: Recipe) -> Self {
        Self {
            diets: diets.iter().map(|d| (*d).to_string()).collect(),
            recipe,
        }
    }

    /// True when the recipe fits the profile's diet and avoids its
    /// allergens and dislikes. Omnivores accept any entry.
    fn suits(&self, profile: &PreferenceProfile) -> bool {
        let diet_ok = profile.diet_type == "omnivore"
            || self.diets.iter().any(|d| d == &profile.diet_type);
        diet_ok
            && !self.recipe.ingredients.iter().any(|ing| {
                profile.is_allergic_to(&ing.item) || profile.dislikes_item(&ing.item)
            })
    }
}

/// Retrieves the first catalog recipe compatible with the profile.
///
/// A remote implementation would issue a retrieval call instead; this
/// adapter keeps the selection rules local and deterministic.
#[derive(Debug)]
pub struct RecipeCatalog {
    entries: Vec<CatalogRecipe>,
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RecipeCatalog {
    /// Creates a catalog from explicit entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogRecipe>) -> Self {
        Self { entries }
    }

    /// The built-in catalog covering the common diet types.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            CatalogRecipe::new(&["vegetarian"], pasta_primavera()),
            CatalogRecipe::new(&["vegan", "vegetarian"], chickpea_curry()),
            CatalogRecipe::new(&["keto"], lemon_herb_chicken()),
        ])
    }
}

#[async_trait]
impl StepAdapter for RecipeCatalog {
    type Input = PreferenceProfile;
    type Output = Recipe;

    fn step(&self) -> StepName {
        StepName::Recipe
    }

    async fn invoke(&self, profile: PreferenceProfile) -> Result<Recipe, StepError> {
        let recipe = self
            .entries
            .iter()
            .find(|entry| entry.suits(&profile))
            .map(|entry| entry.recipe.clone())
            .ok_or_else(|| {
                StepError::permanent(format!(
                    "no recipe in catalog suits diet '{}' with the stated allergies and dislikes",
                    profile.diet_type
                ))
            })?;

        recipe.validate().map_err(StepError::permanent)?;
        tracing::debug!(recipe = %recipe.name, "selected recipe");
        Ok(recipe)
    }
}

fn pasta_primavera() -> Recipe {
    const MEDLEY: &str = "For the Vegetable Medley";
    const PASTA: &str = "For the Pasta and Sauce";
    Recipe {
        name: "Vegetarian Pasta Primavera".to_string(),
        description: "Pasta tossed with a medley of saut\u{e9}ed spring vegetables, olive oil, \
                      and fresh herbs."
            .to_string(),
        ingredients: vec![
            Ingredient::measured("red bell pepper, seeded and chopped", 1.0, "piece", MEDLEY),
            Ingredient::measured("yellow bell pepper, seeded and chopped", 1.0, "piece", MEDLEY),
            Ingredient::measured("broccoli florets", 1.0, "cup", MEDLEY),
            Ingredient::measured("sliced zucchini", 1.0, "cup", MEDLEY),
            Ingredient::measured("chopped red onion", 0.5, "cup", MEDLEY),
            Ingredient::measured("garlic, minced", 2.0, "clove", MEDLEY),
            Ingredient::measured("olive oil", 2.0, "tablespoon", MEDLEY),
            Ingredient::measured("pasta (penne, farfalle, or rotini)", 1.0, "pound", PASTA),
            Ingredient::measured("vegetable broth", 0.25, "cup", PASTA),
            Ingredient::measured("grated Parmesan cheese", 0.25, "cup", PASTA),
            Ingredient::measured("fresh basil, chopped", 2.0, "tablespoon", PASTA),
            Ingredient::unmeasured("salt and freshly ground black pepper to taste", PASTA),
        ],
        instructions: vec![
            "Cook the pasta in salted boiling water until al dente, about 10 minutes; reserve \
             half a cup of the cooking water."
                .to_string(),
            "Heat the olive oil in a large skillet and saut\u{e9} the garlic and onion until \
             fragrant, about 2 minutes."
                .to_string(),
            "Add the peppers, broccoli, and zucchini and cook until crisp-tender, 5 to 7 \
             minutes."
                .to_string(),
            "Toss the pasta with the vegetables, broth, and reserved cooking water; finish \
             with Parmesan, basil, salt, and pepper."
                .to_string(),
        ],
        estimated_nutrition: BTreeMap::from([
            (Nutrient::Calories, 520.0),
            (Nutrient::ProteinG, 18.0),
            (Nutrient::CarbsG, 78.0),
            (Nutrient::FatG, 16.0),
        ]),
    }
}

fn chickpea_curry() -> Recipe {
    const CURRY: &str = "For the Curry";
    const SERVING: &str = "For Serving";
    Recipe {
        name: "Coconut Chickpea Curry".to_string(),
        description: "Chickpeas simmered in a spiced coconut-tomato sauce, served over rice."
            .to_string(),
        ingredients: vec![
            Ingredient::measured("cooked chickpeas", 2.0, "cup", CURRY),
            Ingredient::measured("coconut milk", 1.0, "cup", CURRY),
            Ingredient::measured("chopped onion", 1.0, "cup", CURRY),
            Ingredient::measured("garlic, minced", 3.0, "clove", CURRY),
            Ingredient::measured("curry powder", 2.0, "tablespoon", CURRY),
            Ingredient::measured("diced tomatoes", 1.0, "cup", CURRY),
            Ingredient::measured("basmati rice", 1.5, "cup", SERVING),
            Ingredient::unmeasured("salt to taste", CURRY),
        ],
        instructions: vec![
            "Saut\u{e9} the onion and garlic until soft, about 4 minutes.".to_string(),
            "Stir in the curry powder, then add the tomatoes, chickpeas, and coconut milk."
                .to_string(),
            "Simmer for 15 minutes until thickened; season with salt.".to_string(),
            "Serve over cooked basmati rice.".to_string(),
        ],
        estimated_nutrition: BTreeMap::from([
            (Nutrient::Calories, 610.0),
            (Nutrient::ProteinG, 17.0),
            (Nutrient::CarbsG, 82.0),
            (Nutrient::FatG, 24.0),
        ]),
    }
}

fn lemon_herb_chicken() -> Recipe {
    const CHICKEN: &str = "For the Chicken";
    const SALAD: &str = "For the Salad";
    Recipe {
        name: "Lemon Herb Chicken with Greens".to_string(),
        description: "Pan-seared chicken breast with lemon, herbs, and a crisp green salad."
            .to_string(),
        ingredients: vec![
            Ingredient::measured("chicken breast", 1.0, "pound", CHICKEN),
            Ingredient::measured("olive oil", 2.0, "tablespoon", CHICKEN),
            Ingredient::measured("lemon, juiced", 1.0, "piece", CHICKEN),
            Ingredient::measured("fresh parsley, chopped", 1.0, "tablespoon", CHICKEN),
            Ingredient::measured("mixed greens", 4.0, "cup", SALAD),
            Ingredient::unmeasured("salt and black pepper to taste", CHICKEN),
        ],
        instructions: vec![
            "Season the chicken and sear in olive oil, 6 minutes per side.".to_string(),
            "Finish with lemon juice and parsley off the heat.".to_string(),
            "Slice and serve over the mixed greens.".to_string(),
        ],
        estimated_nutrition: BTreeMap::from([
            (Nutrient::Calories, 430.0),
            (Nutrient::ProteinG, 42.0),
            (Nutrient::CarbsG, 8.0),
            (Nutrient::FatG, 26.0),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn profile(diet: &str) -> PreferenceProfile {
        PreferenceProfile {
            diet_type: diet.to_string(),
            ..PreferenceProfile::default()
        }
    }

    #[tokio::test]
    async fn test_vegetarian_gets_primavera() {
        let recipe = RecipeCatalog::builtin()
            .invoke(profile("vegetarian"))
            .await
            .unwrap();
        assert_eq!(recipe.name, "Vegetarian Pasta Primavera");
    }

    #[tokio::test]
    async fn test_vegan_skips_dairy_recipe() {
        let recipe = RecipeCatalog::builtin()
            .invoke(profile("vegan"))
            .await
            .unwrap();
        assert_eq!(recipe.name, "Coconut Chickpea Curry");
    }

    #[tokio::test]
    async fn test_omnivore_accepts_first_entry() {
        let recipe = RecipeCatalog::builtin()
            .invoke(profile("omnivore"))
            .await
            .unwrap();
        assert_eq!(recipe.name, "Vegetarian Pasta Primavera");
    }

    #[tokio::test]
    async fn test_dislikes_rule_out_recipes() {
        let mut p = profile("vegetarian");
        p.dislikes = BTreeSet::from(["pasta".to_string()]);

        let recipe = RecipeCatalog::builtin().invoke(p).await.unwrap();
        assert_eq!(recipe.name, "Coconut Chickpea Curry");
    }

    #[tokio::test]
    async fn test_no_match_is_permanent_no_result() {
        let mut p = profile("keto");
        p.allergies = BTreeSet::from(["chicken".to_string()]);

        let err = RecipeCatalog::builtin().invoke(p).await.unwrap_err();
        assert!(err.is_permanent());
        assert!(err.to_string().contains("no recipe"));
    }
}
