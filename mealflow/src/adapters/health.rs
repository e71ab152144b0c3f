//! Nutrition comparison against the user's profile.

use super::StepAdapter;
use crate::errors::StepError;
use crate::model::{
    HealthAnalysis, Nutrient, NutrientComparison, PreferenceProfile, Recipe, StepName,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Compares a recipe's estimated nutrition against per-meal targets
/// derived from the profile, and flags allergens and precautions.
#[derive(Debug, Default)]
pub struct HealthAnalyzer;

impl HealthAnalyzer {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn daily_target(profile: &PreferenceProfile, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => f64::from(profile.daily_calorie_target),
            Nutrient::ProteinG => f64::from(profile.protein_target_g),
            Nutrient::CarbsG => f64::from(profile.carb_target_g),
            Nutrient::FatG => f64::from(profile.fat_target_g),
        }
    }

    fn recommendations(profile: &PreferenceProfile) -> Vec<String> {
        let mut recs = Vec::new();
        if profile.has_note("low_sugar") {
            recs.push("Monitor sugar content; prefer natural sugars from fruit".to_string());
        }
        if profile.has_note("low_sodium") {
            recs.push("Limit sodium to under 2300mg per day".to_string());
        }
        if profile.has_note("high_protein") {
            recs.push(format!(
                "Target {}g protein daily",
                profile.protein_target_g
            ));
        }
        if profile.has_note("low_carb") {
            recs.push(format!(
                "Limit carbohydrates to {}g daily",
                profile.carb_target_g
            ));
        }
        if profile.has_note("heart_friendly") {
            recs.push("Favour unsaturated fats and whole grains".to_string());
        }
        recs
    }
}

#[async_trait]
impl StepAdapter for HealthAnalyzer {
    type Input = (PreferenceProfile, Recipe);
    type Output = HealthAnalysis;

    fn step(&self) -> StepName {
        StepName::Health
    }

    async fn invoke(
        &self,
        (profile, recipe): (PreferenceProfile, Recipe),
    ) -> Result<HealthAnalysis, StepError> {
        profile.validate().map_err(StepError::permanent)?;
        recipe.validate().map_err(StepError::permanent)?;

        let meals = f64::from(profile.meals_per_day);
        let mut per_meal_targets = BTreeMap::new();
        let mut comparison = BTreeMap::new();
        for nutrient in Nutrient::ALL {
            let target = Self::daily_target(&profile, nutrient) / meals;
            let actual = recipe.nutrition(nutrient).unwrap_or(0.0);
            per_meal_targets.insert(nutrient, target);
            comparison.insert(nutrient, NutrientComparison::new(target, actual));
        }

        let mut recommendations = Self::recommendations(&profile);
        if let Some(calories) = comparison.get(&Nutrient::Calories) {
            if calories.target > 0.0 && calories.delta > calories.target * 0.2 {
                recommendations.push(format!(
                    "Recipe runs {:.0} kcal over the per-meal target; consider a smaller portion",
                    calories.delta
                ));
            }
        }

        let allergy_warnings = recipe
            .ingredients
            .iter()
            .filter(|ing| profile.is_allergic_to(&ing.item))
            .map(|ing| format!("ingredient '{}' matches a stated allergy", ing.item))
            .collect();

        let analysis = HealthAnalysis {
            per_meal_targets,
            comparison,
            recommendations,
            allergy_warnings,
        };
        tracing::debug!(
            warnings = analysis.allergy_warnings.len(),
            "completed nutrition analysis"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{sample_profile, sample_recipe};
    use std::collections::BTreeSet;

    #[tokio::test]
    async fn test_per_meal_targets_divide_by_meals() {
        let profile = PreferenceProfile {
            daily_calorie_target: 2100,
            meals_per_day: 3,
            ..sample_profile()
        };

        let analysis = HealthAnalyzer::new()
            .invoke((profile, sample_recipe()))
            .await
            .unwrap();
        let target = analysis.per_meal_targets[&Nutrient::Calories];
        assert!((target - 700.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_comparison_delta_sign() {
        let analysis = HealthAnalyzer::new()
            .invoke((sample_profile(), sample_recipe()))
            .await
            .unwrap();

        let c = &analysis.comparison[&Nutrient::Calories];
        assert!((c.delta - (c.actual - c.target)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recommendations_follow_health_notes() {
        let mut profile = sample_profile();
        profile.health_notes =
            BTreeSet::from(["low_sugar".to_string(), "high_protein".to_string()]);

        let analysis = HealthAnalyzer::new()
            .invoke((profile.clone(), sample_recipe()))
            .await
            .unwrap();

        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("sugar")));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains(&format!("{}g protein", profile.protein_target_g))));
    }

    #[tokio::test]
    async fn test_allergy_warning_fires_on_matching_ingredient() {
        let mut profile = sample_profile();
        profile.allergies = BTreeSet::from(["pasta".to_string()]);

        let analysis = HealthAnalyzer::new()
            .invoke((profile, sample_recipe()))
            .await
            .unwrap();

        assert!(!analysis.is_clear_of_allergens());
        assert!(analysis.allergy_warnings[0].contains("pasta"));
    }

    #[tokio::test]
    async fn test_clean_profile_has_no_warnings() {
        let analysis = HealthAnalyzer::new()
            .invoke((sample_profile(), sample_recipe()))
            .await
            .unwrap();
        assert!(analysis.is_clear_of_allergens());
    }
}
