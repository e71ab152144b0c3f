//! Rule-based preference extraction from free-form descriptions.

use super::StepAdapter;
use crate::errors::StepError;
use crate::model::{PreferenceProfile, StepName, UserRequest};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeSet;

#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

/// Extracts a [`PreferenceProfile`] from the user's natural-language
/// description.
///
/// Mirrors the extraction contract of the original preference agent:
/// diet keyword detection, numeric daily targets, allergy and dislike
/// phrase capture, and canonical health-note tags. Fields the
/// description does not state fall back to the profile defaults.
#[derive(Debug)]
pub struct PreferenceExtractor {
    calories: Regex,
    protein: Regex,
    carbs: Regex,
    fat: Regex,
    meals: Regex,
    allergies: Regex,
    dislikes: Regex,
}

impl Default for PreferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceExtractor {
    /// Creates the extractor with its compiled patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calories: pattern(r"(?i)(\d{3,5})\s*(?:k?cal\b|calories?\b)"),
            protein: pattern(
                r"(?i)(?:(\d{1,3})\s*g(?:rams)?\s+(?:of\s+)?protein|protein\W{0,3}(\d{1,3})\s*g)",
            ),
            carbs: pattern(
                r"(?i)(?:(\d{1,3})\s*g(?:rams)?\s+(?:of\s+)?carb(?:s|ohydrates)?|carb(?:s|ohydrates)?\W{0,3}(\d{1,3})\s*g)",
            ),
            fat: pattern(
                r"(?i)(?:(\d{1,3})\s*g(?:rams)?\s+(?:of\s+)?(?:healthy\s+)?fats?|fats?\W{0,3}(\d{1,3})\s*g)",
            ),
            meals: pattern(r"(?i)(\d{1,2})\s*meals"),
            allergies: pattern(r"(?i)allergic\s+to\s+([^.;\n]+)"),
            dislikes: pattern(r"(?i)(?:do\s*n.?t\s+like|dislikes?)\s+([^.;\n]+)"),
        }
    }

    /// First participating numeric capture group, if any.
    fn first_number(re: &Regex, text: &str) -> Option<u32> {
        re.captures(text)?
            .iter()
            .skip(1)
            .flatten()
            .next()
            .and_then(|m| m.as_str().parse().ok())
    }

    fn diet_type(text: &str) -> Option<&'static str> {
        // "non-veg" must win over the bare "vegetarian" substring.
        if text.contains("non-veg") || text.contains("omnivore") {
            Some("omnivore")
        } else if text.contains("vegan") {
            Some("vegan")
        } else if text.contains("vegetarian") || text.contains("veggie") {
            Some("vegetarian")
        } else if text.contains("keto") {
            Some("keto")
        } else {
            None
        }
    }

    /// Splits a captured phrase like "peanuts and soy" into singular
    /// lowercase items. Trailing clauses introduced by another verb
    /// ("and don't like mushrooms") are not part of the list.
    fn split_items(segment: &str) -> BTreeSet<String> {
        segment
            .split(',')
            .flat_map(|chunk| chunk.split(" and "))
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty() && !chunk.contains("like"))
            .map(|chunk| Self::singularize(&chunk.to_lowercase()))
            .collect()
    }

    fn singularize(word: &str) -> String {
        if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
            word[..word.len() - 1].to_string()
        } else {
            word.to_string()
        }
    }

    /// Canonical health-note tags recognized downstream.
    fn health_notes(text: &str) -> BTreeSet<String> {
        let mut notes = BTreeSet::new();
        if text.contains("diabet") || text.contains("low sugar") || text.contains("no sugar") {
            notes.insert("low_sugar".to_string());
        }
        if text.contains("blood pressure")
            || text.contains("hypertension")
            || text.contains("sodium")
            || text.contains("salt")
        {
            notes.insert("low_sodium".to_string());
        }
        if text.contains("muscle") || text.contains("high protein") {
            notes.insert("high_protein".to_string());
        }
        if text.contains("keto") || text.contains("low carb") {
            notes.insert("low_carb".to_string());
        }
        if text.contains("heart") {
            notes.insert("heart_friendly".to_string());
        }
        notes
    }

    fn extract(&self, description: &str) -> PreferenceProfile {
        let lowered = description.to_lowercase();
        let mut profile = PreferenceProfile::default();

        if let Some(diet) = Self::diet_type(&lowered) {
            profile.diet_type = diet.to_string();
        }
        if let Some(n) = Self::first_number(&self.calories, description) {
            profile.daily_calorie_target = n;
        }
        if let Some(n) = Self::first_number(&self.protein, description) {
            profile.protein_target_g = n;
        }
        if let Some(n) = Self::first_number(&self.carbs, description) {
            profile.carb_target_g = n;
        }
        if let Some(n) = Self::first_number(&self.fat, description) {
            profile.fat_target_g = n;
        }
        if let Some(n) = Self::first_number(&self.meals, description) {
            profile.meals_per_day = n;
        }
        if let Some(caps) = self.allergies.captures(description) {
            profile.allergies = Self::split_items(&caps[1]);
        }
        if let Some(caps) = self.dislikes.captures(description) {
            profile.dislikes = Self::split_items(&caps[1]);
        }
        profile.health_notes = Self::health_notes(&lowered);

        profile
    }
}

#[async_trait]
impl StepAdapter for PreferenceExtractor {
    type Input = UserRequest;
    type Output = PreferenceProfile;

    fn step(&self) -> StepName {
        StepName::Preference
    }

    async fn invoke(&self, input: UserRequest) -> Result<PreferenceProfile, StepError> {
        if input.raw_description.trim().is_empty() {
            return Err(StepError::permanent("empty preference description"));
        }

        let profile = self.extract(&input.raw_description);
        profile.validate().map_err(StepError::permanent)?;
        tracing::debug!(
            diet_type = %profile.diet_type,
            allergies = profile.allergies.len(),
            "extracted preference profile"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(description: &str) -> PreferenceProfile {
        PreferenceExtractor::new()
            .invoke(UserRequest::new(description, "s"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_extracts_compact_description() {
        let profile =
            extract("vegetarian, 2000 calories, 120g protein, allergic to peanuts").await;

        assert_eq!(profile.diet_type, "vegetarian");
        assert_eq!(profile.daily_calorie_target, 2000);
        assert_eq!(profile.protein_target_g, 120);
        assert_eq!(profile.allergies, BTreeSet::from(["peanut".to_string()]));
    }

    #[tokio::test]
    async fn test_extracts_long_description() {
        let profile = extract(
            "I'm vegetarian and need 2200 calories per day with high protein (120g). \
             I want to gain muscle, so I need healthy fats (60g). I eat 3 meals a day. \
             I'm allergic to peanuts and don't like mushrooms. \
             I have diabetes so I need low sugar meals.",
        )
        .await;

        assert_eq!(profile.diet_type, "vegetarian");
        assert_eq!(profile.daily_calorie_target, 2200);
        assert_eq!(profile.protein_target_g, 120);
        assert_eq!(profile.fat_target_g, 60);
        assert_eq!(profile.meals_per_day, 3);
        assert_eq!(profile.allergies, BTreeSet::from(["peanut".to_string()]));
        assert_eq!(profile.dislikes, BTreeSet::from(["mushroom".to_string()]));
        assert!(profile.has_note("low_sugar"));
        assert!(profile.has_note("high_protein"));
    }

    #[tokio::test]
    async fn test_unstated_fields_use_defaults() {
        let profile = extract("just something tasty please").await;
        let defaults = PreferenceProfile::default();

        assert_eq!(profile.diet_type, defaults.diet_type);
        assert_eq!(profile.daily_calorie_target, defaults.daily_calorie_target);
        assert_eq!(profile.meals_per_day, defaults.meals_per_day);
        assert!(profile.allergies.is_empty());
    }

    #[tokio::test]
    async fn test_non_veg_is_omnivore() {
        let profile = extract("non-vegetarian, 2500 kcal").await;
        assert_eq!(profile.diet_type, "omnivore");
        assert_eq!(profile.daily_calorie_target, 2500);
    }

    #[tokio::test]
    async fn test_keto_sets_diet_and_note() {
        let profile = extract("keto diet, 1800 calories").await;
        assert_eq!(profile.diet_type, "keto");
        assert!(profile.has_note("low_carb"));
    }

    #[tokio::test]
    async fn test_empty_description_is_permanent() {
        let err = PreferenceExtractor::new()
            .invoke(UserRequest::new("   ", "s"))
            .await
            .unwrap_err();
        assert!(err.is_permanent());
    }
}
