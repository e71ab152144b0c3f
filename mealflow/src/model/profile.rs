//! Structured dietary profile produced by the preference step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user's dietary profile, extracted once per request and consumed
/// read-only by every later step.
///
/// Numeric targets are daily totals. Canonical `health_notes` values are
/// `low_sugar`, `low_sodium`, `high_protein`, `low_carb`, and
/// `heart_friendly`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    /// Diet type, e.g. "vegetarian", "vegan", "keto", "omnivore".
    pub diet_type: String,
    /// Daily calorie target in kcal.
    pub daily_calorie_target: u32,
    /// Daily protein target in grams.
    pub protein_target_g: u32,
    /// Daily carbohydrate target in grams.
    pub carb_target_g: u32,
    /// Daily fat target in grams.
    pub fat_target_g: u32,
    /// Meals eaten per day; per-meal targets divide by this.
    pub meals_per_day: u32,
    /// Food allergies, singular lowercase form ("peanut", "soy").
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub allergies: BTreeSet<String>,
    /// Disliked foods, singular lowercase form.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub dislikes: BTreeSet<String>,
    /// Canonical health precaution tags.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub health_notes: BTreeSet<String>,
}

impl Default for PreferenceProfile {
    /// Defaults applied when the description omits a value.
    fn default() -> Self {
        Self {
            diet_type: "omnivore".to_string(),
            daily_calorie_target: 2200,
            protein_target_g: 100,
            carb_target_g: 230,
            fat_target_g: 70,
            meals_per_day: 3,
            allergies: BTreeSet::new(),
            dislikes: BTreeSet::new(),
            health_notes: BTreeSet::new(),
        }
    }
}

impl PreferenceProfile {
    /// Returns true if the profile carries the given canonical health note.
    #[must_use]
    pub fn has_note(&self, note: &str) -> bool {
        self.health_notes.contains(note)
    }

    /// Returns true if an ingredient name matches any recorded allergy.
    #[must_use]
    pub fn is_allergic_to(&self, item: &str) -> bool {
        let lowered = item.to_lowercase();
        self.allergies.iter().any(|a| lowered.contains(a.as_str()))
    }

    /// Returns true if an ingredient name matches any recorded dislike.
    #[must_use]
    pub fn dislikes_item(&self, item: &str) -> bool {
        let lowered = item.to_lowercase();
        self.dislikes.iter().any(|d| lowered.contains(d.as_str()))
    }

    /// Validates the profile before admission into the pipeline state.
    pub fn validate(&self) -> Result<(), String> {
        if self.diet_type.trim().is_empty() {
            return Err("diet_type is empty".to_string());
        }
        if self.daily_calorie_target == 0 {
            return Err("daily_calorie_target must be positive".to_string());
        }
        if self.meals_per_day == 0 {
            return Err("meals_per_day must be positive".to_string());
        }
        Ok(())
    }
}
