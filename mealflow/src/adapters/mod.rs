//! Step adapters: the uniform boundary around each external collaborator.
//!
//! Each of the four pipeline steps is a [`StepAdapter`] implementation.
//! Adapters are pure from the orchestrator's perspective: everything an
//! invocation depends on is passed through `Input`, and the only side
//! effect is the external call itself. The in-process reference adapters
//! in this module reproduce the deterministic logic of the original
//! agents; remote implementations should run their loosely-typed
//! payloads through [`decode_payload`] before returning.

mod health;
mod preference;
mod recipe;
mod shopping;

pub use health::HealthAnalyzer;
pub use preference::PreferenceExtractor;
pub use recipe::{CatalogRecipe, RecipeCatalog};
pub use shopping::ShoppingPlanner;

use crate::errors::StepError;
use crate::model::StepName;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::Arc;

/// Uniform invocation contract for one pipeline step.
#[async_trait]
pub trait StepAdapter: Send + Sync + Debug {
    /// Input assembled by the orchestrator from prior step outputs.
    type Input: Clone + Send + Sync + 'static;
    /// Validated output admitted into the pipeline state.
    type Output: Send + Sync + 'static;

    /// Which step slot this adapter fills.
    fn step(&self) -> StepName;

    /// Performs one invocation of the underlying collaborator.
    ///
    /// Returns [`StepError::Transient`] for failures worth retrying and
    /// [`StepError::Permanent`] for failures retrying cannot fix.
    async fn invoke(&self, input: Self::Input) -> Result<Self::Output, StepError>;
}

/// Shared trait object filling one step slot.
pub type DynStepAdapter<I, O> = Arc<dyn StepAdapter<Input = I, Output = O>>;

/// Strips Markdown ```json fences that reasoning services wrap around
/// their payloads.
fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    for fence in ["```json", "```"] {
        if let Some(rest) = trimmed.strip_prefix(fence) {
            if let Some(body) = rest.strip_suffix("```") {
                return body.trim();
            }
        }
    }
    trimmed
}

/// Validate-or-reject gate for loosely-typed step payloads.
///
/// Remote adapters receive free-form text from reasoning services; this
/// decodes it into the step's typed output, treating any schema mismatch
/// as a permanent failure at the adapter boundary.
pub fn decode_payload<T: DeserializeOwned>(step: StepName, payload: &str) -> Result<T, StepError> {
    serde_json::from_str(strip_code_fences(payload))
        .map_err(|e| StepError::permanent(format!("{step} payload failed validation: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PreferenceProfile;

    #[test]
    fn test_decode_payload_plain_json() {
        let payload = r#"{"diet_type":"vegan","daily_calorie_target":2000,
            "protein_target_g":90,"carb_target_g":220,"fat_target_g":60,
            "meals_per_day":3}"#;
        let profile: PreferenceProfile =
            decode_payload(StepName::Preference, payload).unwrap();
        assert_eq!(profile.diet_type, "vegan");
        assert!(profile.allergies.is_empty());
    }

    #[test]
    fn test_decode_payload_strips_fences() {
        let payload = "```json\n{\"diet_type\":\"keto\",\"daily_calorie_target\":1800,\
            \"protein_target_g\":120,\"carb_target_g\":40,\"fat_target_g\":130,\
            \"meals_per_day\":2}\n```";
        let profile: PreferenceProfile =
            decode_payload(StepName::Preference, payload).unwrap();
        assert_eq!(profile.diet_type, "keto");
    }

    #[test]
    fn test_decode_payload_rejects_malformed() {
        let err = decode_payload::<PreferenceProfile>(StepName::Preference, "not json")
            .unwrap_err();
        assert!(err.is_permanent());
        assert!(err.to_string().contains("preference payload failed validation"));
    }
}
