//! Accumulating pipeline state and run outcome.

use super::{HealthAnalysis, PreferenceProfile, Recipe, ShoppingPlan, UserRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    /// Preference extraction from the raw description.
    Preference,
    /// Recipe retrieval from the profile.
    Recipe,
    /// Shopping-list pricing from the recipe.
    Shopping,
    /// Nutrition analysis from the recipe and profile.
    Health,
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preference => write!(f, "preference"),
            Self::Recipe => write!(f, "recipe"),
            Self::Shopping => write!(f, "shopping"),
            Self::Health => write!(f, "health"),
        }
    }
}

/// Overall outcome of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// All four steps produced output.
    Complete,
    /// Exactly one of the co-scheduled shopping/health pair failed; the
    /// prerequisite chain completed and the run is still useful.
    Partial,
    /// A prerequisite step failed, or both co-scheduled steps failed.
    Failed,
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Partial => write!(f, "partial"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// The accumulating record of one pipeline run.
///
/// Output fields are populated progressively as steps succeed and are
/// never overwritten or cleared within the same run (guarded in debug
/// builds). `status` and `failed_step` make partial completion
/// observable instead of silent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// The originating request.
    pub request: UserRequest,
    /// Output of the preference step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<PreferenceProfile>,
    /// Output of the recipe step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<Recipe>,
    /// Output of the shopping step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_plan: Option<ShoppingPlan>,
    /// Output of the health step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_analysis: Option<HealthAnalysis>,
    /// Run outcome.
    pub status: PipelineStatus,
    /// The step that failed, for partial and failed runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<StepName>,
    /// Human-readable failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResult {
    /// Creates an empty result for a fresh run.
    #[must_use]
    pub fn new(request: UserRequest) -> Self {
        Self {
            request,
            profile: None,
            recipe: None,
            shopping_plan: None,
            health_analysis: None,
            status: PipelineStatus::Complete,
            failed_step: None,
            error: None,
        }
    }

    /// Attaches the preference step's output.
    #[must_use]
    pub fn with_profile(mut self, profile: PreferenceProfile) -> Self {
        debug_assert!(self.profile.is_none(), "profile set twice");
        self.profile = Some(profile);
        self
    }

    /// Attaches the recipe step's output.
    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        debug_assert!(self.recipe.is_none(), "recipe set twice");
        self.recipe = Some(recipe);
        self
    }

    /// Attaches the shopping step's output.
    #[must_use]
    pub fn with_shopping_plan(mut self, plan: ShoppingPlan) -> Self {
        debug_assert!(self.shopping_plan.is_none(), "shopping plan set twice");
        self.shopping_plan = Some(plan);
        self
    }

    /// Attaches the health step's output.
    #[must_use]
    pub fn with_health_analysis(mut self, analysis: HealthAnalysis) -> Self {
        debug_assert!(self.health_analysis.is_none(), "health analysis set twice");
        self.health_analysis = Some(analysis);
        self
    }

    /// Marks the run as failed at `step`. Outputs obtained before the
    /// failure are kept.
    #[must_use]
    pub fn failed(mut self, step: StepName, error: impl Into<String>) -> Self {
        self.status = PipelineStatus::Failed;
        self.failed_step = Some(step);
        self.error = Some(error.into());
        self
    }

    /// Marks the run as partial: `missing` did not produce output but
    /// the prerequisite chain completed.
    #[must_use]
    pub fn partial(mut self, missing: StepName, error: impl Into<String>) -> Self {
        self.status = PipelineStatus::Partial;
        self.failed_step = Some(missing);
        self.error = Some(error.into());
        self
    }

    /// Returns true if every step produced output.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == PipelineStatus::Complete
    }

    /// Returns true if the run carries at least the prerequisite chain.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.status != PipelineStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserRequest {
        UserRequest::new("vegetarian", "session-1")
    }

    #[test]
    fn test_new_result_has_no_outputs() {
        let result = PipelineResult::new(request());
        assert!(result.profile.is_none());
        assert!(result.recipe.is_none());
        assert!(result.failed_step.is_none());
        assert!(result.is_complete());
    }

    #[test]
    fn test_failed_keeps_prior_outputs() {
        let result = PipelineResult::new(request())
            .with_profile(PreferenceProfile::default())
            .failed(StepName::Recipe, "no recipe found");

        assert_eq!(result.status, PipelineStatus::Failed);
        assert_eq!(result.failed_step, Some(StepName::Recipe));
        assert!(result.profile.is_some());
        assert!(!result.is_usable());
    }

    #[test]
    fn test_partial_is_usable() {
        let result = PipelineResult::new(request())
            .with_profile(PreferenceProfile::default())
            .partial(StepName::Shopping, "price service down");

        assert_eq!(result.status, PipelineStatus::Partial);
        assert!(result.is_usable());
    }

    #[test]
    fn test_step_name_serde() {
        assert_eq!(
            serde_json::to_string(&StepName::Shopping).unwrap(),
            r#""shopping""#
        );
        assert_eq!(
            serde_json::to_string(&PipelineStatus::Partial).unwrap(),
            r#""partial""#
        );
    }
}
