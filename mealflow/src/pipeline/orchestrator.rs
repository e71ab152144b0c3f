//! The meal-planning orchestrator.

use super::{invoke_with_retry, RetryPolicy};
use crate::adapters::{
    DynStepAdapter, HealthAnalyzer, PreferenceExtractor, RecipeCatalog, ShoppingPlanner,
};
use crate::config::PipelineConfig;
use crate::memory::SessionMemoryStore;
use crate::model::{
    HealthAnalysis, PipelineResult, PreferenceProfile, Recipe, ShoppingPlan, StepName, UserRequest,
};
use std::sync::Arc;

/// Runs the four-step pipeline for one request at a time.
///
/// Preference and recipe are strict prerequisites: if either is lost,
/// the run fails and the later steps are never invoked. Shopping and
/// health only depend on the recipe (and profile), so they run
/// concurrently and fail independently; losing one of them degrades the
/// run to partial instead of sinking it.
#[derive(Debug)]
pub struct MealPlanner {
    preference: DynStepAdapter<UserRequest, PreferenceProfile>,
    recipe: DynStepAdapter<PreferenceProfile, Recipe>,
    shopping: DynStepAdapter<Recipe, ShoppingPlan>,
    health: DynStepAdapter<(PreferenceProfile, Recipe), HealthAnalysis>,
    retry: RetryPolicy,
    memory: Arc<SessionMemoryStore>,
}

impl MealPlanner {
    /// Creates a planner from explicit adapters, with the default retry
    /// schedule and a fresh memory store.
    #[must_use]
    pub fn new(
        preference: DynStepAdapter<UserRequest, PreferenceProfile>,
        recipe: DynStepAdapter<PreferenceProfile, Recipe>,
        shopping: DynStepAdapter<Recipe, ShoppingPlan>,
        health: DynStepAdapter<(PreferenceProfile, Recipe), HealthAnalysis>,
    ) -> Self {
        Self {
            preference,
            recipe,
            shopping,
            health,
            retry: RetryPolicy::default(),
            memory: Arc::new(SessionMemoryStore::new()),
        }
    }

    /// Creates a planner over the built-in adapters.
    #[must_use]
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(
            Arc::new(PreferenceExtractor::new()),
            Arc::new(RecipeCatalog::builtin()),
            Arc::new(ShoppingPlanner::new(
                config.currency.clone(),
                config.budget,
            )),
            Arc::new(HealthAnalyzer::new()),
        )
        .with_retry_policy(config.retry)
    }

    /// Sets the retry schedule applied to every step.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Shares an existing memory store, e.g. across planners.
    #[must_use]
    pub fn with_memory(mut self, memory: Arc<SessionMemoryStore>) -> Self {
        self.memory = memory;
        self
    }

    /// The planner's memory store.
    #[must_use]
    pub fn memory(&self) -> &Arc<SessionMemoryStore> {
        &self.memory
    }

    /// Runs the pipeline for one request and remembers the outcome.
    ///
    /// Never returns an error: failures are encoded in the result's
    /// `status`, `failed_step`, and `error` fields. Failed runs are not
    /// appended to memory; complete and partial runs are.
    pub async fn run_pipeline(&self, raw_description: &str, session_id: &str) -> PipelineResult {
        let request = UserRequest::new(raw_description, session_id);
        tracing::info!(session_id = %request.session_id, "starting pipeline run");

        let result = self.execute(request).await;
        if result.is_usable() {
            self.memory.append(result.clone());
        }
        tracing::info!(
            session_id = %result.request.session_id,
            status = %result.status,
            "pipeline run finished"
        );
        result
    }

    async fn execute(&self, request: UserRequest) -> PipelineResult {
        let mut result = PipelineResult::new(request.clone());

        let profile =
            match invoke_with_retry(&self.retry, self.preference.as_ref(), request).await {
                Ok(profile) => profile,
                Err(failure) => return result.failed(StepName::Preference, failure.to_string()),
            };
        result = result.with_profile(profile.clone());

        let recipe =
            match invoke_with_retry(&self.retry, self.recipe.as_ref(), profile.clone()).await {
                Ok(recipe) => recipe,
                Err(failure) => return result.failed(StepName::Recipe, failure.to_string()),
            };
        result = result.with_recipe(recipe.clone());

        let (shopping, health) = tokio::join!(
            invoke_with_retry(&self.retry, self.shopping.as_ref(), recipe.clone()),
            invoke_with_retry(&self.retry, self.health.as_ref(), (profile, recipe)),
        );

        match (shopping, health) {
            (Ok(plan), Ok(analysis)) => result
                .with_shopping_plan(plan)
                .with_health_analysis(analysis),
            (Err(failure), Ok(analysis)) => result
                .with_health_analysis(analysis)
                .partial(StepName::Shopping, failure.to_string()),
            (Ok(plan), Err(failure)) => result
                .with_shopping_plan(plan)
                .partial(StepName::Health, failure.to_string()),
            (Err(shopping_failure), Err(health_failure)) => result.failed(
                StepName::Shopping,
                format!("shopping: {shopping_failure}; health: {health_failure}"),
            ),
        }
    }
}
