//! # Mealflow
//!
//! A sequential meal-planning pipeline that chains four independent
//! reasoning/lookup steps into one coherent result per user request:
//!
//! 1. **Preference** — extract a structured dietary profile from a
//!    free-form description
//! 2. **Recipe** — retrieve a recipe compatible with the profile
//! 3. **Shopping** — price the recipe's ingredients against a budget
//! 4. **Health** — compare the recipe's nutrition to the user's targets
//!
//! The crate owns step ordering, inter-step data contracts,
//! partial-failure handling, retry/backoff for flaky upstream calls, and
//! a volatile per-session memory of prior runs. The steps themselves are
//! [`adapters::StepAdapter`] implementations; the in-process reference
//! adapters can be swapped for remote collaborators without touching the
//! orchestration.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mealflow::prelude::*;
//!
//! let planner = MealPlanner::from_config(&PipelineConfig::default());
//! let result = planner
//!     .run_pipeline("vegetarian, 2000 calories, 120g protein", "session-1")
//!     .await;
//! assert!(result.is_complete());
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss
)]

pub mod adapters;
pub mod config;
pub mod errors;
pub mod memory;
pub mod model;
pub mod observability;
pub mod pipeline;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::{
        DynStepAdapter, HealthAnalyzer, PreferenceExtractor, RecipeCatalog, ShoppingPlanner,
        StepAdapter,
    };
    pub use crate::config::PipelineConfig;
    pub use crate::errors::{StepError, StepFailure};
    pub use crate::memory::{MemoryFilter, MemoryRecord, MemoryStats, SessionMemoryStore};
    pub use crate::model::{
        HealthAnalysis, Ingredient, Nutrient, NutrientComparison, PipelineResult, PipelineStatus,
        PreferenceProfile, PriceSource, Quantity, Recipe, ShoppingItem, ShoppingPlan, StepName,
        UserRequest,
    };
    pub use crate::pipeline::{invoke_with_retry, MealPlanner, RetryPolicy};
}
