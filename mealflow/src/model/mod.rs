//! Typed data contracts passed between pipeline steps.
//!
//! Every entity here is produced by exactly one step and consumed
//! read-only downstream; once attached to a [`PipelineResult`] it is
//! never mutated within the same run.

mod health;
mod profile;
mod recipe;
mod request;
mod result;
mod shopping;

pub use health::{HealthAnalysis, NutrientComparison};
pub use profile::PreferenceProfile;
pub use recipe::{Ingredient, Nutrient, Quantity, Recipe};
pub use request::UserRequest;
pub use result::{PipelineResult, PipelineStatus, StepName};
pub use shopping::{PriceSource, ShoppingItem, ShoppingPlan};
