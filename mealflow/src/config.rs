//! Pipeline configuration.

use crate::pipeline::RetryPolicy;

/// Knobs for building a [`crate::pipeline::MealPlanner`] from the
/// built-in adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Retry schedule applied to every step.
    pub retry: RetryPolicy,
    /// Currency code for shopping totals.
    pub currency: String,
    /// Shopping budget; `None` disables the budget comparison.
    pub budget: Option<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            currency: "INR".to_string(),
            budget: Some(500.0),
        }
    }
}

impl PipelineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry schedule.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the shopping currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets or clears the shopping budget.
    #[must_use]
    pub fn with_budget(mut self, budget: Option<f64>) -> Self {
        self.budget = budget;
        self
    }
}
