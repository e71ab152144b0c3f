//! Pipeline orchestration: step ordering, retries, and outcome assembly.

mod orchestrator;
mod retry;


pub use orchestrator::MealPlanner;
pub use retry::{invoke_with_retry, RetryPolicy};
