//! The raw planning request as received at the pipeline boundary.

use serde::{Deserialize, Serialize};

/// A user's meal-planning request. Immutable, created at pipeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    /// Free-form natural-language description of dietary needs.
    pub raw_description: String,
    /// Caller-supplied identifier grouping related runs for memory recall.
    pub session_id: String,
}

impl UserRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(raw_description: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            raw_description: raw_description.into(),
            session_id: session_id.into(),
        }
    }
}
