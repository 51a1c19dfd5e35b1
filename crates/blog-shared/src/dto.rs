//! Data Transfer Objects - response bodies that are not rendered pages.

use serde::{Deserialize, Serialize};

/// Liveness probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    /// `"postgres"` or `"memory"`.
    pub store: String,
}
