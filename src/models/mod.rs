//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod record;

// Re-export commonly used types
pub use record::*;

use serde::Serialize;

/// Liveness document returned by `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn running() -> Self {
        Self {
            success: true,
            message: "Server is running fine.".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
