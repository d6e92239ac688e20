//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::db::BookStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Record store, built once at startup and never replaced
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
