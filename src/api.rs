//! HTTP API
//!
//! All routes are `GET` with the topic as a path segment.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::registry::TopicRegistry;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TopicRegistry>,
}

impl AppState {
    pub fn new(registry: TopicRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}
