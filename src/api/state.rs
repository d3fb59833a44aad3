//! Shared application state

use std::sync::Arc;

use crate::event_store::EventStore;

/// State handed to every request handler
pub struct AppState {
    /// The event store, constructed once at startup
    pub store: Arc<EventStore>,
}

impl AppState {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }
}
