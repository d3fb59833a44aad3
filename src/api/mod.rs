//! API module for HTTP endpoints
//!
//! This module provides the REST API over the event store and serves the
//! front-end bundle.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
