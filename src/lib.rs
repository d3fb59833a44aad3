//! Event Scheduler
//!
//! A calendar event scheduling server: clients create, read, update, delete,
//! filter and search time-bounded events over HTTP. Events live in a
//! thread-safe in-memory index mirrored to a single JSON file that is
//! replaced atomically on every change.
//!
//! # Modules
//!
//! - `types`: The `Event` entity, partial updates and validation
//! - `event_store`: Locked in-memory map with crash-safe persistence
//! - `api`: Axum router and REST handlers
//! - `config`: Command-line and environment configuration
//! - `telemetry`: Logging setup
//! - `utils`: Atomic writes, ids and date parsing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use event_scheduler::{create_router, AppState, EventStore};
//!
//! let store = EventStore::open("data/events.json", chrono_tz::Tz::UTC).unwrap();
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let app = create_router(state, None);
//! # let _ = app;
//! ```

pub mod api;
pub mod config;
pub mod event_store;
pub mod telemetry;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::{Config, LogFormat};
pub use event_store::{EventStore, EventStoreError, EventStoreResult};
pub use types::{Event, EventPatch, ValidationError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
