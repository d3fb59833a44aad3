//! Data types for the event scheduler
//!
//! This module contains the core data structures used throughout the application.

mod event;

pub use event::{Event, EventPatch, ValidationError};
