//! Utility functions and helpers
//!
//! This module contains atomic file writes, timestamps and id generation.

pub mod atomic;
pub mod time;

pub use atomic::{atomic_write, remove_stale_temp, AtomicError, AtomicResult};
pub use time::{generate_id, now, parse_date, today};
