//! REST API module for HTTP endpoints
//!
//! - `GET    /api/events` - List events (`date`, `tag`, `limit` filters)
//! - `POST   /api/events` - Create an event
//! - `GET    /api/events/:id` - Get one event
//! - `PUT    /api/events/:id` - Partially update an event
//! - `DELETE /api/events/:id` - Delete an event
//! - `GET    /api/events/date/:date` - Events starting on a day
//! - `GET    /api/events/search/:query` - Search titles

pub mod events;
pub mod search;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::event_store::EventStoreError;
use crate::types::{Event, ValidationError};

/// List of events with optional echo of the filter that produced it
#[derive(Debug, Serialize)]
pub struct EventList {
    pub events: Vec<Event>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl EventList {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            count: events.len(),
            events,
            date: None,
            query: None,
        }
    }
}

/// Response for create and update
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub message: String,
    pub event: Event,
}

/// Response for delete
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
    pub id: String,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: message.into(),
            code: code.to_string(),
            field: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self {
            field: Some(e.field),
            ..Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.message)
        }
    }
}

impl From<EventStoreError> for ApiError {
    fn from(e: EventStoreError) -> Self {
        match e {
            EventStoreError::NotFound(_) => Self::not_found("Event not found"),
            other => {
                error!(error = %other, "event store operation failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
