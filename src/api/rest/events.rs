//! Event CRUD endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, DeletedResponse, EventList, EventResponse};
use crate::api::state::AppState;
use crate::types::{Event, EventPatch};

/// Query parameters for listing events
#[derive(Debug, Default, Deserialize)]
pub struct ListEventsParams {
    /// Only events starting on this day (`YYYY-MM-DD`); ignored if unparseable
    pub date: Option<String>,
    /// Only events carrying this tag, compared case-insensitively
    pub tag: Option<String>,
    /// Maximum number of events to return; ignored unless positive
    pub limit: Option<String>,
}

/// Body of `POST /api/events`
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "startTime")]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(rename = "endTime")]
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e.body_text())))
}

/// GET /api/events - List events ordered by start time
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEventsParams>,
) -> Json<EventList> {
    let tz = state.store.timezone();
    let mut events = state.store.get_all();

    if let Some(date) = params
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    {
        events.retain(|e| e.start_time.with_timezone(&tz).date_naive() == date);
    }

    if let Some(tag) = params.tag.as_deref().filter(|t| !t.is_empty()) {
        events.retain(|e| e.has_tag(tag));
    }

    events.sort_by(|a, b| {
        a.start_time
            .cmp(&b.start_time)
            .then_with(|| a.id.cmp(&b.id))
    });

    if let Some(limit) = params
        .limit
        .as_deref()
        .and_then(|l| l.parse::<usize>().ok())
        .filter(|l| *l > 0)
    {
        events.truncate(limit);
    }

    Json(EventList::new(events))
}

/// GET /api/events/:id - Get a single event
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Event>, ApiError> {
    Ok(Json(state.store.get_by_id(&id)?))
}

/// POST /api/events - Create an event
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let request = json_body(payload)?;

    if request.title.is_empty() {
        return Err(ApiError::bad_request("Event title is required"));
    }
    let (Some(start_time), Some(end_time)) = (request.start_time, request.end_time) else {
        return Err(ApiError::bad_request("Start and end time are required"));
    };

    let event = Event::new(
        request.title,
        start_time,
        end_time,
        request.tags.unwrap_or_default(),
    );
    event.validate()?;

    state.store.create(event.clone())?;
    info!(id = %event.id, title = %event.title, "created event");

    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created".to_string(),
            event,
        }),
    ))
}

/// PUT /api/events/:id - Update only the supplied fields of an event
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<EventPatch>, JsonRejection>,
) -> Result<Json<EventResponse>, ApiError> {
    let mut event = state.store.get_by_id(&id)?;
    let patch = json_body(payload)?;

    patch.apply_to(&mut event);
    event.validate()?;

    state.store.update(event.clone())?;
    info!(id = %event.id, "updated event");

    Ok(Json(EventResponse {
        message: "Event updated".to_string(),
        event,
    }))
}

/// DELETE /api/events/:id - Delete an event
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.get_by_id(&id)?;
    state.store.delete(&id)?;
    info!(id = %id, "deleted event");

    Ok(Json(DeletedResponse {
        message: "Event deleted".to_string(),
        id,
    }))
}
