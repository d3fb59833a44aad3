//! Date and title search endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use super::{ApiError, EventList};
use crate::api::state::AppState;
use crate::utils::{parse_date, today};

/// Query parameters for search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Search query string
    #[serde(default)]
    pub q: String,
}

/// GET /api/events/date[/] - Events starting today
pub async fn events_today(State(state): State<Arc<AppState>>) -> Json<EventList> {
    events_on(&state, "")
}

/// GET /api/events/date/:date - Events starting on a day, earliest first
///
/// An unparseable date falls back to today.
pub async fn events_by_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Json<EventList> {
    events_on(&state, &date)
}

fn events_on(state: &AppState, raw: &str) -> Json<EventList> {
    let tz = state.store.timezone();
    let date = parse_date(raw).unwrap_or_else(|| {
        if !raw.is_empty() {
            warn!(date = %raw, "invalid date, using today");
        }
        today(tz)
    });

    let mut list = EventList::new(state.store.get_by_date(date));
    list.date = Some(date.format("%Y-%m-%d").to_string());
    Json(list)
}

/// GET /api/events/search/:query - Case-insensitive title search
pub async fn search_by_path(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> Result<Json<EventList>, ApiError> {
    run_search(&state, query)
}

/// GET /api/events/search[/]?q= - Same search with the query as a parameter
pub async fn search_by_param(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<EventList>, ApiError> {
    run_search(&state, params.q)
}

fn run_search(state: &AppState, query: String) -> Result<Json<EventList>, ApiError> {
    if query.is_empty() {
        return Err(ApiError::bad_request("Search query must not be empty"));
    }

    let mut list = EventList::new(state.store.search(&query));
    list.query = Some(query);
    Ok(Json(list))
}
